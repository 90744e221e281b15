//! Generic learning-resource record

use super::de;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ModuleLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleLevel::Beginner => "Beginner",
            ModuleLevel::Intermediate => "Intermediate",
            ModuleLevel::Advanced => "Advanced",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub description: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub category: String,
    pub level: ModuleLevel,
    #[serde(default, deserialize_with = "de::or_default")]
    pub icon: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub resource_url: String,
    #[serde(deserialize_with = "de::timestamp")]
    pub created_at: DateTime<Utc>,
}
