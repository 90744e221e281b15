//! Konsep: short concept explainers shown in a bento grid

use super::de;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KonsepCategory {
    Fundamental,
    Architecture,
    Training,
    Deployment,
}

impl KonsepCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            KonsepCategory::Fundamental => "Fundamental",
            KonsepCategory::Architecture => "Architecture",
            KonsepCategory::Training => "Training",
            KonsepCategory::Deployment => "Deployment",
        }
    }
}

/// Layout hint for the presentation grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KonsepSize {
    #[default]
    Normal,
    Wide,
    Tall,
    Large,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Konsep {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub title: String,
    /// Symbolic glyph name, resolved by the presentation layer
    #[serde(default, deserialize_with = "de::or_default")]
    pub icon: String,
    pub category: KonsepCategory,
    #[serde(default, alias = "shortExplanation", deserialize_with = "de::or_default")]
    pub short_explanation: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub analogy: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub size: KonsepSize,
    #[serde(default, deserialize_with = "de::or_default")]
    pub resource_url: String,
}
