//! Paper breakdowns and their list projection

use super::de;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaperCategory {
    #[serde(rename = "LLM")]
    Llm,
    Vision,
    #[serde(rename = "NLP")]
    Nlp,
    Agents,
    Multimodal,
}

impl PaperCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaperCategory::Llm => "LLM",
            PaperCategory::Vision => "Vision",
            PaperCategory::Nlp => "NLP",
            PaperCategory::Agents => "Agents",
            PaperCategory::Multimodal => "Multimodal",
        }
    }
}

impl fmt::Display for PaperCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publication state; rows predating the column count as published
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperStatus {
    Draft,
    #[default]
    Published,
}

impl PaperStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaperStatus::Draft => "draft",
            PaperStatus::Published => "published",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownSection {
    pub title: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub original_text: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub simplified_explanation: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub analogy: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub term: String,
    pub definition: String,
}

/// Full paper record, including the nested breakdown content.
///
/// `breakdown_sections` and `glossary` keep the order the author wrote
/// them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub alt_title: Option<String>,
    #[serde(default, deserialize_with = "de::names")]
    pub authors: Vec<String>,
    #[serde(deserialize_with = "de::year")]
    pub year: i32,
    #[serde(default, deserialize_with = "de::or_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub impact_badge: String,
    #[serde(default, alias = "keyInsights", deserialize_with = "de::or_default")]
    pub key_insights: Vec<String>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub breakdown_sections: Vec<BreakdownSection>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub glossary: Vec<GlossaryEntry>,
    pub category: PaperCategory,
    #[serde(default, deserialize_with = "de::or_default")]
    pub status: PaperStatus,
    #[serde(deserialize_with = "de::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Listing projection of a paper, without the heavy nested fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperSummary {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub alt_title: Option<String>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub impact_badge: String,
    #[serde(default, deserialize_with = "de::names")]
    pub authors: Vec<String>,
    #[serde(deserialize_with = "de::year")]
    pub year: i32,
    #[serde(deserialize_with = "de::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub status: PaperStatus,
}

impl PaperSummary {
    /// Columns requested from the store for the summary projection
    pub const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "alt_title",
        "summary",
        "impact_badge",
        "authors",
        "year",
        "created_at",
        "status",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paper_decodes_legacy_shape() {
        let paper: Paper = serde_json::from_value(json!({
            "id": 7,
            "title": "Attention Is All You Need",
            "authors": "Vaswani, Shazeer , Parmar",
            "year": "2017",
            "category": "LLM",
            "summary": "Transformers.",
            "keyInsights": ["Self-attention"],
            "breakdown_sections": null,
            "created_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(paper.id, "7");
        assert_eq!(paper.authors, vec!["Vaswani", "Shazeer", "Parmar"]);
        assert_eq!(paper.year, 2017);
        assert_eq!(paper.key_insights, vec!["Self-attention"]);
        assert!(paper.breakdown_sections.is_empty());
        assert_eq!(paper.status, PaperStatus::Published);
    }

    #[test]
    fn test_breakdown_order_is_preserved() {
        let paper: Paper = serde_json::from_value(json!({
            "id": "p",
            "title": "T",
            "year": 2020,
            "category": "Agents",
            "status": "draft",
            "created_at": "2024-01-01",
            "breakdown_sections": [
                {"title": "Zeta", "original_text": "z", "simplified_explanation": "z", "analogy": "z"},
                {"title": "Alpha", "original_text": "a", "simplified_explanation": "a", "analogy": "a"}
            ],
            "glossary": [
                {"term": "Token", "definition": "piece"},
                {"term": "Attention", "definition": "weighting"}
            ]
        }))
        .unwrap();

        let titles: Vec<_> = paper.breakdown_sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Zeta", "Alpha"]);
        assert_eq!(paper.glossary[0].term, "Token");
        assert_eq!(paper.status, PaperStatus::Draft);
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let result = serde_json::from_value::<Paper>(json!({
            "id": "x", "title": "T", "year": 2020, "category": "Robotics",
            "created_at": "2024-01-01"
        }));
        assert!(result.is_err());
    }
}
