//! E-books sold through an external storefront

use super::de;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ebook {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub author: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub description: String,
    #[serde(default, alias = "coverUrl", deserialize_with = "de::or_default")]
    pub cover_url: String,
    /// Display string, e.g. "Rp 49.000"
    #[serde(default, deserialize_with = "de::or_default")]
    pub price: String,
    /// Purchase destination, passed through untouched
    #[serde(default, alias = "lynkUrl", deserialize_with = "de::or_default")]
    pub lynk_url: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_camel_case_columns() {
        let ebook: Ebook = serde_json::from_value(json!({
            "id": "e1",
            "title": "Prompt Engineering 101",
            "author": "Tim Rekayasa",
            "coverUrl": "https://cdn.example.com/cover.png",
            "price": "Rp 49.000",
            "lynkUrl": "https://lynk.id/rekayasa-ai/prompt?ref=site",
            "tags": null
        }))
        .unwrap();

        assert_eq!(ebook.lynk_url, "https://lynk.id/rekayasa-ai/prompt?ref=site");
        assert_eq!(ebook.cover_url, "https://cdn.example.com/cover.png");
        assert!(ebook.tags.is_empty());
    }
}
