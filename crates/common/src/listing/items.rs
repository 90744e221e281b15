//! Listable implementations for the content kinds

use super::Listable;
use crate::db::models::{Ebook, Konsep, Module, NewsArticle, Paper, PaperSummary};

impl Listable for Paper {
    fn title(&self) -> &str {
        &self.title
    }

    fn alt_title(&self) -> Option<&str> {
        self.alt_title.as_deref()
    }

    fn body_fields(&self) -> Vec<&str> {
        vec![self.summary.as_str()]
    }

    fn category_labels(&self) -> Vec<&str> {
        vec![self.category.as_str()]
    }
}

/// Summaries carry no category; a category selection excludes them all.
impl Listable for PaperSummary {
    fn title(&self) -> &str {
        &self.title
    }

    fn alt_title(&self) -> Option<&str> {
        self.alt_title.as_deref()
    }

    fn body_fields(&self) -> Vec<&str> {
        vec![self.summary.as_str()]
    }

    fn category_labels(&self) -> Vec<&str> {
        Vec::new()
    }
}

impl Listable for Konsep {
    fn title(&self) -> &str {
        &self.title
    }

    fn body_fields(&self) -> Vec<&str> {
        vec![self.short_explanation.as_str()]
    }

    fn category_labels(&self) -> Vec<&str> {
        vec![self.category.as_str()]
    }
}

impl Listable for Ebook {
    fn title(&self) -> &str {
        &self.title
    }

    fn body_fields(&self) -> Vec<&str> {
        vec![self.author.as_str(), self.description.as_str()]
    }

    fn category_labels(&self) -> Vec<&str> {
        self.tags.iter().map(String::as_str).collect()
    }
}

impl Listable for NewsArticle {
    fn title(&self) -> &str {
        &self.title
    }

    fn body_fields(&self) -> Vec<&str> {
        vec![self.excerpt.as_str()]
    }

    /// News is not categorised
    fn category_labels(&self) -> Vec<&str> {
        Vec::new()
    }
}

impl Listable for Module {
    fn title(&self) -> &str {
        &self.title
    }

    fn body_fields(&self) -> Vec<&str> {
        vec![self.description.as_str()]
    }

    fn category_labels(&self) -> Vec<&str> {
        vec![self.category.as_str()]
    }

    fn has_level(&self) -> bool {
        true
    }

    fn level(&self) -> Option<&str> {
        Some(self.level.as_str())
    }
}

#[cfg(test)]
mod tests {
    use crate::db::models::{Ebook, Konsep, Module, NewsArticle, Paper};
    use crate::listing::EmptyState;
    use crate::listing::{apply, ListingParams, SortKey};
    use serde_json::json;

    fn paper(id: &str, title: &str, alt: Option<&str>, summary: &str, category: &str) -> Paper {
        serde_json::from_value(json!({
            "id": id,
            "title": title,
            "alt_title": alt,
            "summary": summary,
            "year": 2020,
            "category": category,
            "created_at": "2024-01-01"
        }))
        .unwrap()
    }

    #[test]
    fn test_papers_search_alt_title_and_summary() {
        let papers = vec![
            paper("1", "Attention Is All You Need", Some("Transformer"), "Self-attention.", "LLM"),
            paper("2", "ReAct", None, "Reasoning and acting with transformer agents.", "Agents"),
            paper("3", "CLIP", None, "Contrastive image pretraining.", "Vision"),
        ];

        let params = ListingParams::new()
            .search("transformer")
            .sort(SortKey::Relevance);
        let ids: Vec<_> = apply(&papers, &params)
            .items
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);

        let params = ListingParams::new().categories(["LLM", "Vision"]);
        let ids: Vec<_> = apply(&papers, &params)
            .items
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_konsep_searches_short_explanation() {
        let konsep: Vec<Konsep> = serde_json::from_value(json!([
            {"id": "1", "title": "Tokenization", "category": "Fundamental",
             "shortExplanation": "Memecah teks menjadi potongan kecil."},
            {"id": "2", "title": "Quantization", "category": "Deployment",
             "shortExplanation": "Mengecilkan presisi bobot."}
        ]))
        .unwrap();

        let page = apply(&konsep, &ListingParams::new().search("BOBOT"));
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "2");
    }

    #[test]
    fn test_ebooks_filter_by_tag_and_author() {
        let ebooks: Vec<Ebook> = serde_json::from_value(json!([
            {"id": "1", "title": "Prompt 101", "author": "Tim Rekayasa", "tags": ["prompting", "pemula"]},
            {"id": "2", "title": "Agents Handbook", "author": "Sari", "tags": ["agents"]}
        ]))
        .unwrap();

        let page = apply(&ebooks, &ListingParams::new().category("Pemula"));
        assert_eq!(page.items[0].id, "1");
        assert_eq!(page.matched, 1);

        let page = apply(&ebooks, &ListingParams::new().search("sari"));
        assert_eq!(page.items[0].id, "2");
    }

    #[test]
    fn test_modules_filter_by_level() {
        let modules: Vec<Module> = serde_json::from_value(json!([
            {"id": "1", "title": "Intro", "category": "Dasar", "level": "Beginner", "created_at": "2024-01-02"},
            {"id": "2", "title": "Fine-tuning", "category": "Lanjut", "level": "Advanced", "created_at": "2024-01-01"}
        ]))
        .unwrap();

        let page = apply(&modules, &ListingParams::new().levels(["Advanced", "Intermediate"]));
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "2");
    }

    #[test]
    fn test_level_selection_leaves_unlevelled_kinds() {
        let konsep: Vec<Konsep> = serde_json::from_value(json!([
            {"id": "1", "title": "Tokenization", "category": "Fundamental"},
            {"id": "2", "title": "Quantization", "category": "Deployment"}
        ]))
        .unwrap();

        let page = apply(&konsep, &ListingParams::new().level("Beginner"));
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.empty_state, None);

        let page = apply(
            &konsep,
            &ListingParams::new().level("Beginner").category("Deployment"),
        );
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "2");
    }

    #[test]
    fn test_news_source_is_not_a_category() {
        let news: Vec<NewsArticle> = serde_json::from_value(json!([
            {"id": "n1", "title": "Model baru", "source_name": "Reuters", "published_at": "2024-05-01"}
        ]))
        .unwrap();

        let page = apply(&news, &ListingParams::new().category("Reuters"));
        assert!(page.items.is_empty());
        assert_eq!(page.empty_state, Some(EmptyState::NoMatches));

        let page = apply(&news, &ListingParams::new().search("reuters"));
        assert!(page.items.is_empty());
    }
}
