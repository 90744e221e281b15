//! Outbound links
//!
//! Purchase, resource and source links stored on entities point at third
//! parties. They are checked to be absolute http(s) URLs and then handed
//! back exactly as stored.

use crate::db::models::{Ebook, Konsep, Module, NewsArticle};
use crate::db::ContentRepository;
use crate::errors::{AppError, Result};
use reqwest::Url;
use serde::Serialize;
use std::fmt;

/// Entity kinds that carry an external destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Konsep,
    Ebook,
    Module,
    News,
}

impl LinkKind {
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "konsep" => Ok(LinkKind::Konsep),
            "ebook" => Ok(LinkKind::Ebook),
            "module" => Ok(LinkKind::Module),
            "news" => Ok(LinkKind::News),
            other => Err(AppError::NotFound {
                resource_type: "link kind".to_string(),
                id: other.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Konsep => "konsep",
            LinkKind::Ebook => "ebook",
            LinkKind::Module => "module",
            LinkKind::News => "news",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entities with an external destination
pub trait HasOutboundLink {
    fn outbound_url(&self) -> &str;
}

impl HasOutboundLink for Konsep {
    fn outbound_url(&self) -> &str {
        &self.resource_url
    }
}

impl HasOutboundLink for Ebook {
    fn outbound_url(&self) -> &str {
        &self.lynk_url
    }
}

impl HasOutboundLink for Module {
    fn outbound_url(&self) -> &str {
        &self.resource_url
    }
}

impl HasOutboundLink for NewsArticle {
    fn outbound_url(&self) -> &str {
        &self.source_url
    }
}

/// A validated destination, exactly as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundLink {
    pub kind: LinkKind,
    pub id: String,
    pub url: String,
}

/// Check that `raw` is an absolute http(s) URL and return it unchanged
pub fn validate_url(raw: &str) -> Result<&str> {
    let parsed = Url::parse(raw).map_err(|e| AppError::InvalidFormat {
        message: format!("Stored link is not a valid URL: {}", e),
    })?;

    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(raw),
        scheme => Err(AppError::InvalidFormat {
            message: format!("Stored link uses unsupported scheme: {}", scheme),
        }),
    }
}

/// Destination for one entity; an empty stored link falls back to `fallback`
pub fn link_for<T: HasOutboundLink>(
    kind: LinkKind,
    id: &str,
    entity: &T,
    fallback: Option<&str>,
) -> Result<OutboundLink> {
    let stored = entity.outbound_url();
    let raw = if stored.trim().is_empty() {
        fallback.ok_or_else(|| AppError::NotFound {
            resource_type: format!("{} link", kind),
            id: id.to_string(),
        })?
    } else {
        stored
    };

    Ok(OutboundLink {
        kind,
        id: id.to_string(),
        url: validate_url(raw)?.to_string(),
    })
}

/// Look up an entity and resolve its outbound destination
pub async fn resolve(
    repo: &ContentRepository,
    kind: LinkKind,
    id: &str,
    fallback: Option<&str>,
) -> Result<OutboundLink> {
    let not_found = || AppError::NotFound {
        resource_type: kind.to_string(),
        id: id.to_string(),
    };

    match kind {
        LinkKind::Konsep => {
            let konsep = repo.get_konsep(id).await.ok_or_else(not_found)?;
            link_for(kind, id, &konsep, fallback)
        }
        LinkKind::Ebook => {
            let ebook = repo.get_ebook(id).await.ok_or_else(not_found)?;
            link_for(kind, id, &ebook, fallback)
        }
        LinkKind::Module => {
            let module = repo.get_module(id).await.ok_or_else(not_found)?;
            link_for(kind, id, &module, fallback)
        }
        LinkKind::News => {
            let article = repo.get_news_article(id).await.ok_or_else(not_found)?;
            link_for(kind, id, &article, fallback)
        }
    }
}
