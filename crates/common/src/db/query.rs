//! Backend-neutral read query
//!
//! Describes the whole read surface the repository needs from a store:
//! column selection, equality filters, a single ordering and a limit.

use crate::errors::{AppError, Result};
use serde_json::Value;
use std::fmt;

/// Named collections exposed by the content store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Papers,
    NewsArticles,
    Ebooks,
    Konsep,
    Modules,
    SiteConfig,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Papers,
        Collection::NewsArticles,
        Collection::Ebooks,
        Collection::Konsep,
        Collection::Modules,
        Collection::SiteConfig,
    ];

    /// Table / endpoint name in the store
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Papers => "papers",
            Collection::NewsArticles => "news_articles",
            Collection::Ebooks => "ebooks",
            Collection::Konsep => "konsep",
            Collection::Modules => "modules",
            Collection::SiteConfig => "site_config",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which columns a query returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Columns(Vec<&'static str>),
}

/// Right-hand side of an equality filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Bool(bool),
    Int(i64),
}

impl FilterValue {
    /// Loose equality against a stored JSON value.
    ///
    /// Text compares against the value's string rendering so that numeric
    /// or uuid-like ids match however the row encodes them.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (FilterValue::Bool(b), Value::Bool(v)) => b == v,
            (FilterValue::Int(i), Value::Number(n)) => n.as_i64() == Some(*i),
            (FilterValue::Text(s), Value::String(v)) => s == v,
            (FilterValue::Text(s), Value::Number(n)) => s == &n.to_string(),
            (FilterValue::Text(s), Value::Bool(b)) => s == &b.to_string(),
            _ => false,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(s) => f.write_str(s),
            FilterValue::Bool(b) => write!(f, "{}", b),
            FilterValue::Int(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Int(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: &'static str,
    pub value: FilterValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub field: &'static str,
    pub direction: Direction,
}

/// A single read against one collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub collection: Collection,
    pub selection: Selection,
    pub filters: Vec<Filter>,
    pub order: Option<Ordering>,
    pub limit: Option<u32>,
}

impl Query {
    /// Select all columns of a collection
    pub fn from(collection: Collection) -> Self {
        Self {
            collection,
            selection: Selection::All,
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn select(mut self, columns: &[&'static str]) -> Self {
        self.selection = Selection::Columns(columns.to_vec());
        self
    }

    pub fn eq(mut self, field: &'static str, value: impl Into<FilterValue>) -> Self {
        self.filters.push(Filter {
            field,
            value: value.into(),
        });
        self
    }

    pub fn order_desc(mut self, field: &'static str) -> Self {
        self.order = Some(Ordering {
            field,
            direction: Direction::Desc,
        });
        self
    }

    pub fn order_asc(mut self, field: &'static str) -> Self {
        self.order = Some(Ordering {
            field,
            direction: Direction::Asc,
        });
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Every identifier the query will place into a backend request
    pub fn identifiers(&self) -> Vec<&str> {
        let mut names = vec![self.collection.as_str()];
        if let Selection::Columns(cols) = &self.selection {
            names.extend(cols.iter().copied());
        }
        names.extend(self.filters.iter().map(|f| f.field));
        if let Some(order) = &self.order {
            names.push(order.field);
        }
        names
    }

    /// Reject identifiers that are not plain `[A-Za-z_][A-Za-z0-9_]*`
    pub fn validate(&self) -> Result<()> {
        for name in self.identifiers() {
            if !is_identifier(name) {
                return Err(AppError::InvalidIdentifier {
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
