//! In-memory content store
//!
//! Holds collections as JSON rows and answers queries with the same
//! semantics as the remote backends. Used for local fixtures and tests.

use super::query::{Collection, Direction, Query, Selection};
use super::{ContentStore, Row};
use crate::errors::{AppError, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: HashMap<Collection, Vec<Row>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rows of one collection
    pub fn with_rows(mut self, collection: Collection, rows: Vec<Row>) -> Self {
        self.collections.insert(collection, rows);
        self
    }

    /// Build from a fixtures document: `{"papers": [...], "konsep": [...]}`
    pub fn from_value(document: Value) -> Result<Self> {
        let Value::Object(map) = document else {
            return Err(AppError::InvalidFormat {
                message: "fixtures must be a JSON object keyed by collection".to_string(),
            });
        };

        let mut store = Self::new();
        for (name, rows) in map {
            let Some(collection) = Collection::from_name(&name) else {
                warn!(collection = %name, "Ignoring unknown fixture collection");
                continue;
            };
            let Value::Array(rows) = rows else {
                return Err(AppError::InvalidFormat {
                    message: format!("fixture collection {} must be an array", name),
                });
            };
            store.collections.insert(collection, rows);
        }
        Ok(store)
    }

    /// Load a fixtures file from disk
    pub fn from_fixtures(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let store = Self::from_value(serde_json::from_str(&raw)?)?;
        info!(
            path = %path.display(),
            collections = store.collections.len(),
            "Loaded content fixtures"
        );
        Ok(store)
    }

    fn run(&self, query: &Query) -> Vec<Row> {
        let source = self
            .collections
            .get(&query.collection)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut rows: Vec<&Row> = source
            .iter()
            .filter(|row| {
                query.filters.iter().all(|filter| {
                    row.get(filter.field)
                        .map(|v| filter.value.matches(v))
                        .unwrap_or(false)
                })
            })
            .collect();

        if let Some(order) = &query.order {
            // sort_by is stable: ties keep insertion order
            rows.sort_by(|a, b| {
                compare_nulls_last(a.get(order.field), b.get(order.field), order.direction)
            });
        }

        let limit = query.limit.map(|l| l as usize).unwrap_or(usize::MAX);

        rows.into_iter()
            .take(limit)
            .map(|row| project(row, &query.selection))
            .collect()
    }
}

fn project(row: &Row, selection: &Selection) -> Row {
    match selection {
        Selection::All => row.clone(),
        Selection::Columns(cols) => {
            let mut out = Map::new();
            for col in cols {
                if let Some(value) = row.get(*col) {
                    out.insert((*col).to_string(), value.clone());
                }
            }
            Value::Object(out)
        }
    }
}

fn compare_nulls_last(a: Option<&Value>, b: Option<&Value>, direction: Direction) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ord = compare_values(a, b);
            match direction {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            }
        }
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        // ISO-8601 timestamps order correctly as strings
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn fetch(&self, query: &Query) -> Result<Vec<Row>> {
        query.validate()?;
        Ok(self.run(query))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
