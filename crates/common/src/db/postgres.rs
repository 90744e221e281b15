//! Direct Postgres backend
//!
//! Renders a `Query` as parameterised SQL and lets Postgres build the JSON
//! for each row via `row_to_json`, so array and jsonb columns arrive in the
//! same shape the REST backend returns.

use super::query::{FilterValue, Query, Selection};
use super::{ContentStore, Row};
use crate::config::StoreConfig;
use crate::errors::{AppError, Result};
use async_trait::async_trait;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, Statement, Value,
};
use tracing::info;

/// SeaORM connection used purely for raw reads
#[derive(Clone)]
pub struct PostgresStore {
    db: DatabaseConnection,
}

impl PostgresStore {
    /// Connect using `store.database_url`
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let url = config
            .database_url
            .as_deref()
            .ok_or_else(|| AppError::Configuration {
                message: "store.database_url is required for the postgres backend".to_string(),
            })?;

        info!("Connecting to content database...");

        let mut opts = ConnectOptions::new(url);
        opts.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(config.timeout())
            .sqlx_logging(false);

        let db = Database::connect(opts)
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Failed to connect to content database: {}", e),
            })?;

        Ok(Self { db })
    }

    /// Build the SQL statement for a query
    pub fn statement(query: &Query) -> Result<Statement> {
        query.validate()?;

        let columns = match &query.selection {
            Selection::All => "*".to_string(),
            Selection::Columns(cols) => cols
                .iter()
                .map(|c| format!("\"{}\"", c))
                .collect::<Vec<_>>()
                .join(", "),
        };

        let mut sql = format!(
            "SELECT row_to_json(t) AS row FROM (SELECT {} FROM \"{}\"",
            columns,
            query.collection.as_str()
        );

        let mut values: Vec<Value> = Vec::with_capacity(query.filters.len());
        for (i, filter) in query.filters.iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            let placeholder = i + 1;
            match &filter.value {
                // Cast so text ids compare against uuid or integer columns
                FilterValue::Text(s) => {
                    sql.push_str(&format!("\"{}\"::text = ${}", filter.field, placeholder));
                    values.push(s.clone().into());
                }
                FilterValue::Bool(b) => {
                    sql.push_str(&format!("\"{}\" = ${}", filter.field, placeholder));
                    values.push((*b).into());
                }
                FilterValue::Int(n) => {
                    sql.push_str(&format!("\"{}\" = ${}", filter.field, placeholder));
                    values.push((*n).into());
                }
            }
        }

        if let Some(order) = &query.order {
            sql.push_str(&format!(
                " ORDER BY \"{}\" {} NULLS LAST",
                order.field,
                order.direction.as_str().to_uppercase()
            ));
        }

        if let Some(limit) = query.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        sql.push_str(") t");

        Ok(Statement::from_sql_and_values(DbBackend::Postgres, &sql, values))
    }
}

#[async_trait]
impl ContentStore for PostgresStore {
    async fn fetch(&self, query: &Query) -> Result<Vec<Row>> {
        let stmt = Self::statement(query)?;

        let rows = self
            .db
            .query_all(stmt)
            .await?
            .into_iter()
            .map(|row| row.try_get_by_index::<Row>(0))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    async fn ping(&self) -> Result<()> {
        self.db
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Ping failed: {}", e),
            })?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
