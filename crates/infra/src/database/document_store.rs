//! SQLite-backed `DocumentStore`
//!
//! Every collection lives in the single `documents` table. A descriptor is
//! compiled into a `WHERE` clause over `json_type`/`json_extract` with every
//! value and JSON path bound as a parameter. Field values compare in the same
//! text form the in-memory store uses.

use std::sync::Arc;

use async_trait::async_trait;
use ordertrack_core::DocumentStore;
use ordertrack_domain::{
    Comparison, Document, OrderTrackError, QueryDescriptor, Result as DomainResult, ScanOutput,
    Table,
};
use rusqlite::{params, params_from_iter, OptionalExtension};
use tokio::task;
use tracing::debug;

use super::manager::{map_sql_error, DbManager};
use crate::errors::InfraError;

/// SQLite implementation of `DocumentStore`
pub struct SqliteDocumentStore {
    db: Arc<DbManager>,
}

impl SqliteDocumentStore {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

/// SQL text plus its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CompiledScan {
    pub sql: String,
    pub params: Vec<String>,
}

pub(crate) fn compile_scan(query: &QueryDescriptor) -> CompiledScan {
    let mut sql = String::from("SELECT body FROM documents WHERE collection = ?1");
    let mut params = vec![query.target.to_string()];

    for clause in &query.predicate {
        let extract = field_text(params.len() + 1);
        params.push(json_path(clause.field));

        match &clause.comparison {
            Comparison::Equals { value } => {
                sql.push_str(&format!(" AND {extract} = ?{}", params.len() + 1));
                params.push(value.clone());
            }
            Comparison::BetweenInclusive { low, high } => {
                sql.push_str(&format!(
                    " AND {extract} BETWEEN ?{} AND ?{}",
                    params.len() + 1,
                    params.len() + 2
                ));
                params.push(low.clone());
                params.push(high.clone());
            }
        }
    }

    sql.push_str(" ORDER BY id");
    CompiledScan { sql, params }
}

/// Text form of the field at path parameter `?{slot}`, matching
/// `value_as_text`: booleans as `true`/`false`, structured values and nulls
/// as SQL `NULL` so they never compare equal.
fn field_text(slot: usize) -> String {
    format!(
        "CASE json_type(body, ?{slot}) \
         WHEN 'true' THEN 'true' \
         WHEN 'false' THEN 'false' \
         WHEN 'array' THEN NULL \
         WHEN 'object' THEN NULL \
         ELSE CAST(json_extract(body, ?{slot}) AS TEXT) END"
    )
}

fn json_path(field: &str) -> String {
    format!("$.\"{field}\"")
}

fn parse_body(body: &str) -> DomainResult<Document> {
    serde_json::from_str(body).map_err(|err| OrderTrackError::from(InfraError::from(err)))
}

fn encode_body(document: &Document) -> DomainResult<String> {
    serde_json::to_string(document).map_err(|err| OrderTrackError::from(InfraError::from(err)))
}

fn map_join_error(err: task::JoinError) -> OrderTrackError {
    OrderTrackError::from(InfraError::from(err))
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn scan(&self, query: &QueryDescriptor) -> DomainResult<ScanOutput> {
        let db = Arc::clone(&self.db);
        let compiled = compile_scan(query);
        debug!(query = %query, "sqlite scan");

        task::spawn_blocking(move || -> DomainResult<ScanOutput> {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(&compiled.sql).map_err(map_sql_error)?;
            let bodies = stmt
                .query_map(params_from_iter(compiled.params.iter()), |row| row.get::<_, String>(0))
                .map_err(map_sql_error)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(map_sql_error)?;

            let records =
                bodies.iter().map(|body| parse_body(body)).collect::<DomainResult<Vec<_>>>()?;
            Ok(ScanOutput::new(records))
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get(&self, table: Table, id: &str) -> DomainResult<Option<Document>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Document>> {
            let conn = db.get_connection()?;
            let body: Option<String> = conn
                .query_row(
                    "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
                    params![table.to_string(), id],
                    |row| row.get(0),
                )
                .optional()
                .map_err(map_sql_error)?;

            body.as_deref().map(parse_body).transpose()
        })
        .await
        .map_err(map_join_error)?
    }

    async fn put(&self, table: Table, id: &str, document: Document) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<()> {
            let body = encode_body(&document)?;
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO documents (collection, id, body, updated_at)
                 VALUES (?1, ?2, ?3, CAST(strftime('%s','now') AS INTEGER))
                 ON CONFLICT (collection, id) DO UPDATE
                 SET body = excluded.body, updated_at = excluded.updated_at",
                params![table.to_string(), id, body],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update(&self, table: Table, id: &str, changes: Document) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<()> {
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(map_sql_error)?;

            let body: Option<String> = tx
                .query_row(
                    "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
                    params![table.to_string(), id],
                    |row| row.get(0),
                )
                .optional()
                .map_err(map_sql_error)?;
            let Some(body) = body else {
                return Err(OrderTrackError::NotFound(format!("{table}/{id}")));
            };

            let mut document = parse_body(&body)?;
            document.extend(changes);

            tx.execute(
                "UPDATE documents SET body = ?3, updated_at = CAST(strftime('%s','now') AS INTEGER)
                 WHERE collection = ?1 AND id = ?2",
                params![table.to_string(), id, encode_body(&document)?],
            )
            .map_err(map_sql_error)?;
            tx.commit().map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete(&self, table: Table, id: &str) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
                params![table.to_string(), id],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}
