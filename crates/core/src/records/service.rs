//! Admin record management with an audit trail
//!
//! Thin pass-through to the document store for users, sites, stores and the
//! other tables. Every mutation appends a `system_logs` entry.

use std::sync::Arc;

use chrono::Utc;
use ordertrack_domain::constants::{fields, DATE_FORMAT};
use ordertrack_domain::{Document, OrderTrackError, Result, Table};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::store::DocumentStore;

/// Audit action recorded in `system_logs`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

ordertrack_domain::impl_domain_status_conversions!(AuditAction {
    Create => "create",
    Update => "update",
    Delete => "delete",
});

/// Record service
pub struct RecordService {
    store: Arc<dyn DocumentStore>,
}

impl RecordService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Store a new document and return its ID.
    ///
    /// A non-blank `id` field in the document is kept; otherwise a UUIDv7 is
    /// assigned.
    pub async fn create(&self, actor: &str, table: Table, mut document: Document) -> Result<String> {
        let id = match document.get(fields::ID) {
            Some(Value::String(id)) if !id.trim().is_empty() => id.trim().to_string(),
            _ => Uuid::now_v7().to_string(),
        };
        document.insert(fields::ID.to_string(), Value::String(id.clone()));

        self.store.put(table, &id, document).await?;
        info!(%table, record_id = %id, actor, "record created");

        self.audit(actor, AuditAction::Create, table, &id).await;
        Ok(id)
    }

    pub async fn get(&self, table: Table, id: &str) -> Result<Document> {
        self.store
            .get(table, id)
            .await?
            .ok_or_else(|| OrderTrackError::NotFound(format!("{table}/{id}")))
    }

    /// Merge `changes` into an existing record. The `id` field cannot change.
    pub async fn update(
        &self,
        actor: &str,
        table: Table,
        id: &str,
        mut changes: Document,
    ) -> Result<()> {
        changes.remove(fields::ID);
        if changes.is_empty() {
            return Err(OrderTrackError::InvalidInput("no fields to update".into()));
        }

        self.store.update(table, id, changes).await?;
        info!(%table, record_id = id, actor, "record updated");

        self.audit(actor, AuditAction::Update, table, id).await;
        Ok(())
    }

    pub async fn delete(&self, actor: &str, table: Table, id: &str) -> Result<()> {
        self.store.delete(table, id).await?;
        info!(%table, record_id = id, actor, "record deleted");

        self.audit(actor, AuditAction::Delete, table, id).await;
        Ok(())
    }

    // Audit failures are logged, never surfaced.
    async fn audit(&self, actor: &str, action: AuditAction, table: Table, record_id: &str) {
        if table == Table::SystemLogs {
            return;
        }

        let id = Uuid::now_v7().to_string();
        let mut entry = Document::new();
        entry.insert(fields::ID.into(), Value::String(id.clone()));
        entry.insert(fields::USERNAME.into(), Value::String(actor.to_string()));
        entry.insert(fields::ACTION.into(), Value::String(action.to_string()));
        entry.insert(fields::TABLE.into(), Value::String(table.to_string()));
        entry.insert(fields::RECORD_ID.into(), Value::String(record_id.to_string()));
        entry.insert(fields::DATE.into(), Value::String(today()));

        if let Err(err) = self.store.put(Table::SystemLogs, &id, entry).await {
            warn!(%table, record_id, %action, error = %err, "failed to write audit entry");
        }
    }
}

/// Today's date in the stored `date` format.
pub fn today() -> String {
    Utc::now().format(DATE_FORMAT).to_string()
}
