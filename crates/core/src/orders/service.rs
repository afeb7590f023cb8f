//! Purchase-order workflow: initiation, scans and closing

use std::sync::Arc;

use ordertrack_domain::constants::{fields, STATUS_CLOSED, STATUS_OPEN};
use ordertrack_domain::{
    Document, NewExportScan, NewOrder, NewScan, OrderHeader, OrderTrackError, Result, Table,
};
use serde_json::Value;

use crate::query::require;
use crate::records::{today, RecordService};

/// Order workflow service
pub struct OrderService {
    records: Arc<RecordService>,
}

impl OrderService {
    pub fn new(records: Arc<RecordService>) -> Self {
        Self { records }
    }

    /// Create an `OPEN` order header dated today.
    pub async fn initiate_order(&self, actor: &str, order: NewOrder) -> Result<OrderHeader> {
        require(fields::CUSTOMER_ID, Some(order.customer_id.as_str()))?;
        require(fields::ORDER_NUMBER, Some(order.order_number.as_str()))?;
        require(fields::SEASON, Some(order.season.as_str()))?;
        if order.item_count_required < 0 {
            return Err(OrderTrackError::InvalidInput(format!(
                "{} must not be negative",
                fields::ITEM_COUNT_REQUIRED
            )));
        }

        let mut document = Document::new();
        text(&mut document, fields::CUSTOMER_ID, order.customer_id.trim());
        text(&mut document, fields::ORDER_NUMBER, order.order_number.trim());
        text(&mut document, fields::SEASON, order.season.trim());
        document.insert(fields::ITEM_COUNT_REQUIRED.into(), Value::from(order.item_count_required));
        text(&mut document, fields::STATUS, STATUS_OPEN);
        text(&mut document, fields::DATE, &today());

        let id = self.records.create(actor, Table::OrderHeaders, document.clone()).await?;
        text(&mut document, fields::ID, &id);

        Ok(OrderHeader::from_document(document))
    }

    /// Record one fulfillment scan against an order's natural key.
    pub async fn record_scan(&self, actor: &str, scan: NewScan) -> Result<String> {
        require(fields::CUSTOMER_ID, Some(scan.customer_id.as_str()))?;
        require(fields::ORDER_NUMBER, Some(scan.order_number.as_str()))?;
        require(fields::SEASON, Some(scan.season.as_str()))?;

        let mut document = Document::new();
        text(&mut document, fields::CUSTOMER_ID, scan.customer_id.trim());
        text(&mut document, fields::ORDER_NUMBER, scan.order_number.trim());
        text(&mut document, fields::SEASON, scan.season.trim());
        optional_text(&mut document, fields::STORE, scan.store.as_deref());
        optional_text(&mut document, fields::SCANNED_BY, scan.scanned_by.as_deref().or(Some(actor)));
        text(&mut document, fields::DATE, &today());

        self.records.create(actor, Table::OrderDetails, document).await
    }

    /// Record one scan against an export's natural key.
    pub async fn record_export_scan(&self, actor: &str, scan: NewExportScan) -> Result<String> {
        require(fields::CUSTOMER_ID, Some(scan.customer_id.as_str()))?;
        require(fields::STORE, Some(scan.store.as_str()))?;
        require(fields::TYPE, Some(scan.export_type.as_str()))?;
        require(fields::DATE, Some(scan.date.as_str()))?;

        let mut document = Document::new();
        text(&mut document, fields::CUSTOMER_ID, scan.customer_id.trim());
        text(&mut document, fields::STORE, scan.store.trim());
        text(&mut document, fields::TYPE, scan.export_type.trim());
        text(&mut document, fields::DATE, scan.date.trim());
        optional_text(&mut document, fields::ORDER_NUMBER, scan.order_number.as_deref());
        optional_text(&mut document, fields::SCANNED_BY, scan.scanned_by.as_deref().or(Some(actor)));

        self.records.create(actor, Table::ExportDetails, document).await
    }

    /// Mark an order header `CLOSED`.
    pub async fn close_order(&self, actor: &str, id: &str) -> Result<()> {
        let mut changes = Document::new();
        text(&mut changes, fields::STATUS, STATUS_CLOSED);
        self.records.update(actor, Table::OrderHeaders, id, changes).await
    }
}

fn text(document: &mut Document, key: &str, value: &str) {
    document.insert(key.to_string(), Value::String(value.to_string()));
}

fn optional_text(document: &mut Document, key: &str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        text(document, key, value);
    }
}
