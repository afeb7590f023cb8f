//! Header records and their request-scoped augmented forms
//!
//! Headers are read out of loosely typed documents by a total conversion: no
//! document is ever rejected. Missing key fields become empty strings (the
//! reconciliation pipeline treats those as an incomplete natural key), and
//! fields this crate does not model are kept in `extra` and written back out.
//! A stored copy of a derived field is stale and is dropped on read.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::query::{value_as_text, Document};
use crate::constants::fields;

/// Purchase-order header (`order_headers`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHeader {
    pub id: String,
    pub customer_id: String,
    pub order_number: String,
    pub season: String,
    pub item_count_required: i64,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(flatten)]
    pub extra: Document,
}

impl OrderHeader {
    pub fn from_document(mut document: Document) -> Self {
        Self {
            id: take_text(&mut document, fields::ID),
            customer_id: take_text(&mut document, fields::CUSTOMER_ID),
            order_number: take_text(&mut document, fields::ORDER_NUMBER),
            season: take_text(&mut document, fields::SEASON),
            item_count_required: take_quantity(&mut document, fields::ITEM_COUNT_REQUIRED),
            status: take_text(&mut document, fields::STATUS),
            date: take_optional_text(&mut document, fields::DATE),
            extra: without(document, fields::LEFT_OUTSTANDING),
        }
    }
}

/// Export (extracted order) header (`export_headers`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportHeader {
    pub id: String,
    pub customer_id: String,
    pub store: String,
    #[serde(rename = "type")]
    pub export_type: String,
    pub date: String,
    pub item_count_required: i64,
    pub status: String,
    #[serde(flatten)]
    pub extra: Document,
}

impl ExportHeader {
    pub fn from_document(mut document: Document) -> Self {
        Self {
            id: take_text(&mut document, fields::ID),
            customer_id: take_text(&mut document, fields::CUSTOMER_ID),
            store: take_text(&mut document, fields::STORE),
            export_type: take_text(&mut document, fields::TYPE),
            date: take_text(&mut document, fields::DATE),
            item_count_required: take_quantity(&mut document, fields::ITEM_COUNT_REQUIRED),
            status: take_text(&mut document, fields::STATUS),
            extra: without(document, fields::AWAITING_SCAN),
        }
    }
}

/// Order header plus `leftOutstanding`; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AugmentedOrderHeader {
    #[serde(flatten)]
    pub header: OrderHeader,
    pub left_outstanding: i64,
}

/// Export header plus `awaitingScan`; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AugmentedExportHeader {
    #[serde(flatten)]
    pub header: ExportHeader,
    pub awaiting_scan: i64,
}

/// Input for initiating a purchase order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer_id: String,
    pub order_number: String,
    pub season: String,
    pub item_count_required: i64,
}

/// One fulfillment scan against an order's natural key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScan {
    pub customer_id: String,
    pub order_number: String,
    pub season: String,
    #[serde(default)]
    pub store: Option<String>,
    #[serde(default)]
    pub scanned_by: Option<String>,
}

/// One scan against an export's natural key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExportScan {
    pub customer_id: String,
    pub store: String,
    #[serde(rename = "type")]
    pub export_type: String,
    pub date: String,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub scanned_by: Option<String>,
}

fn take_optional_text(document: &mut Document, key: &str) -> Option<String> {
    document.remove(key).as_ref().and_then(value_as_text)
}

fn take_text(document: &mut Document, key: &str) -> String {
    take_optional_text(document, key).unwrap_or_default()
}

fn without(mut document: Document, key: &str) -> Document {
    document.remove(key);
    document
}

// Quantities were historically stored as strings; accept both forms.
// Whole-number floats (`10.0`) count; anything fractional is 0.
fn take_quantity(document: &mut Document, key: &str) -> i64 {
    match document.remove(key) {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().and_then(whole)).unwrap_or(0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().and_then(whole)).unwrap_or(0)
        }
        _ => 0,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::float_cmp)]
fn whole(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then(|| value as i64)
}
