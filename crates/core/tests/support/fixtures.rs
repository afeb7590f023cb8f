//! Document fixtures

use ordertrack_domain::Document;
use serde_json::{json, Value};

pub fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture must be a JSON object, got {other}"),
    }
}

pub fn order_header(id: &str, order_number: &str, required: i64, status: &str) -> Document {
    doc(json!({
        "id": id,
        "customerId": "C1",
        "orderNumber": order_number,
        "season": "S24",
        "itemCountRequired": required,
        "status": status,
        "date": "2024-03-01",
    }))
}

pub fn order_detail(id: &str, order_number: &str) -> Document {
    doc(json!({
        "id": id,
        "customerId": "C1",
        "orderNumber": order_number,
        "season": "S24",
        "store": "ST1",
        "scannedBy": "picker",
        "date": "2024-03-02",
    }))
}

pub fn export_header(id: &str, export_type: &str, date: &str, required: i64) -> Document {
    doc(json!({
        "id": id,
        "customerId": "C1",
        "store": "ST1",
        "type": export_type,
        "date": date,
        "itemCountRequired": required,
        "status": "OPEN",
    }))
}

pub fn export_detail(id: &str, export_type: &str, date: &str) -> Document {
    doc(json!({
        "id": id,
        "customerId": "C1",
        "store": "ST1",
        "type": export_type,
        "date": date,
    }))
}
