//! Order workflow and record administration services

mod support;

use std::sync::Arc;

use ordertrack_core::{OrderService, RecordService, SearchService};
use ordertrack_domain::{
    NewExportScan, NewOrder, NewScan, OrderCriteria, OrderTrackError, SearchCriteria,
    SearchRequest, SearchResults, Table,
};
use serde_json::json;
use support::fixtures::doc;
use support::store::ScriptedStore;

fn services(store: ScriptedStore) -> (Arc<ScriptedStore>, Arc<RecordService>, OrderService) {
    let store = Arc::new(store);
    let records = Arc::new(RecordService::new(store.clone()));
    let orders = OrderService::new(records.clone());
    (store, records, orders)
}

fn new_order(number: &str, required: i64) -> NewOrder {
    NewOrder {
        customer_id: "C1".into(),
        order_number: number.into(),
        season: "S24".into(),
        item_count_required: required,
    }
}

fn new_scan(number: &str) -> NewScan {
    NewScan {
        customer_id: "C1".into(),
        order_number: number.into(),
        season: "S24".into(),
        store: Some("ST1".into()),
        scanned_by: None,
    }
}

#[tokio::test]
async fn initiated_order_is_open_and_audited() {
    let (store, _, orders) = services(ScriptedStore::new());

    let header = orders.initiate_order("alice", new_order(" PO-1 ", 3)).await.unwrap();

    assert_eq!(header.status, "OPEN");
    assert_eq!(header.order_number, "PO-1");
    assert!(!header.id.is_empty());
    assert!(header.date.is_some());

    let logs = store.documents(Table::SystemLogs);
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["username"], json!("alice"));
    assert_eq!(logs[0]["action"], json!("create"));
    assert_eq!(logs[0]["table"], json!("order_headers"));
    assert_eq!(logs[0]["recordId"], json!(header.id));
}

#[tokio::test]
async fn order_initiation_rejects_bad_input() {
    let (store, _, orders) = services(ScriptedStore::new());

    let err = orders.initiate_order("alice", new_order("  ", 3)).await.unwrap_err();
    assert_eq!(err, OrderTrackError::InvalidInput("orderNumber is required".into()));

    let err = orders.initiate_order("alice", new_order("PO-1", -1)).await.unwrap_err();
    assert!(matches!(err, OrderTrackError::InvalidInput(_)));

    assert_eq!(store.len(Table::OrderHeaders), 0);
}

#[tokio::test]
async fn scans_reduce_left_outstanding() {
    let (store, _, orders) = services(ScriptedStore::new());
    orders.initiate_order("alice", new_order("PO-1", 3)).await.unwrap();

    orders.record_scan("bob", new_scan("PO-1")).await.unwrap();
    orders.record_scan("bob", new_scan("PO-1")).await.unwrap();

    let details = store.documents(Table::OrderDetails);
    assert_eq!(details.len(), 2);
    assert_eq!(details[0]["scannedBy"], json!("bob"));

    let outcome = SearchService::new(store)
        .search(SearchRequest::new(SearchCriteria::Order(OrderCriteria::default())))
        .await;
    let SearchResults::Orders(rows) = outcome.results else {
        panic!("expected order rows");
    };
    assert_eq!(rows[0].left_outstanding, 1);
}

#[tokio::test]
async fn export_scan_is_keyed_by_store_type_and_date() {
    let (store, _, orders) = services(ScriptedStore::new());

    let scan = NewExportScan {
        customer_id: "C1".into(),
        store: "ST1".into(),
        export_type: "carton".into(),
        date: "2024-03-01".into(),
        order_number: None,
        scanned_by: Some("carol".into()),
    };
    orders.record_export_scan("bob", scan).await.unwrap();

    let details = store.documents(Table::ExportDetails);
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["type"], json!("carton"));
    assert_eq!(details[0]["scannedBy"], json!("carol"));
    assert!(details[0].get("orderNumber").is_none());
}

#[tokio::test]
async fn closing_an_order_sets_closed_status() {
    let (_, records, orders) = services(ScriptedStore::new());
    let header = orders.initiate_order("alice", new_order("PO-1", 1)).await.unwrap();

    orders.close_order("alice", &header.id).await.unwrap();

    let stored = records.get(Table::OrderHeaders, &header.id).await.unwrap();
    assert_eq!(stored["status"], json!("CLOSED"));
    assert_eq!(stored["orderNumber"], json!("PO-1"));
}

#[tokio::test]
async fn closing_a_missing_order_is_not_found() {
    let (_, _, orders) = services(ScriptedStore::new());

    let err = orders.close_order("alice", "missing").await.unwrap_err();

    assert!(matches!(err, OrderTrackError::NotFound(_)));
}

#[tokio::test]
async fn record_crud_round_trip() {
    let (store, records, _) = services(ScriptedStore::new());

    let id = records
        .create("admin", Table::Sites, doc(json!({"id": "site-1", "siteName": "North"})))
        .await
        .unwrap();
    assert_eq!(id, "site-1");

    records
        .update("admin", Table::Sites, &id, doc(json!({"id": "ignored", "siteName": "North Hub"})))
        .await
        .unwrap();
    let site = records.get(Table::Sites, &id).await.unwrap();
    assert_eq!(site["siteName"], json!("North Hub"));
    assert_eq!(site["id"], json!("site-1"));

    records.delete("admin", Table::Sites, &id).await.unwrap();
    let err = records.get(Table::Sites, &id).await.unwrap_err();
    assert_eq!(err, OrderTrackError::NotFound("sites/site-1".into()));

    let mut actions: Vec<_> = store
        .documents(Table::SystemLogs)
        .iter()
        .map(|entry| entry["action"].as_str().unwrap_or_default().to_string())
        .collect();
    actions.sort();
    assert_eq!(actions, vec!["create", "delete", "update"]);
}

#[tokio::test]
async fn generated_ids_are_assigned_when_missing() {
    let (_, records, _) = services(ScriptedStore::new());

    let id = records
        .create("admin", Table::Users, doc(json!({"username": "dave", "id": "  "})))
        .await
        .unwrap();

    assert!(!id.trim().is_empty());
    let user = records.get(Table::Users, &id).await.unwrap();
    assert_eq!(user["id"], json!(id));
}

#[tokio::test]
async fn empty_update_is_rejected() {
    let (_, records, _) = services(ScriptedStore::new());

    let err = records
        .update("admin", Table::Users, "u1", doc(json!({"id": "u1"})))
        .await
        .unwrap_err();

    assert!(matches!(err, OrderTrackError::InvalidInput(_)));
}

#[tokio::test]
async fn audit_failure_does_not_fail_the_mutation() {
    let (store, records, _) = services(ScriptedStore::new().fail_writes_on(Table::SystemLogs));

    let id = records
        .create("admin", Table::Stores, doc(json!({"storeName": "Depot"})))
        .await
        .unwrap();

    assert_eq!(store.len(Table::Stores), 1);
    assert_eq!(store.len(Table::SystemLogs), 0);
    assert!(records.get(Table::Stores, &id).await.is_ok());
}

#[tokio::test]
async fn system_log_writes_are_not_audited() {
    let (store, records, _) = services(ScriptedStore::new());

    records
        .create("admin", Table::SystemLogs, doc(json!({"action": "manual"})))
        .await
        .unwrap();

    assert_eq!(store.len(Table::SystemLogs), 1);
}
