//! Natural-key lookups for the two header kinds

use ordertrack_domain::{
    AugmentedExportHeader, AugmentedOrderHeader, ExportDetailCriteria, ExportHeader,
    OrderDetailCriteria, OrderHeader, QueryDescriptor,
};

use super::pipeline::Reconcilable;
use crate::query::{export_detail_query, order_detail_query};

/// customerId, orderNumber, season
const ORDER_KEY_CLAUSES: usize = 3;
/// customerId, store, type, date
const EXPORT_KEY_CLAUSES: usize = 4;

impl Reconcilable for OrderHeader {
    type Augmented = AugmentedOrderHeader;

    fn detail_query(&self) -> Option<QueryDescriptor> {
        let query = order_detail_query(&OrderDetailCriteria {
            customer_id: Some(self.customer_id.clone()),
            order_number: Some(self.order_number.clone()),
            season: Some(self.season.clone()),
            ..Default::default()
        });

        (query.predicate.len() == ORDER_KEY_CLAUSES).then_some(query)
    }

    fn required_quantity(&self) -> i64 {
        self.item_count_required
    }

    fn record_id(&self) -> &str {
        &self.id
    }

    fn augment(self, derived: i64) -> AugmentedOrderHeader {
        AugmentedOrderHeader { header: self, left_outstanding: derived }
    }
}

impl Reconcilable for ExportHeader {
    type Augmented = AugmentedExportHeader;

    // The date is matched exactly by giving the range the same two bounds.
    fn detail_query(&self) -> Option<QueryDescriptor> {
        let query = export_detail_query(&ExportDetailCriteria {
            customer_id: Some(self.customer_id.clone()),
            store: Some(self.store.clone()),
            export_type: Some(self.export_type.clone()),
            from_date: Some(self.date.clone()),
            to_date: Some(self.date.clone()),
            order_number: None,
        });

        (query.predicate.len() == EXPORT_KEY_CLAUSES).then_some(query)
    }

    fn required_quantity(&self) -> i64 {
        self.item_count_required
    }

    fn record_id(&self) -> &str {
        &self.id
    }

    fn augment(self, derived: i64) -> AugmentedExportHeader {
        AugmentedExportHeader { header: self, awaiting_scan: derived }
    }
}
