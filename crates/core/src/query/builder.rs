//! Predicate builders
//!
//! One builder per entity kind. Each emits clauses in a fixed, kind-specific
//! field order and only for fields the caller specified, so identical
//! criteria always yield identical descriptors.
//!
//! Builders are total: required-field checks happen beforehand in
//! [`super::validation`].

use ordertrack_domain::constants::{fields, STATUS_ALL, STATUS_CLOSED, TYPE_ANY};
use ordertrack_domain::{
    specified, Clause, ExportDetailCriteria, ExportHeaderCriteria, OrderCriteria,
    OrderDetailCriteria, OrderHeaderCriteria, QueryDescriptor, SearchCriteria, SiteCriteria,
    StoreCriteria, SystemLogCriteria, Table, UserCriteria,
};

/// Accumulates clauses for one descriptor.
struct PredicateBuilder {
    query: QueryDescriptor,
}

impl PredicateBuilder {
    fn new(target: Table) -> Self {
        Self { query: QueryDescriptor::new(target) }
    }

    fn eq(mut self, field: &'static str, value: &Option<String>) -> Self {
        if let Some(value) = specified(value) {
            self.query.predicate.push(Clause::equals(field, value));
        }
        self
    }

    /// `type` filter; the `any` sentinel means no filter.
    fn export_type(self, value: &Option<String>) -> Self {
        match specified(value) {
            Some(v) if v.eq_ignore_ascii_case(TYPE_ANY) => self,
            _ => self.eq(fields::TYPE, value),
        }
    }

    /// Inclusive range on `date`, only when both bounds are present.
    fn date_range(mut self, from: &Option<String>, to: &Option<String>) -> Self {
        if let (Some(low), Some(high)) = (specified(from), specified(to)) {
            self.query.predicate.push(Clause::between(fields::DATE, low, high));
        }
        self
    }

    fn order_status(mut self, value: &Option<String>) -> Self {
        if let Some(status) = specified(value).map(str::to_uppercase) {
            if status != STATUS_ALL {
                self.query.predicate.push(Clause::equals(fields::STATUS, status));
            }
        }
        self
    }

    fn closed_only(mut self, closed_only: bool) -> Self {
        if closed_only {
            self.query.predicate.push(Clause::equals(fields::STATUS, STATUS_CLOSED));
        }
        self
    }

    fn build(self) -> QueryDescriptor {
        self.query
    }
}

/// Build the descriptor for any criteria variant.
///
/// `closed_only` only affects the header-table kinds.
pub fn build_query(criteria: &SearchCriteria, closed_only: bool) -> QueryDescriptor {
    match criteria {
        SearchCriteria::Order(c) => order_query(c, closed_only),
        SearchCriteria::OrderHeader(c) => order_header_query(c, closed_only),
        SearchCriteria::OrderDetail(c) => order_detail_query(c),
        SearchCriteria::ExportHeader(c) => export_header_query(c, closed_only),
        SearchCriteria::ExportDetail(c) => export_detail_query(c),
        SearchCriteria::User(c) => user_query(c),
        SearchCriteria::Site(c) => site_query(c),
        SearchCriteria::Store(c) => store_query(c),
        SearchCriteria::SystemLog(c) => system_log_query(c),
    }
}

/// Orders by customer, number and season, with an optional `orderStatus`
/// filter (`ALL` means none).
pub fn order_query(criteria: &OrderCriteria, closed_only: bool) -> QueryDescriptor {
    PredicateBuilder::new(Table::OrderHeaders)
        .eq(fields::CUSTOMER_ID, &criteria.customer_id)
        .eq(fields::ORDER_NUMBER, &criteria.order_number)
        .eq(fields::SEASON, &criteria.season)
        .order_status(&criteria.order_status)
        .closed_only(closed_only)
        .build()
}

/// Order headers for a customer, optionally restricted to a date range.
pub fn order_header_query(criteria: &OrderHeaderCriteria, closed_only: bool) -> QueryDescriptor {
    PredicateBuilder::new(Table::OrderHeaders)
        .eq(fields::CUSTOMER_ID, &criteria.customer_id)
        .eq(fields::ORDER_NUMBER, &criteria.order_number)
        .eq(fields::SEASON, &criteria.season)
        .date_range(&criteria.from_date, &criteria.to_date)
        .closed_only(closed_only)
        .build()
}

/// Order scan events. With customerId, orderNumber and season set this is the
/// natural-key lookup used by reconciliation.
pub fn order_detail_query(criteria: &OrderDetailCriteria) -> QueryDescriptor {
    PredicateBuilder::new(Table::OrderDetails)
        .eq(fields::CUSTOMER_ID, &criteria.customer_id)
        .eq(fields::ORDER_NUMBER, &criteria.order_number)
        .eq(fields::SEASON, &criteria.season)
        .eq(fields::STORE, &criteria.store)
        .eq(fields::SCANNED_BY, &criteria.scanned_by)
        .date_range(&criteria.from_date, &criteria.to_date)
        .build()
}

/// Export headers; a `type` of `any` is no filter.
pub fn export_header_query(criteria: &ExportHeaderCriteria, closed_only: bool) -> QueryDescriptor {
    PredicateBuilder::new(Table::ExportHeaders)
        .eq(fields::CUSTOMER_ID, &criteria.customer_id)
        .eq(fields::STORE, &criteria.store)
        .export_type(&criteria.export_type)
        .date_range(&criteria.from_date, &criteria.to_date)
        .eq(fields::STATUS, &criteria.status)
        .closed_only(closed_only)
        .build()
}

/// Export scan events, keyed the same way as their headers.
pub fn export_detail_query(criteria: &ExportDetailCriteria) -> QueryDescriptor {
    PredicateBuilder::new(Table::ExportDetails)
        .eq(fields::CUSTOMER_ID, &criteria.customer_id)
        .eq(fields::STORE, &criteria.store)
        .export_type(&criteria.export_type)
        .date_range(&criteria.from_date, &criteria.to_date)
        .eq(fields::ORDER_NUMBER, &criteria.order_number)
        .build()
}

/// Users within a business unit.
pub fn user_query(criteria: &UserCriteria) -> QueryDescriptor {
    PredicateBuilder::new(Table::Users)
        .eq(fields::BUSINESS_UNIT, &criteria.business_unit)
        .eq(fields::USERNAME, &criteria.username)
        .eq(fields::ROLE, &criteria.role)
        .build()
}

/// Sites, all fields optional.
pub fn site_query(criteria: &SiteCriteria) -> QueryDescriptor {
    PredicateBuilder::new(Table::Sites)
        .eq(fields::SITE_ID, &criteria.site_id)
        .eq(fields::SITE_NAME, &criteria.site_name)
        .eq(fields::BUSINESS_UNIT, &criteria.business_unit)
        .build()
}

/// Stores, all fields optional.
pub fn store_query(criteria: &StoreCriteria) -> QueryDescriptor {
    PredicateBuilder::new(Table::Stores)
        .eq(fields::STORE_ID, &criteria.store_id)
        .eq(fields::STORE_NAME, &criteria.store_name)
        .eq(fields::SITE_ID, &criteria.site_id)
        .build()
}

/// Audit entries by user, action and date range.
pub fn system_log_query(criteria: &SystemLogCriteria) -> QueryDescriptor {
    PredicateBuilder::new(Table::SystemLogs)
        .eq(fields::USERNAME, &criteria.username)
        .eq(fields::ACTION, &criteria.action)
        .date_range(&criteria.from_date, &criteria.to_date)
        .build()
}
