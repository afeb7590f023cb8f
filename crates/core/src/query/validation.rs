//! Caller-side required-field checks
//!
//! Runs before any builder. A failure here is a user-facing message; the store
//! is never consulted.

use ordertrack_domain::constants::fields;
use ordertrack_domain::{OrderTrackError, Result, SearchCriteria};

/// Check that the mandatory field for the criteria kind is present.
///
/// Site, Store, SystemLog and plain Order searches have no required field.
pub fn validate(criteria: &SearchCriteria) -> Result<()> {
    let (field, value) = match criteria {
        SearchCriteria::OrderHeader(c) => (fields::CUSTOMER_ID, &c.customer_id),
        SearchCriteria::OrderDetail(c) => (fields::CUSTOMER_ID, &c.customer_id),
        SearchCriteria::ExportHeader(c) => (fields::CUSTOMER_ID, &c.customer_id),
        SearchCriteria::ExportDetail(c) => (fields::CUSTOMER_ID, &c.customer_id),
        SearchCriteria::User(c) => (fields::BUSINESS_UNIT, &c.business_unit),
        SearchCriteria::Order(_)
        | SearchCriteria::Site(_)
        | SearchCriteria::Store(_)
        | SearchCriteria::SystemLog(_) => return Ok(()),
    };

    require(field, value.as_deref())
}

/// Fails with `InvalidInput` naming the field when it is blank.
pub fn require(field: &str, value: Option<&str>) -> Result<()> {
    if value.is_some_and(|v| !v.trim().is_empty()) {
        Ok(())
    } else {
        Err(OrderTrackError::InvalidInput(format!("{field} is required")))
    }
}
