//! Application constants
//!
//! Document field names and sentinel values shared by the query builders,
//! the reconciliation pipeline and the store adapters.

/// Field names as they appear in stored documents.
pub mod fields {
    pub const ID: &str = "id";
    pub const CUSTOMER_ID: &str = "customerId";
    pub const ORDER_NUMBER: &str = "orderNumber";
    pub const SEASON: &str = "season";
    pub const STATUS: &str = "status";
    pub const DATE: &str = "date";
    pub const STORE: &str = "store";
    pub const TYPE: &str = "type";
    pub const SCANNED_BY: &str = "scannedBy";
    pub const ITEM_COUNT_REQUIRED: &str = "itemCountRequired";
    pub const BUSINESS_UNIT: &str = "businessUnit";
    pub const USERNAME: &str = "username";
    pub const ROLE: &str = "role";
    pub const SITE_ID: &str = "siteId";
    pub const SITE_NAME: &str = "siteName";
    pub const STORE_ID: &str = "storeId";
    pub const STORE_NAME: &str = "storeName";
    pub const ACTION: &str = "action";
    pub const TABLE: &str = "table";
    pub const RECORD_ID: &str = "recordId";
    pub const LEFT_OUTSTANDING: &str = "leftOutstanding";
    pub const AWAITING_SCAN: &str = "awaitingScan";
}

/// Export `type` value meaning "no filter".
pub const TYPE_ANY: &str = "any";

/// Normalized `orderStatus` value meaning "no filter".
pub const STATUS_ALL: &str = "ALL";

pub const STATUS_OPEN: &str = "OPEN";
pub const STATUS_CLOSED: &str = "CLOSED";

/// Date format used for `date` fields (ISO-8601 calendar date, sorts lexically).
pub const DATE_FORMAT: &str = "%Y-%m-%d";
