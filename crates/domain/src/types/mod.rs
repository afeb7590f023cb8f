//! Domain types and models

pub mod criteria;
pub mod query;
pub mod records;
pub mod search;

pub use criteria::{
    specified, EntityKind, ExportDetailCriteria, ExportHeaderCriteria, OrderCriteria,
    OrderDetailCriteria, OrderHeaderCriteria, SearchCriteria, SiteCriteria, StoreCriteria,
    SystemLogCriteria, UserCriteria,
};
pub use query::{value_as_text, Clause, Comparison, Document, QueryDescriptor, ScanOutput, Table};
pub use records::{
    AugmentedExportHeader, AugmentedOrderHeader, ExportHeader, NewExportScan, NewOrder, NewScan,
    OrderHeader,
};
pub use search::{SearchOutcome, SearchRequest, SearchResults, SearchStatus};
