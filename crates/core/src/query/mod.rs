//! Query construction: validation and predicate builders

pub mod builder;
pub mod validation;

pub use builder::{
    build_query, export_detail_query, export_header_query, order_detail_query, order_header_query,
    order_query, site_query, store_query, system_log_query, user_query,
};
pub use validation::{require, validate};
