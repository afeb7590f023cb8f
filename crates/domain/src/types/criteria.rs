//! Search criteria submitted by end users
//!
//! Every field is optional. A field that is absent, empty or only whitespace is
//! "not specified" and must never turn into a predicate clause.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::query::Table;
use crate::{OrderTrackError, Result};

/// Which entity a search (or a builder) targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Order,
    OrderHeader,
    OrderDetail,
    ExportHeader,
    ExportDetail,
    User,
    Site,
    Store,
    SystemLog,
}

crate::impl_domain_status_conversions!(EntityKind {
    Order => "order",
    OrderHeader => "order-header",
    OrderDetail => "order-detail",
    ExportHeader => "export-header",
    ExportDetail => "export-detail",
    User => "user",
    Site => "site",
    Store => "store",
    SystemLog => "system-log",
});

impl EntityKind {
    pub const fn table(self) -> Table {
        match self {
            Self::Order | Self::OrderHeader => Table::OrderHeaders,
            Self::OrderDetail => Table::OrderDetails,
            Self::ExportHeader => Table::ExportHeaders,
            Self::ExportDetail => Table::ExportDetails,
            Self::User => Table::Users,
            Self::Site => Table::Sites,
            Self::Store => Table::Stores,
            Self::SystemLog => Table::SystemLogs,
        }
    }

    /// Header-table kinds accept the `closedOnly` flag.
    pub const fn is_header(self) -> bool {
        matches!(self, Self::Order | Self::OrderHeader | Self::ExportHeader)
    }
}

/// Returns the trimmed value when the field counts as specified.
pub fn specified(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Plain order lookup; every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderCriteria {
    pub customer_id: Option<String>,
    pub order_number: Option<String>,
    pub season: Option<String>,
    pub order_status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderHeaderCriteria {
    pub customer_id: Option<String>,
    pub order_number: Option<String>,
    pub season: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderDetailCriteria {
    pub customer_id: Option<String>,
    pub order_number: Option<String>,
    pub season: Option<String>,
    pub store: Option<String>,
    pub scanned_by: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportHeaderCriteria {
    pub customer_id: Option<String>,
    pub store: Option<String>,
    #[serde(rename = "type")]
    pub export_type: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportDetailCriteria {
    pub customer_id: Option<String>,
    pub store: Option<String>,
    #[serde(rename = "type")]
    pub export_type: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub order_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserCriteria {
    pub business_unit: Option<String>,
    pub username: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteCriteria {
    pub site_id: Option<String>,
    pub site_name: Option<String>,
    pub business_unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreCriteria {
    pub store_id: Option<String>,
    pub store_name: Option<String>,
    pub site_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemLogCriteria {
    pub username: Option<String>,
    pub action: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

/// Criteria tagged with the entity kind they search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SearchCriteria {
    Order(OrderCriteria),
    OrderHeader(OrderHeaderCriteria),
    OrderDetail(OrderDetailCriteria),
    ExportHeader(ExportHeaderCriteria),
    ExportDetail(ExportDetailCriteria),
    User(UserCriteria),
    Site(SiteCriteria),
    Store(StoreCriteria),
    SystemLog(SystemLogCriteria),
}

impl SearchCriteria {
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Order(_) => EntityKind::Order,
            Self::OrderHeader(_) => EntityKind::OrderHeader,
            Self::OrderDetail(_) => EntityKind::OrderDetail,
            Self::ExportHeader(_) => EntityKind::ExportHeader,
            Self::ExportDetail(_) => EntityKind::ExportDetail,
            Self::User(_) => EntityKind::User,
            Self::Site(_) => EntityKind::Site,
            Self::Store(_) => EntityKind::Store,
            Self::SystemLog(_) => EntityKind::SystemLog,
        }
    }

    /// Build criteria of the given kind from raw request parameters.
    ///
    /// Unknown parameters are ignored, so the same parameter map may also
    /// carry flags such as `closedOnly`.
    pub fn from_params(kind: EntityKind, params: &HashMap<String, String>) -> Result<Self> {
        let value = serde_json::to_value(params)?;
        let parse = |err: serde_json::Error| {
            OrderTrackError::InvalidInput(format!("invalid {kind} criteria: {err}"))
        };

        Ok(match kind {
            EntityKind::Order => Self::Order(serde_json::from_value(value).map_err(parse)?),
            EntityKind::OrderHeader => {
                Self::OrderHeader(serde_json::from_value(value).map_err(parse)?)
            }
            EntityKind::OrderDetail => {
                Self::OrderDetail(serde_json::from_value(value).map_err(parse)?)
            }
            EntityKind::ExportHeader => {
                Self::ExportHeader(serde_json::from_value(value).map_err(parse)?)
            }
            EntityKind::ExportDetail => {
                Self::ExportDetail(serde_json::from_value(value).map_err(parse)?)
            }
            EntityKind::User => Self::User(serde_json::from_value(value).map_err(parse)?),
            EntityKind::Site => Self::Site(serde_json::from_value(value).map_err(parse)?),
            EntityKind::Store => Self::Store(serde_json::from_value(value).map_err(parse)?),
            EntityKind::SystemLog => {
                Self::SystemLog(serde_json::from_value(value).map_err(parse)?)
            }
        })
    }
}
