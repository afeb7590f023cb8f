//! Store-agnostic query descriptors
//!
//! A [`QueryDescriptor`] is a target table plus an ordered AND-conjunction of
//! clauses. Adapters translate it into whatever their store speaks; values are
//! carried as data and never spliced into query text.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Loosely typed persisted record.
pub type Document = serde_json::Map<String, Value>;

/// Collections known to the document store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    OrderHeaders,
    OrderDetails,
    ExportHeaders,
    ExportDetails,
    Users,
    Sites,
    Stores,
    SystemLogs,
}

crate::impl_domain_status_conversions!(Table {
    OrderHeaders => "order_headers",
    OrderDetails => "order_details",
    ExportHeaders => "export_headers",
    ExportDetails => "export_details",
    Users => "users",
    Sites => "sites",
    Stores => "stores",
    SystemLogs => "system_logs",
});

impl Table {
    pub const ALL: [Self; 8] = [
        Self::OrderHeaders,
        Self::OrderDetails,
        Self::ExportHeaders,
        Self::ExportDetails,
        Self::Users,
        Self::Sites,
        Self::Stores,
        Self::SystemLogs,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Comparison {
    Equals { value: String },
    BetweenInclusive { low: String, high: String },
}

/// One predicate clause over a single document field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clause {
    pub field: &'static str,
    #[serde(flatten)]
    pub comparison: Comparison,
}

impl Clause {
    pub fn equals(field: &'static str, value: impl Into<String>) -> Self {
        Self { field, comparison: Comparison::Equals { value: value.into() } }
    }

    pub fn between(field: &'static str, low: impl Into<String>, high: impl Into<String>) -> Self {
        Self { field, comparison: Comparison::BetweenInclusive { low: low.into(), high: high.into() } }
    }

    /// Evaluate the clause against a document.
    ///
    /// Field values are compared in their string form; a missing, null or
    /// structured field never matches. Ranges compare lexically, which is
    /// correct for ISO-8601 dates.
    pub fn matches(&self, document: &Document) -> bool {
        let Some(actual) = document.get(self.field).and_then(value_as_text) else {
            return false;
        };

        match &self.comparison {
            Comparison::Equals { value } => actual == *value,
            Comparison::BetweenInclusive { low, high } => {
                actual.as_str() >= low.as_str() && actual.as_str() <= high.as_str()
            }
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.comparison {
            Comparison::Equals { value } => write!(f, "{} = {:?}", self.field, value),
            Comparison::BetweenInclusive { low, high } => {
                write!(f, "{} BETWEEN {:?} AND {:?}", self.field, low, high)
            }
        }
    }
}

/// Target table plus ordered conjunction of clauses.
///
/// An empty predicate matches the full collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryDescriptor {
    pub target: Table,
    pub predicate: Vec<Clause>,
}

impl QueryDescriptor {
    pub fn new(target: Table) -> Self {
        Self { target, predicate: Vec::new() }
    }

    pub fn is_full_scan(&self) -> bool {
        self.predicate.is_empty()
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.predicate.iter().all(|clause| clause.matches(document))
    }
}

impl fmt::Display for QueryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.predicate.is_empty() {
            return write!(f, "{}[*]", self.target);
        }

        write!(f, "{}[", self.target)?;
        for (index, clause) in self.predicate.iter().enumerate() {
            if index > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{clause}")?;
        }
        f.write_str("]")
    }
}

/// Result of a store scan: the matching records and their count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutput {
    pub records: Vec<Document>,
    pub count: usize,
}

impl ScanOutput {
    pub fn new(records: Vec<Document>) -> Self {
        let count = records.len();
        Self { records, count }
    }
}

/// String form of a scalar JSON value, as used by clause comparisons.
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
