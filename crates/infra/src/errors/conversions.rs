//! Conversions from external infrastructure errors into domain errors.

use ordertrack_domain::OrderTrackError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub OrderTrackError);

impl From<InfraError> for OrderTrackError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<OrderTrackError> for InfraError {
    fn from(value: OrderTrackError) -> Self {
        InfraError(value)
    }
}

trait IntoOrderTrackError {
    fn into_ordertrack(self) -> OrderTrackError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → OrderTrackError */
/* -------------------------------------------------------------------------- */

impl IntoOrderTrackError for SqlError {
    fn into_ordertrack(self) -> OrderTrackError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        OrderTrackError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        OrderTrackError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067 | 1555) => {
                        OrderTrackError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::NotADatabase, _) => {
                        OrderTrackError::Database("file is not a database".into())
                    }
                    _ => OrderTrackError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => OrderTrackError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                OrderTrackError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                OrderTrackError::Database(format!("invalid column type: {ty}"))
            }
            RE::InvalidPath(path) => OrderTrackError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => OrderTrackError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_ordertrack())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → OrderTrackError */
/* -------------------------------------------------------------------------- */

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(OrderTrackError::Database(format!("connection pool error: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → OrderTrackError */
/* -------------------------------------------------------------------------- */

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(OrderTrackError::Database(format!("stored document is not valid JSON: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* tokio::task::JoinError → OrderTrackError */
/* -------------------------------------------------------------------------- */

impl From<tokio::task::JoinError> for InfraError {
    fn from(value: tokio::task::JoinError) -> Self {
        InfraError(OrderTrackError::Internal(format!("Task join error: {value}")))
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::ffi::{Error as FfiError, ErrorCode};

    use super::*;

    #[test]
    fn sqlite_busy_maps_to_database_error() {
        let err = SqlError::SqliteFailure(
            FfiError { code: ErrorCode::DatabaseBusy, extended_code: 5 },
            Some("database is locked".into()),
        );

        let mapped: OrderTrackError = InfraError::from(err).into();
        match mapped {
            OrderTrackError::Database(msg) => assert!(msg.contains("busy")),
            other => panic!("expected database error, got {:?}", other),
        }
    }

    #[test]
    fn unique_violation_is_named() {
        let err = SqlError::SqliteFailure(
            FfiError { code: ErrorCode::ConstraintViolation, extended_code: 1555 },
            None,
        );

        let mapped: OrderTrackError = InfraError::from(err).into();
        assert_eq!(mapped, OrderTrackError::Database("unique constraint violation".into()));
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        let mapped: OrderTrackError = InfraError::from(SqlError::QueryReturnedNoRows).into();
        assert!(matches!(mapped, OrderTrackError::NotFound(_)));
    }

    #[test]
    fn bad_json_maps_to_database_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let mapped: OrderTrackError = InfraError::from(err).into();
        assert!(matches!(mapped, OrderTrackError::Database(_)));
    }
}
