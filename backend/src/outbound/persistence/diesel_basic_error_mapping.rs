//! Shared Diesel error mapping for the persistence adapters.
//!
//! Every repository maps failures into the same three buckets: the store was
//! unreachable, a uniqueness constraint rejected the write, or the query
//! failed for any other reason. Each adapter supplies constructors for its
//! own port error type.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

fn log_diesel_error(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => debug!(
            ?kind,
            message = info.message(),
            constraint = info.constraint_name(),
            "diesel operation failed"
        ),
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }
}

/// Map common Diesel error variants into query/connection constructors.
///
/// Unique violations are treated as query failures; use
/// [`map_diesel_error_with_duplicate`] where a duplicate has meaning.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    log_diesel_error(&error);

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            query("check constraint violated")
        }
        DieselError::DatabaseError(_, _) => query("database error"),
        _ => query("database error"),
    }
}

/// Like [`map_basic_diesel_error`], but routes unique violations to
/// `duplicate` with the violated constraint name.
pub fn map_diesel_error_with_duplicate<E, Q, C, D>(
    error: DieselError,
    query: Q,
    connection: C,
    duplicate: D,
) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
    D: FnOnce(String) -> E,
{
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        log_diesel_error(&error);
        let constraint = info
            .constraint_name()
            .unwrap_or("unique constraint")
            .to_owned();
        return duplicate(constraint);
    }
    map_basic_diesel_error(error, query, connection)
}

#[cfg(test)]
mod tests {
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(&'static str),
        Duplicate(String),
    }

    struct Info {
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "violation"
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info { constraint }))
    }

    fn map(error: DieselError) -> Mapped {
        map_diesel_error_with_duplicate(error, Mapped::Query, Mapped::Connection, Mapped::Duplicate)
    }

    #[rstest]
    fn unique_violation_names_constraint() {
        let mapped = map(database_error(
            DatabaseErrorKind::UniqueViolation,
            Some("applications_user_job_key"),
        ));
        assert_eq!(
            mapped,
            Mapped::Duplicate("applications_user_job_key".to_owned())
        );
    }

    #[rstest]
    fn closed_connection_is_connection_error() {
        let mapped = map(database_error(DatabaseErrorKind::ClosedConnection, None));
        assert_eq!(mapped, Mapped::Connection("database connection error"));
    }

    #[rstest]
    #[case(DieselError::NotFound, Mapped::Query("record not found"))]
    #[case(
        database_error(DatabaseErrorKind::CheckViolation, Some("jobs_vacancies_non_negative")),
        Mapped::Query("check constraint violated")
    )]
    #[case(
        database_error(DatabaseErrorKind::ForeignKeyViolation, None),
        Mapped::Query("database error")
    )]
    fn other_failures_are_query_errors(#[case] error: DieselError, #[case] expected: Mapped) {
        assert_eq!(map(error), expected);
    }

    #[rstest]
    fn basic_mapping_does_not_special_case_duplicates() {
        let mapped: Mapped = map_basic_diesel_error(
            database_error(DatabaseErrorKind::UniqueViolation, None),
            Mapped::Query,
            Mapped::Connection,
        );
        assert_eq!(mapped, Mapped::Query("database error"));
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let mapped = map_basic_pool_error(PoolError::checkout("timed out"), |message| message);
        assert_eq!(mapped, "timed out");
    }
}
