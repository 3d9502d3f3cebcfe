// Central Error Type for data access

use thiserror::Error;

/// Boxed driver-level cause carried by [`DaoError::Execution`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Database operation error
///
/// Closed taxonomy: every failure surfaced by an initializer or a DAO is one
/// of these three kinds. Driver errors are reachable only through
/// [`std::error::Error::source`].
#[derive(Error, Debug)]
pub enum DaoError {
    /// A driver call failed (acquire, execute, query, bind, decode), or a
    /// statement did not have the effect the operation requires.
    #[error("Execution error: {context}")]
    Execution {
        context: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Not found: {entity} with id = {id} does not exist")]
    NotFound { entity: &'static str, id: i64 },

    /// Precondition violated before any I/O was attempted
    #[error("Illegal argument: {0}")]
    IllegalArgument(String),
}

impl DaoError {
    /// Execution failure wrapping a driver cause
    pub fn execution(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        DaoError::Execution {
            context: context.into(),
            source: Some(source.into()),
        }
    }

    /// Execution failure with no underlying driver error (e.g. zero affected rows)
    pub fn execution_msg(context: impl Into<String>) -> Self {
        DaoError::Execution {
            context: context.into(),
            source: None,
        }
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        DaoError::NotFound { entity, id }
    }

    pub fn illegal_argument(message: impl Into<String>) -> Self {
        DaoError::IllegalArgument(message.into())
    }

    pub fn is_execution(&self) -> bool {
        matches!(self, DaoError::Execution { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DaoError::NotFound { .. })
    }

    pub fn is_illegal_argument(&self) -> bool {
        matches!(self, DaoError::IllegalArgument(_))
    }
}

/// Result type alias using DaoError
pub type Result<T> = std::result::Result<T, DaoError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_execution_keeps_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err = DaoError::execution("Can't execute statement: SELECT 1", cause);

        assert!(err.is_execution());
        assert_eq!(
            err.to_string(),
            "Execution error: Can't execute statement: SELECT 1"
        );
        assert_eq!(err.source().unwrap().to_string(), "disk on fire");
    }

    #[test]
    fn test_execution_msg_has_no_cause() {
        let err = DaoError::execution_msg("Error executing update, affected rows: 0");
        assert!(err.is_execution());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_not_found_message() {
        let err = DaoError::not_found("Product", 42);
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Not found: Product with id = 42 does not exist"
        );
    }

    #[test]
    fn test_illegal_argument() {
        let err = DaoError::illegal_argument("Cannot update a product without ID");
        assert!(err.is_illegal_argument());
        assert!(!err.is_execution());
    }
}
