// sqlx::Error -> DaoError translation

use dbkit_core::DaoError;

/// Translate a driver error into `DaoError::Execution`, keeping it as the cause
///
/// The context names the failed operation; a short classification of the
/// driver error is appended when one is known.
pub(crate) fn map_sqlx_error(context: impl Into<String>, err: sqlx::Error) -> DaoError {
    let context = context.into();
    let context = match classify(&err) {
        Some(kind) => format!("{} ({})", context, kind),
        None => context,
    };
    DaoError::execution(context, err)
}

fn classify(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => {
            // SQLite error codes: https://www.sqlite.org/rescode.html
            let code = db_err.code()?;
            let kind = match code.as_ref() {
                "2067" | "1555" => "unique constraint violation",
                "787" => "foreign key constraint violation",
                "1299" => "not null constraint violation",
                "5" => "database locked (SQLITE_BUSY)",
                "13" => "database full",
                // generic SQLITE_ERROR: the driver message already says it all
                "1" => return None,
                other => return Some(format!("database error [{}]", other)),
            };
            Some(kind.to_string())
        }
        sqlx::Error::RowNotFound => Some("row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => Some(format!("column not found: {}", col)),
        sqlx::Error::ColumnDecode { index, .. } => {
            Some(format!("cannot decode column {}", index))
        }
        sqlx::Error::PoolTimedOut => Some("connection pool timed out".to_string()),
        sqlx::Error::PoolClosed => Some("connection pool closed".to_string()),
        _ => None,
    }
}
