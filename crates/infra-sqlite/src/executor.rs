// Scoped SQL Execution Helper
//
// All database access in this crate goes through `with_connection`: one
// connection per call, released when the call ends, whatever the outcome.

use crate::connection::ConnectionSource;
use crate::error::map_sqlx_error;
use dbkit_core::error::Result;
use futures::future::BoxFuture;
use sqlx::sqlite::{SqliteQueryResult, SqliteRow};
use sqlx::{Executor, SqliteConnection};
use tracing::{debug, warn};

/// Longest SQL prefix echoed into log lines and error messages
const SQL_PREVIEW_LEN: usize = 120;

/// Run one unit of work on a freshly acquired connection
///
/// The connection is handed to `unit_of_work` by mutable reference and goes
/// back to the source as soon as the unit of work finishes, on success and on
/// error alike. Acquisition failure is reported as `DaoError::Execution`.
///
/// The unit of work must own whatever it captures (clone entities in before
/// moving them into the closure).
pub async fn with_connection<T, F>(source: &dyn ConnectionSource, unit_of_work: F) -> Result<T>
where
    T: Send,
    F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T>> + Send,
{
    let mut conn = source.connection().await.map_err(|e| {
        warn!(error = %e, "Failed to acquire connection");
        map_sqlx_error("Can't retrieve connection", e)
    })?;
    debug!("Connection acquired");

    let outcome = unit_of_work(&mut *conn).await;

    drop(conn);
    debug!(success = outcome.is_ok(), "Connection released");

    outcome
}

/// Execute unprepared SQL (one or more statements)
///
/// Returns the driver's execution result for the whole batch.
pub async fn execute_safely(conn: &mut SqliteConnection, sql: &str) -> Result<SqliteQueryResult> {
    debug!(sql = %preview(sql), "Executing statement");

    conn.execute(sqlx::raw_sql(sql)).await.map_err(|e| {
        warn!(sql = %preview(sql), error = %e, "Statement failed");
        map_sqlx_error(format!("Can't execute statement: {}", preview(sql)), e)
    })
}

/// Execute an unprepared query and collect every row it yields
pub async fn execute_query_safely(conn: &mut SqliteConnection, sql: &str) -> Result<Vec<SqliteRow>> {
    debug!(sql = %preview(sql), "Executing query");

    conn.fetch_all(sqlx::raw_sql(sql)).await.map_err(|e| {
        warn!(sql = %preview(sql), error = %e, "Query failed");
        map_sqlx_error(format!("Can't execute query: {}", preview(sql)), e)
    })
}

/// Single-line, length-capped rendering of a SQL text
fn preview(sql: &str) -> String {
    let flat = sql.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= SQL_PREVIEW_LEN {
        flat
    } else {
        let cut: String = flat.chars().take(SQL_PREVIEW_LEN).collect();
        format!("{}...", cut)
    }
}
