use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::result::{Error as DieselError, QueryResult};
use diesel::sqlite::SqliteConnection;
use tracing::warn;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// How many times a write is retried while SQLite reports the database as locked
const MAX_BUSY_RETRIES: u32 = 5;

/// Delay before the first retry; doubled on each further attempt
const BUSY_RETRY_BASE_DELAY: Duration = Duration::from_millis(50);

/// Applies the connection-level pragmas every pooled connection needs
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Creates the connection pool for the given SQLite database URL
///
/// ### Errors
///
/// Returns an error if the pool cannot open its initial connections.
pub fn init_pool(database_url: &str) -> Result<DbPool, r2d2::Error> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)
}

/// Whether an error means another connection is holding the write lock
pub fn is_busy(err: &DieselError) -> bool {
    match err {
        DieselError::DatabaseError(_, info) => {
            let message = info.message();
            message.contains("database is locked") || message.contains("database table is locked")
        }
        _ => false,
    }
}

/// Runs a database operation, retrying with exponential backoff while the database is busy
///
/// Errors other than a locked database are returned straight away.
pub async fn retry_on_busy<T, F>(mut op: F) -> QueryResult<T>
where
    F: FnMut() -> QueryResult<T>,
{
    let mut attempt = 0;
    loop {
        match op() {
            Err(err) if is_busy(&err) && attempt < MAX_BUSY_RETRIES => {
                let delay = BUSY_RETRY_BASE_DELAY * 2u32.pow(attempt);
                attempt += 1;
                warn!(attempt, ?delay, "Database is busy, retrying");
                tokio::time::sleep(delay).await;
            }
            result => return result,
        }
    }
}
