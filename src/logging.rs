use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name prefix of the rolling log files
const LOG_FILE_PREFIX: &str = "lostfound.log";

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "lostfound=debug,tower_http=debug,info"
    } else {
        "lostfound=info,tower_http=info,warn"
    }
}

/// Installs the global tracing subscriber
///
/// Logs always go to stdout in a compact format. When `log_dir` is given,
/// they are also written as JSON to a daily-rolling file in that directory.
/// The returned guard flushes the file writer on drop and must be kept alive
/// for the lifetime of the program.
pub fn init_tracing(debug: bool, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    let console = fmt::layer().with_target(debug).compact();

    let (file_layer, guard) = match log_dir.map(|dir| (dir, std::fs::create_dir_all(dir))) {
        Some((dir, Ok(()))) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(writer);
            (Some(layer), Some(guard))
        }
        Some((dir, Err(e))) => {
            eprintln!("Could not create log directory {}: {}", dir.display(), e);
            (None, None)
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    guard
}
