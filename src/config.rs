use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "DataBank";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the database location.
pub const DB_PATH_ENV: &str = "DATABANK_DB";

/// Environment variable overriding the SQLite busy timeout, in milliseconds.
pub const BUSY_TIMEOUT_ENV: &str = "DATABANK_BUSY_TIMEOUT_MS";

/// How long a statement waits on a locked database before failing.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Get the application data directory
/// ~/DataBank/ on all platforms, falling back to the working directory
/// when no home directory can be determined.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default database file, used unless `DATABANK_DB` is set.
pub fn default_database_path() -> PathBuf {
    app_data_dir().join("databank.db")
}

/// Database file to use: `DATABANK_DB` when set and non-empty, else the default.
pub fn database_path() -> PathBuf {
    database_path_from(std::env::var(DB_PATH_ENV).ok())
}

fn database_path_from(value: Option<String>) -> PathBuf {
    value
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(default_database_path)
}

/// Busy timeout from `DATABANK_BUSY_TIMEOUT_MS`, ignoring unparseable values.
pub fn busy_timeout() -> Duration {
    busy_timeout_from(std::env::var(BUSY_TIMEOUT_ENV).ok())
}

fn busy_timeout_from(value: Option<String>) -> Duration {
    let millis = value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_BUSY_TIMEOUT_MS);
    Duration::from_millis(millis)
}

/// Tracing filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "databank=info"
}
