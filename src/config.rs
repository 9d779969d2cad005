use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Vetriage";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "vetriage=info"
}

/// Get the application data directory (~/Vetriage/ on all platforms).
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Vetriage")
}

/// Default location of the disease corpus database.
pub fn corpus_db_path() -> PathBuf {
    app_data_dir().join("corpus.db")
}
