use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "CareSage";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bind address for the HTTP server
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Default base URL of the local vision endpoint used for label OCR
pub const DEFAULT_OCR_URL: &str = "http://localhost:11434";

/// Vision model asked to read medicine labels
pub const OCR_MODEL: &str = "llava";

/// Per-request timeout for the OCR endpoint, seconds
pub const OCR_TIMEOUT_SECS: u64 = 60;

/// Get the application data directory
/// ~/.caresage/ by default, overridable with CARESAGE_DATA_DIR
pub fn app_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CARESAGE_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(".caresage")
}

/// Get the patient records database path
pub fn database_path() -> PathBuf {
    app_data_dir().join("patients.db")
}

/// Get the resources directory (reference tables, model artifacts)
/// ./resources by default, overridable with CARESAGE_RESOURCES_DIR
pub fn resources_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CARESAGE_RESOURCES_DIR") {
        return PathBuf::from(dir);
    }
    PathBuf::from("resources")
}

/// Get the reference tables directory
pub fn reference_dir() -> PathBuf {
    resources_dir().join("reference")
}

/// Get the model artifacts directory
pub fn model_dir() -> PathBuf {
    resources_dir().join("model")
}

/// Get the HTTP bind address, overridable with CARESAGE_BIND_ADDR
pub fn bind_addr() -> String {
    std::env::var("CARESAGE_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

/// Get the OCR endpoint base URL, overridable with CARESAGE_OCR_URL
pub fn ocr_base_url() -> String {
    std::env::var("CARESAGE_OCR_URL").unwrap_or_else(|_| DEFAULT_OCR_URL.to_string())
}

/// Default tracing filter when RUST_LOG is unset
pub fn default_log_filter() -> String {
    "caresage=info".to_string()
}
