//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default address of the rows service; endpoint segments are joined onto it
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/rows/";

/// Environment variable overriding the configured base address
pub const BASE_URL_ENV: &str = "ROWTREE_BASE_URL";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Indicator hold after a successful request
pub const SUCCESS_HOLD_MS: u64 = 2000;

/// Indicator hold after a successful upload
pub const UPLOAD_HOLD_MS: u64 = 3000;

/// Indicator hold after any failure
pub const ERROR_HOLD_MS: u64 = 3000;

/// Fade-out duration before the indicator is hidden
pub const FADE_MS: u64 = 500;

/// Notice written to the message area after a successful request
pub const SUCCESS_NOTICE: &str = "Request completed successfully";

/// Message used when the service gives no usable error text
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Prompt shown when upload is requested without a file
pub const NO_FILE_PROMPT: &str = "Please select a file first.";

/// Multipart field name expected by the upload endpoint
pub const UPLOAD_FIELD: &str = "file";

/// Log file written next to the working directory
pub const LOG_FILE: &str = "rowtree.log";

/// Directory (under the home directory) holding the config file
pub const CONFIG_DIR: &str = ".rowtree";

/// Config file name
pub const CONFIG_FILE: &str = "config.yaml";

/// Application name
pub const APP_NAME: &str = "Rowtree";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
