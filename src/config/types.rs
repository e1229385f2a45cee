// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub routes: RoutesConfig,
    pub cgi: CgiConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (combined, common or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub read_timeout: u64,
    pub write_timeout: u64,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub max_body_size: u64,
}

/// Paths the two handlers are mounted on in serve mode
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RoutesConfig {
    pub greeter_path: String,
    pub deleter_path: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            greeter_path: "/cgi-bin/greet".to_string(),
            deleter_path: "/cgi-bin/delete".to_string(),
        }
    }
}

/// Per-request handler configuration.
///
/// In CGI mode this is built from the process environment on every
/// invocation; in serve mode it comes from the `cgi` config section.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CgiConfig {
    /// Directory the deleter is confined to
    pub upload_dir: PathBuf,
    /// Append-only log of deletion errors
    pub log_file: PathBuf,
    /// Target of the "back to upload" button on deleter pages
    pub upload_page: String,
}

impl Default for CgiConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from(super::DEFAULT_UPLOAD_DIR),
            log_file: PathBuf::from(super::DEFAULT_LOG_FILE),
            upload_page: super::DEFAULT_UPLOAD_PAGE.to_string(),
        }
    }
}
