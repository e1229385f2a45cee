// Configuration module entry point
// Loads the serve-mode configuration file and the per-request CGI environment

mod types;

use std::env;
use std::net::SocketAddr;

// Re-export public types
pub use types::{CgiConfig, Config};

pub const DEFAULT_UPLOAD_DIR: &str = "./uploads/";
pub const DEFAULT_LOG_FILE: &str = "script.log";
pub const DEFAULT_UPLOAD_PAGE: &str = "upload.py";

/// Environment variables read by the CGI handlers
const CGI_ENV_KEYS: [&str; 3] = ["UPLOAD_DIR", "LOG_FILE", "UPLOAD_PAGE"];
const SERVER_ENV_PREFIX: &str = "SERVER__";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    ///
    /// `UPLOAD_DIR` from the environment takes precedence over `cgi.upload_dir`
    /// so both run modes honour the same variable.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SERVER")
                    .separator("__")
                    .source(Some(env_snapshot(|key| key.starts_with(SERVER_ENV_PREFIX)))),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "cgi-handlers/0.1")?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("routes.greeter_path", "/cgi-bin/greet")?
            .set_default("routes.deleter_path", "/cgi-bin/delete")?
            .set_default("cgi.upload_dir", DEFAULT_UPLOAD_DIR)?
            .set_default("cgi.log_file", DEFAULT_LOG_FILE)?
            .set_default("cgi.upload_page", DEFAULT_UPLOAD_PAGE)?
            .set_override_option("cgi.upload_dir", env::var("UPLOAD_DIR").ok())?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

impl CgiConfig {
    /// Build the handler configuration from the process environment
    /// (`UPLOAD_DIR`, `LOG_FILE`, `UPLOAD_PAGE`), applying defaults for
    /// anything unset.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(Some(env_snapshot(|key| CGI_ENV_KEYS.contains(&key))))
    }

    /// Same as [`CgiConfig::from_env`], reading variables from `source`
    /// instead of the real environment when it is `Some`.
    pub fn from_source(
        source: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("upload_dir", DEFAULT_UPLOAD_DIR)?
            .set_default("log_file", DEFAULT_LOG_FILE)?
            .set_default("upload_page", DEFAULT_UPLOAD_PAGE)?
            .add_source(config::Environment::default().source(source))
            .build()?
            .try_deserialize()
    }
}

/// Copy the environment variables accepted by `keep`
///
/// The web server forwards client headers as `HTTP_*` variables, so any of
/// them may hold bytes that are not UTF-8. Those entries are skipped.
fn env_snapshot(keep: impl Fn(&str) -> bool) -> config::Map<String, String> {
    env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .filter(|(key, _)| keep(key))
        .collect()
}
