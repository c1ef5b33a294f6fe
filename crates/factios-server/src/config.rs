//! Configuration loading and typed config structures for the Factios server.
//!
//! Configuration lives in an optional YAML file (`factios-config.yaml` by
//! default, or the path named by `FACTIOS_CONFIG`). Every field has a
//! default, so a partial file is fine and a missing default file means
//! all defaults; an explicitly named file must exist. A handful of
//! environment variables override the file for container deployments.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Config file read when `FACTIOS_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "factios-config.yaml";

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "FACTIOS_CONFIG";

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held a value of the wrong type.
    #[error("invalid value for {name}: {message}")]
    InvalidEnv {
        /// Name of the offending environment variable.
        name: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level server configuration.
///
/// Mirrors the structure of `factios-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FactiosConfig {
    /// Listen address.
    #[serde(default)]
    pub server: ServerConfig,

    /// Location of the fact documents.
    #[serde(default)]
    pub store: StoreConfig,

    /// Public site settings (fallback language, canonical URL, static files).
    #[serde(default)]
    pub site: SiteConfig,

    /// Search engine sitemap ping settings.
    #[serde(default)]
    pub sitemap: SitemapConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FactiosConfig {
    /// Load configuration the way the binary does, from the process
    /// environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(env_var)
    }

    /// Load configuration using `lookup` for every environment variable.
    ///
    /// A path named by `FACTIOS_CONFIG` must exist. Without it,
    /// [`DEFAULT_CONFIG_PATH`] is read when present and defaults are used
    /// otherwise. Overrides are applied in every case.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if an explicitly named file cannot be
    /// read, plus every error of [`FactiosConfig::from_file_with`].
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(CONFIG_PATH_VAR) {
            return Self::from_file_with(Path::new(&path), lookup);
        }

        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            return Self::from_file_with(default_path, lookup);
        }

        let mut config = Self::default();
        config.apply_overrides_from(lookup)?;
        Ok(config)
    }

    /// Load configuration from a YAML file at the given path.
    ///
    /// Process environment overrides are applied after parsing.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_file_with(path, env_var)
    }

    /// Load configuration from a YAML file, then apply overrides from
    /// `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] if an override does not parse.
    pub fn from_file_with<F>(path: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_overrides_from(lookup)?;
        Ok(config)
    }

    /// Parse configuration from a YAML string, without environment overrides.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Override values from an arbitrary variable lookup.
    ///
    /// Recognised variables:
    /// - `FACTIOS_HOST` overrides `server.host`
    /// - `FACTIOS_PORT` overrides `server.port`
    /// - `FACTIOS_DB_DIR` overrides `store.root`
    /// - `FACTIOS_BASE_URL` overrides `site.base_url`
    /// - `FACTIOS_LOG_LEVEL` overrides `logging.level`
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("FACTIOS_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("FACTIOS_PORT") {
            self.server.port = val.parse().map_err(|e| ConfigError::InvalidEnv {
                name: "FACTIOS_PORT",
                message: format!("{val:?}: {e}"),
            })?;
        }
        if let Some(val) = lookup("FACTIOS_DB_DIR") {
            self.store.root = PathBuf::from(val);
        }
        if let Some(val) = lookup("FACTIOS_BASE_URL") {
            self.site.base_url = val;
        }
        if let Some(val) = lookup("FACTIOS_LOG_LEVEL") {
            self.logging.level = val;
        }
        Ok(())
    }
}

/// Listen address of the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Fact store settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// Root directory holding one subdirectory per language.
    #[serde(default = "default_store_root")]
    pub root: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: default_store_root(),
        }
    }
}

/// Public site settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SiteConfig {
    /// Language used by the page endpoint when the request names none.
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Absolute site URL used for canonical links and the sitemap.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Directory of static files served for unmatched paths.
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    /// Value of the `Server` response header.
    #[serde(default = "default_server_header")]
    pub server_header: String,
}

impl SiteConfig {
    /// The base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            base_url: default_base_url(),
            public_dir: default_public_dir(),
            server_header: default_server_header(),
        }
    }
}

/// Search engine sitemap ping settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SitemapConfig {
    /// Ping endpoints; each receives `?sitemap=<sitemap url>`.
    #[serde(default = "default_ping_endpoints")]
    pub ping_endpoints: Vec<String>,

    /// Per-request timeout for pings, in seconds.
    #[serde(default = "default_ping_timeout_secs")]
    pub ping_timeout_secs: u64,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            ping_endpoints: default_ping_endpoints(),
            ping_timeout_secs: default_ping_timeout_secs(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    ///
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    3000
}

fn default_store_root() -> PathBuf {
    PathBuf::from("./db")
}

fn default_language() -> String {
    "ru".to_owned()
}

fn default_base_url() -> String {
    "https://factios.com".to_owned()
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("./public")
}

fn default_server_header() -> String {
    "factios".to_owned()
}

fn default_ping_endpoints() -> Vec<String> {
    vec![
        "https://www.google.com/webmasters/tools/ping".to_owned(),
        "https://www.bing.com/webmaster/ping.aspx".to_owned(),
    ]
}

const fn default_ping_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = FactiosConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.store.root, PathBuf::from("./db"));
        assert_eq!(config.site.default_language, "ru");
        assert_eq!(config.site.base_url, "https://factios.com");
        assert_eq!(config.site.server_header, "factios");
        assert_eq!(config.sitemap.ping_endpoints.len(), 2);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn empty_yaml_is_all_defaults() {
        let config = FactiosConfig::parse("{}").unwrap();
        assert_eq!(config, FactiosConfig::default());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = r"
server:
  port: 8081
site:
  default_language: en
logging:
  format: json
";
        let config = FactiosConfig::parse(yaml).unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.site.default_language, "en");
        assert_eq!(config.site.base_url, "https://factios.com");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn invalid_yaml_is_rejected() {
        let result = FactiosConfig::parse("server: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = FactiosConfig::default();
        config
            .apply_overrides_from(lookup_from(&[
                ("FACTIOS_HOST", "127.0.0.1"),
                ("FACTIOS_PORT", "9000"),
                ("FACTIOS_DB_DIR", "/srv/facts"),
                ("FACTIOS_BASE_URL", "https://example.org"),
                ("FACTIOS_LOG_LEVEL", "debug"),
            ]))
            .unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.store.root, PathBuf::from("/srv/facts"));
        assert_eq!(config.site.base_url, "https://example.org");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn bad_port_override_is_an_error() {
        let mut config = FactiosConfig::default();
        let err = config
            .apply_overrides_from(lookup_from(&[("FACTIOS_PORT", "http")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv {
                name: "FACTIOS_PORT",
                ..
            }
        ));
    }

    #[test]
    fn base_url_trims_trailing_slash() {
        let site = SiteConfig {
            base_url: "https://factios.com/".to_owned(),
            ..SiteConfig::default()
        };
        assert_eq!(site.base_url(), "https://factios.com");
    }

    #[test]
    fn from_file_reads_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("factios-config.yaml");
        std::fs::write(&path, "store:\n  root: /data/facts\n").unwrap();
        let config = FactiosConfig::from_file_with(&path, lookup_from(&[])).unwrap();
        assert_eq!(config.store.root, PathBuf::from("/data/facts"));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn from_file_applies_overrides_after_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("factios-config.yaml");
        std::fs::write(&path, "store:\n  root: /data/facts\n").unwrap();
        let config =
            FactiosConfig::from_file_with(&path, lookup_from(&[("FACTIOS_DB_DIR", "/override")]))
                .unwrap();
        assert_eq!(config.store.root, PathBuf::from("/override"));
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FactiosConfig::from_file_with(&dir.path().join("nope.yaml"), lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn explicit_config_path_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        std::fs::write(&path, "server:\n  port: 8088\n").unwrap();
        let path = path.to_str().unwrap().to_owned();
        let config =
            FactiosConfig::load_with(lookup_from(&[(CONFIG_PATH_VAR, path.as_str())])).unwrap();
        assert_eq!(config.server.port, 8088);
    }

    #[test]
    fn explicit_config_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");
        let path = path.to_str().unwrap().to_owned();
        let result = FactiosConfig::load_with(lookup_from(&[(CONFIG_PATH_VAR, path.as_str())]));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
