//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `ORDERTRACK_DB_PATH` is not set, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//! 5. With no file anywhere, built-in defaults are used
//!
//! ## Environment Variables
//! - `ORDERTRACK_DB_PATH`: Database file path (required for env loading)
//! - `ORDERTRACK_DB_POOL_SIZE`: Connection pool size
//! - `ORDERTRACK_BIND_ADDRESS`: HTTP listen address
//! - `ORDERTRACK_STORE_BACKEND`: `sqlite` or `memory`
//! - `ORDERTRACK_RECONCILE_CONCURRENCY`: Detail lookups in flight per search
//! - `ORDERTRACK_LOG_LEVEL`: Default log filter
//! - `ORDERTRACK_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./ordertrack.json` or `./ordertrack.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ordertrack_domain::{
    Config, DatabaseConfig, LoggingConfig, OrderTrackError, ReconcileConfig, Result,
    ServerConfig, StoreBackend, StoreConfig,
};

const DB_PATH_VAR: &str = "ORDERTRACK_DB_PATH";

const CANDIDATE_NAMES: [&str; 4] =
    ["config.json", "config.toml", "ordertrack.json", "ordertrack.toml"];

/// Load configuration with automatic fallback strategy
///
/// Environment variables win whenever `ORDERTRACK_DB_PATH` is set; files are
/// only consulted without it.
///
/// # Errors
/// Returns `OrderTrackError::Config` if an environment value or a found
/// config file is invalid.
pub fn load() -> Result<Config> {
    if std::env::var_os(DB_PATH_VAR).is_some() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }
    tracing::debug!("{DB_PATH_VAR} not set, trying file");

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::warn!("No config file found; using built-in defaults");
            Ok(Config::default())
        }
    }
}

/// Load configuration from environment variables
///
/// Only `ORDERTRACK_DB_PATH` is required; every other variable falls back to
/// its default.
///
/// # Errors
/// Returns `OrderTrackError::Config` if the path is missing or a value does
/// not parse.
pub fn load_from_env() -> Result<Config> {
    let defaults = Config::default();

    let path = env_var(DB_PATH_VAR)?;
    let pool_size = env_parse("ORDERTRACK_DB_POOL_SIZE", defaults.database.pool_size)?;
    let bind_address =
        std::env::var("ORDERTRACK_BIND_ADDRESS").unwrap_or(defaults.server.bind_address);
    let backend = env_parse::<StoreBackend>("ORDERTRACK_STORE_BACKEND", defaults.store.backend)?;
    let concurrency =
        env_parse("ORDERTRACK_RECONCILE_CONCURRENCY", defaults.reconcile.concurrency)?;
    let level = std::env::var("ORDERTRACK_LOG_LEVEL").unwrap_or(defaults.logging.level);
    let json = env_bool("ORDERTRACK_LOG_JSON", defaults.logging.json);

    Ok(Config {
        database: DatabaseConfig { path, pool_size },
        server: ServerConfig { bind_address },
        store: StoreConfig { backend },
        reconcile: ReconcileConfig { concurrency },
        logging: LoggingConfig { level, json },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `OrderTrackError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(OrderTrackError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            OrderTrackError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| OrderTrackError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| OrderTrackError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| OrderTrackError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(OrderTrackError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its parent, and the directory of
/// the running executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd.clone());
        roots.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| CANDIDATE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `OrderTrackError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        OrderTrackError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Parse an optional environment variable, using `default` when unset.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| OrderTrackError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::TempDir;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: [&str; 7] = [
        "ORDERTRACK_DB_PATH",
        "ORDERTRACK_DB_POOL_SIZE",
        "ORDERTRACK_BIND_ADDRESS",
        "ORDERTRACK_STORE_BACKEND",
        "ORDERTRACK_RECONCILE_CONCURRENCY",
        "ORDERTRACK_LOG_LEVEL",
        "ORDERTRACK_LOG_JSON",
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    fn write_config(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("ORDERTRACK_TEST_BOOL_ON", "ON");
        std::env::set_var("ORDERTRACK_TEST_BOOL_OFF", "no");

        assert!(env_bool("ORDERTRACK_TEST_BOOL_ON", false));
        assert!(!env_bool("ORDERTRACK_TEST_BOOL_OFF", true));
        assert!(env_bool("ORDERTRACK_TEST_BOOL_MISSING", true));

        std::env::remove_var("ORDERTRACK_TEST_BOOL_ON");
        std::env::remove_var("ORDERTRACK_TEST_BOOL_OFF");
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("ORDERTRACK_DB_PATH", "/tmp/orders.db");
        std::env::set_var("ORDERTRACK_DB_POOL_SIZE", "8");
        std::env::set_var("ORDERTRACK_BIND_ADDRESS", "0.0.0.0:8080");
        std::env::set_var("ORDERTRACK_STORE_BACKEND", "Memory");
        std::env::set_var("ORDERTRACK_RECONCILE_CONCURRENCY", "4");
        std::env::set_var("ORDERTRACK_LOG_LEVEL", "debug");
        std::env::set_var("ORDERTRACK_LOG_JSON", "true");

        let config = load_from_env().expect("config loads from env");

        assert_eq!(config.database.path, "/tmp/orders.db");
        assert_eq!(config.database.pool_size, 8);
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.reconcile.concurrency, 4);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);

        clear_env();
    }

    #[test]
    fn test_load_from_env_uses_defaults_for_optional_vars() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("ORDERTRACK_DB_PATH", "/tmp/orders.db");

        let config = load_from_env().expect("config loads from env");
        assert_eq!(config.database.pool_size, 4);
        assert_eq!(config.store.backend, StoreBackend::Sqlite);
        assert_eq!(config.reconcile.concurrency, 1);

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_path() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, OrderTrackError::Config(_)), "Should be a Config error");
    }

    #[test]
    fn test_load_from_env_invalid_values() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("ORDERTRACK_DB_PATH", "/tmp/orders.db");
        std::env::set_var("ORDERTRACK_DB_POOL_SIZE", "not-a-number");
        assert!(matches!(load_from_env(), Err(OrderTrackError::Config(_))));

        std::env::remove_var("ORDERTRACK_DB_POOL_SIZE");
        std::env::set_var("ORDERTRACK_STORE_BACKEND", "postgres");
        assert!(matches!(load_from_env(), Err(OrderTrackError::Config(_))));

        clear_env();
    }

    #[test]
    fn test_load_reports_invalid_env_value_when_path_is_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("ORDERTRACK_DB_PATH", "/tmp/orders.db");
        std::env::set_var("ORDERTRACK_STORE_BACKEND", "memroy");

        let err = load().unwrap_err();
        assert!(
            matches!(err, OrderTrackError::Config(ref msg) if msg.contains("ORDERTRACK_STORE_BACKEND")),
            "invalid backend must not fall back to defaults"
        );

        clear_env();
    }

    #[test]
    fn test_load_prefers_env_when_path_is_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("ORDERTRACK_DB_PATH", "/tmp/orders.db");
        std::env::set_var("ORDERTRACK_STORE_BACKEND", "memory");

        let config = load().expect("config loads from env");
        assert_eq!(config.database.path, "/tmp/orders.db");
        assert_eq!(config.store.backend, StoreBackend::Memory);

        clear_env();
    }

    #[test]
    fn test_load_from_file_json() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "ordertrack.json",
            r#"{
                "database": { "path": "orders.db", "pool_size": 2 },
                "reconcile": { "concurrency": 3 }
            }"#,
        );

        let config = load_from_file(Some(path)).expect("config loads from JSON");

        assert_eq!(config.database.path, "orders.db");
        assert_eq!(config.database.pool_size, 2);
        assert_eq!(config.reconcile.concurrency, 3);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_load_from_file_toml() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "config.toml",
            r#"
[store]
backend = "memory"

[logging]
level = "warn"
json = true
"#,
        );

        let config = load_from_file(Some(path)).expect("config loads from TOML");

        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.json);
        assert_eq!(config.database, DatabaseConfig::default());
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result, Err(OrderTrackError::Config(_))));
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "config.json", r#"{ "this is": "not valid json" "#);

        assert!(load_from_file(Some(path)).is_err(), "Should fail with invalid JSON");
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", &PathBuf::from("test.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}
