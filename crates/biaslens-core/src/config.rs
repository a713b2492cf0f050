use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation live here, decoupled from the process environment,
/// so tests can drive it with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("BIASLENS_ENV", "development"))?;

    let bind_addr: SocketAddr = parse_as(
        "BIASLENS_BIND_ADDR",
        &or_default("BIASLENS_BIND_ADDR", "0.0.0.0:3000"),
    )?;
    let log_level = or_default("BIASLENS_LOG_LEVEL", "info");
    let site_path = PathBuf::from(or_default("BIASLENS_SITE_PATH", "./config/site.yaml"));

    let db_max_connections: u32 = parse_as(
        "BIASLENS_DB_MAX_CONNECTIONS",
        &or_default("BIASLENS_DB_MAX_CONNECTIONS", "10"),
    )?;
    let db_min_connections: u32 = parse_as(
        "BIASLENS_DB_MIN_CONNECTIONS",
        &or_default("BIASLENS_DB_MIN_CONNECTIONS", "1"),
    )?;
    let db_acquire_timeout_secs: u64 = parse_as(
        "BIASLENS_DB_ACQUIRE_TIMEOUT_SECS",
        &or_default("BIASLENS_DB_ACQUIRE_TIMEOUT_SECS", "10"),
    )?;

    if db_min_connections > db_max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "BIASLENS_DB_MIN_CONNECTIONS".to_string(),
            reason: format!(
                "min connections ({db_min_connections}) exceeds max connections ({db_max_connections})"
            ),
        });
    }

    let rate_limit_per_minute: usize = parse_as(
        "BIASLENS_RATE_LIMIT_PER_MINUTE",
        &or_default("BIASLENS_RATE_LIMIT_PER_MINUTE", "120"),
    )?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        site_path,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        rate_limit_per_minute,
    })
}

fn parse_as<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BIASLENS_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}
