use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files, which is
/// useful for testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup, no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("YAADWORK_ENV", "development"));
    let log_level = or_default("YAADWORK_LOG_LEVEL", "info");
    let parishes_path = PathBuf::from(or_default(
        "YAADWORK_PARISHES_PATH",
        "./config/parishes.yaml",
    ));

    let geo_request_timeout_secs = parse_u64("YAADWORK_GEO_REQUEST_TIMEOUT_SECS", "10")?;
    let geo_reuse_window_secs = parse_u64("YAADWORK_GEO_REUSE_WINDOW_SECS", "300")?;
    let geo_watch_reuse_window_secs = parse_u64("YAADWORK_GEO_WATCH_REUSE_WINDOW_SECS", "60")?;

    let ip_locate_endpoint = or_default("YAADWORK_IP_LOCATE_ENDPOINT", "http://ip-api.com/json");
    let ip_locate_timeout_secs = parse_u64("YAADWORK_IP_LOCATE_TIMEOUT_SECS", "5")?;
    let ip_locate_user_agent = or_default(
        "YAADWORK_IP_LOCATE_USER_AGENT",
        "yaadwork/0.1 (job-discovery)",
    );

    let recommendation_display_cap = parse_usize("YAADWORK_RECOMMENDATION_DISPLAY_CAP", "6")?;

    Ok(AppConfig {
        env,
        log_level,
        parishes_path,
        geo_request_timeout_secs,
        geo_reuse_window_secs,
        geo_watch_reuse_window_secs,
        ip_locate_endpoint,
        ip_locate_timeout_secs,
        ip_locate_user_agent,
        recommendation_display_cap,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_all_defaults() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(
            cfg.parishes_path.to_string_lossy(),
            "./config/parishes.yaml"
        );
        assert_eq!(cfg.geo_request_timeout_secs, 10);
        assert_eq!(cfg.geo_reuse_window_secs, 300);
        assert_eq!(cfg.geo_watch_reuse_window_secs, 60);
        assert_eq!(cfg.ip_locate_endpoint, "http://ip-api.com/json");
        assert_eq!(cfg.ip_locate_timeout_secs, 5);
        assert_eq!(cfg.ip_locate_user_agent, "yaadwork/0.1 (job-discovery)");
        assert_eq!(cfg.recommendation_display_cap, 6);
    }

    #[test]
    fn build_app_config_geo_timeout_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("YAADWORK_GEO_REQUEST_TIMEOUT_SECS", "20");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.geo_request_timeout_secs, 20);
    }

    #[test]
    fn build_app_config_geo_timeout_invalid() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("YAADWORK_GEO_REQUEST_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "YAADWORK_GEO_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(YAADWORK_GEO_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_display_cap_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("YAADWORK_RECOMMENDATION_DISPLAY_CAP", "12");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.recommendation_display_cap, 12);
    }

    #[test]
    fn build_app_config_display_cap_invalid() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("YAADWORK_RECOMMENDATION_DISPLAY_CAP", "-3");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "YAADWORK_RECOMMENDATION_DISPLAY_CAP"),
            "expected InvalidEnvVar(YAADWORK_RECOMMENDATION_DISPLAY_CAP), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_ip_endpoint_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("YAADWORK_IP_LOCATE_ENDPOINT", "https://locate.internal/json");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.ip_locate_endpoint, "https://locate.internal/json");
    }

    #[test]
    fn debug_redacts_locate_endpoint() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(rendered.contains("[redacted]"));
        assert!(!rendered.contains("ip-api.com"));
    }
}
