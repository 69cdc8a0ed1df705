use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub parishes_path: PathBuf,
    /// Upper bound on a single position acquisition.
    pub geo_request_timeout_secs: u64,
    /// Max age of a reusable platform fix for one-shot requests.
    pub geo_reuse_window_secs: u64,
    /// Shorter reuse window for continuous watches.
    pub geo_watch_reuse_window_secs: u64,
    pub ip_locate_endpoint: String,
    pub ip_locate_timeout_secs: u64,
    pub ip_locate_user_agent: String,
    /// How many recommendations the capped view shows.
    pub recommendation_display_cap: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("parishes_path", &self.parishes_path)
            .field("geo_request_timeout_secs", &self.geo_request_timeout_secs)
            .field("geo_reuse_window_secs", &self.geo_reuse_window_secs)
            .field(
                "geo_watch_reuse_window_secs",
                &self.geo_watch_reuse_window_secs,
            )
            // Locate endpoints can carry provider keys in the query string.
            .field("ip_locate_endpoint", &"[redacted]")
            .field("ip_locate_timeout_secs", &self.ip_locate_timeout_secs)
            .field("ip_locate_user_agent", &self.ip_locate_user_agent)
            .field(
                "recommendation_display_cap",
                &self.recommendation_display_cap,
            )
            .finish()
    }
}
