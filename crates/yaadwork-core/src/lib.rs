use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod coordinate;
pub mod job;
pub mod parishes;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use coordinate::{Coordinate, CoordinateError, GeoPoint};
pub use job::{JobCandidate, RankedJob, Salary};
pub use parishes::{load_parishes, parish_of_town, Parish, ParishesFile, PARISH_COUNT};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read parishes file {path}: {source}")]
    ParishesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse parishes file: {0}")]
    ParishesFileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
