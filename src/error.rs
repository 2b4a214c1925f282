use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("scenario {0} does not exist (valid indices are 0..=9)")]
    UnknownScenario(usize),

    #[error("timestep must be positive and finite, got {0}")]
    InvalidTimestep(f64),

    #[error("lander position is at the planet centre")]
    DegeneratePosition,

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
