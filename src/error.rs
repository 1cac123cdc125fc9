use thiserror::Error;

#[derive(Error, Debug)]
pub enum CpuGenError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid sampling range: [{min}, {max}]")]
    SamplingRange { min: String, max: String },

    #[error("Config source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl CpuGenError {
    pub fn sampling_range<T: std::fmt::Display>(min: T, max: T) -> Self {
        CpuGenError::SamplingRange {
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CpuGenError>;
