use thiserror::Error;

#[derive(Error, Debug)]
pub enum TribuneError {
    #[error("Invalid dimension for {name}: {value} (must be finite and > 0)")]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("Invalid row width at index {index}: {value} (must be finite and > 0)")]
    InvalidRowWidth { index: usize, value: f64 },

    #[error("Invalid limit distance for {name}: {value} (must be finite)")]
    InvalidLimit { name: &'static str, value: f64 },

    #[error("Boundary curve '{name}' is not closed")]
    OpenBoundary { name: String },

    #[error("Curve '{name}' needs at least {minimum} points, got {count}")]
    InsufficientPoints {
        name: String,
        count: usize,
        minimum: usize,
    },

    #[error("Unsupported schema version: {0}")]
    UnsupportedSchema(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TribuneError>;

/// Reject NaN, infinities and non-positive values for a named dimension.
pub(crate) fn positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(TribuneError::InvalidDimension { name, value })
    }
}
