use thiserror::Error;

/// Validation errors in configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validate(#[from] validator::ValidationErrors),
}
