//! Application-wide error types.
//!
//! This module defines the main error type hierarchy for the crate,
//! allowing for type-safe error handling throughout the codebase.

pub use crate::config::ConfigError;
pub use crate::harness::HarnessError;
pub use crate::pattern::CatalogError;
pub use crate::strategy::UnknownStrategy;

/// Main application error type.
///
/// This is the top-level error type that encompasses all error types
/// in the crate. It uses `thiserror` for automatic error derivation
/// and conversion.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pattern lookup errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Strategy lookup errors
    #[error("Strategy error: {0}")]
    Strategy(#[from] UnknownStrategy),

    /// Measurement harness errors
    #[error("Harness error: {0}")]
    Harness(#[from] HarnessError),

    /// Logger initialization errors
    #[error("Logger error: {0}")]
    Logger(String),
}

/// Convenience type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let config_error = ConfigError::HomeDirectoryNotFound;
        let app_error: AppError = config_error.into();
        assert!(matches!(app_error, AppError::Config(_)));
        assert!(app_error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_app_error_from_catalog_error() {
        let catalog_error = CatalogError::NotFound {
            name: "MISSING".to_string(),
        };
        let app_error: AppError = catalog_error.into();
        assert!(matches!(app_error, AppError::Catalog(_)));
        assert!(app_error.to_string().contains("MISSING"));
    }

    #[test]
    fn test_app_error_from_unknown_strategy() {
        let app_error: AppError = UnknownStrategy {
            name: "velocity".to_string(),
        }
        .into();
        assert!(matches!(app_error, AppError::Strategy(_)));
    }

    #[test]
    fn test_app_error_from_harness_error() {
        let harness_error = HarnessError::Protocol("worker printed nothing".to_string());
        let app_error: AppError = harness_error.into();
        assert!(matches!(app_error, AppError::Harness(_)));
        assert!(app_error.to_string().contains("worker printed nothing"));
    }

    #[test]
    fn test_app_error_logger() {
        let error = AppError::Logger("already set".to_string());
        assert_eq!(error.to_string(), "Logger error: already set");
    }
}
