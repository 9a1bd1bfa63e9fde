//! Pattern catalog error types.

/// Errors that can occur while resolving test patterns.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Requested pattern is not part of the catalog
    #[error("Pattern not found: {name}")]
    NotFound { name: String },
}
