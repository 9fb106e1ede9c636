//! Error types for pisim.
//!
//! All fallible operations return `Result<T, SimError>` instead of panicking.
//! Argument errors are raised before any sampling happens; collaborator errors
//! (rendering, plotting, export) never invalidate an already computed run.

use thiserror::Error;

/// Result type alias for pisim operations.
pub type SimResult<T> = Result<T, SimError>;

/// Unified error type for all pisim operations.
#[derive(Debug, Error)]
pub enum SimError {
    // ===== Argument Errors =====
    /// An argument was rejected at the call boundary.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ===== Collaborator Errors =====
    /// The drawing surface could not render or persist the scene.
    #[error("Render error: {0}")]
    Render(String),

    /// A chart could not be drawn or saved.
    #[error("Plot error: {0}")]
    Plot(String),
}

impl SimError {
    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create a render error.
    #[must_use]
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }

    /// Create a plot error.
    #[must_use]
    pub fn plot(message: impl Into<String>) -> Self {
        Self::Plot(message.into())
    }

    /// Create an I/O error with a message (wraps in `std::io::Error`).
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(std::io::Error::other(message.into()))
    }

    /// Whether the error came from an output collaborator rather than from
    /// the estimator's inputs.
    #[must_use]
    pub const fn is_output_failure(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::Serialization(_) | Self::Render(_) | Self::Plot(_)
        )
    }
}
