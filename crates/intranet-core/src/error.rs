//! Error types for the intranet crates.

use thiserror::Error;

/// A shared error type for every intranet crate.
///
/// Variants are structured so that callers can decide whether a failure is
/// shown to the operator (validation, authorization, import) or only logged.
#[derive(Error, Debug, Clone)]
pub enum IntranetError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Key-value store access error
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", "base64", "zip"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rejected operator input (e.g. empty agent identifier at login)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A privileged action attempted by someone without the privilege
    #[error("Unauthorized: {actor} may not {action}")]
    Unauthorized { actor: String, action: String },

    /// Imported blob could not be understood; existing state is untouched
    #[error("Invalid import: {0}")]
    InvalidImport(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntranetError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Unauthorized error
    pub fn unauthorized(actor: impl Into<String>, action: impl Into<String>) -> Self {
        Self::Unauthorized {
            actor: actor.into(),
            action: action.into(),
        }
    }

    /// Creates an InvalidImport error
    pub fn invalid_import(message: impl Into<String>) -> Self {
        Self::InvalidImport(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is an Unauthorized error
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Check if this is an InvalidImport error
    pub fn is_invalid_import(&self) -> bool {
        matches!(self, Self::InvalidImport(_))
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Message suitable for a blocking notice in the UI.
    ///
    /// Operator-facing failures get a short fixed text; everything else falls
    /// back to the `Display` output.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidImport(_) => {
                "Invalid import: the file is not a valid intranet export.".to_string()
            }
            Self::Unauthorized { action, .. } => {
                format!("Access denied: only the channel commander may {}.", action)
            }
            Self::Validation(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for IntranetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for IntranetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for IntranetError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for IntranetError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<base64::DecodeError> for IntranetError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Serialization {
            format: "base64".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<zip::result::ZipError> for IntranetError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Serialization {
            format: "zip".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from String (for error messages)
impl From<String> for IntranetError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, IntranetError>`.
pub type Result<T> = std::result::Result<T, IntranetError>;
