//! Error types for the fast launcher.

use thiserror::Error;

/// A shared error type for every launch step.
///
/// Each variant maps to one failure class a launch can end with, so the host
/// can tell a missing shortcut from a refused launch or a stale session.
#[derive(Error, Debug, Clone)]
pub enum LaunchError {
    /// Entity not found error with type information
    #[error("{entity_type} not found: '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The launch API refused the request. Carries the remote message verbatim.
    #[error("{0}")]
    Authorization(String),

    /// The title needs administrator privileges and the process has none.
    #[error("{0}")]
    AdminRequired(String),

    /// The stored account session has no login cookie, raised before the
    /// vendor client runs.
    #[error("{0}")]
    SessionExport(String),

    /// The vendor client left no login cookie behind after it exited.
    #[error("{0}")]
    SessionImport(String),

    /// HTTP transport or status error
    #[error("HTTP error: {0}")]
    Http(String),

    /// Child process could not be spawned or read
    #[error("Process error: {0}")]
    Process(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LaunchError {
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

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Http error
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http(message.into())
    }

    /// Creates a Process error
    pub fn process(message: impl Into<String>) -> Self {
        Self::Process(message.into())
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

    /// Check if the launch API refused the request
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Authorization(_))
    }

    /// Check if this is an administrator privilege error
    pub fn is_admin_required(&self) -> bool {
        matches!(self, Self::AdminRequired(_))
    }

    /// Check if the session was rejected before the vendor client ran
    pub fn is_session_export(&self) -> bool {
        matches!(self, Self::SessionExport(_))
    }

    /// Check if the session was rejected after the vendor client ran
    pub fn is_session_import(&self) -> bool {
        matches!(self, Self::SessionImport(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for LaunchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for LaunchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for LaunchError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for LaunchError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for LaunchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Http(format!("{} ({})", err, status)),
            None => Self::Http(err.to_string()),
        }
    }
}

/// A type alias for `Result<T, LaunchError>`.
pub type Result<T> = std::result::Result<T, LaunchError>;
