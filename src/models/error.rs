// Network Preferences - Error Types
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Shared error types for the IP settings panel.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for panel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for panel operations.
#[derive(Debug, Error)]
pub enum Error {
    // ========================================
    // Validation Errors
    // ========================================
    #[error("{field} is invalid")]
    InvalidField { field: String, reason: String },

    // ========================================
    // Storage Errors
    // ========================================
    #[error("Settings directory could not be resolved")]
    DirectoryNotFound,

    #[error("Failed to open {} for writing: {reason}", .path.display())]
    ConfigWriteFailed { path: PathBuf, reason: String },

    #[error("Failed to read configuration: {0}")]
    ConfigReadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParseFailed(String),

    #[error("Failed to serialize configuration: {0}")]
    ConfigSerializeFailed(String),

    // ========================================
    // Network Service Errors
    // ========================================
    #[error("The network service needs to run for the auto configuration!")]
    ServiceUnavailable,

    #[error("Auto-configuring failed: {0}")]
    AutoConfigureFailed(String),

    #[error("D-Bus error: {0}")]
    Dbus(String),

    // ========================================
    // System Errors
    // ========================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new invalid field error from a form label.
    ///
    /// A trailing colon on the label ("IP address:") is dropped.
    pub fn invalid_field(label: &str) -> Self {
        let field = label.strip_suffix(':').unwrap_or(label).trim_end();
        Self::InvalidField {
            field: field.to_string(),
            reason: "invalid format".to_string(),
        }
    }

    /// Create a new write failure for `path`.
    pub fn write_failed(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::ConfigWriteFailed {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    /// Check if this error means the network service could not be reached.
    pub fn is_service_unavailable(&self) -> bool {
        matches!(self, Self::ServiceUnavailable)
    }

    /// Check if this error is a field validation error.
    #[allow(dead_code)]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::InvalidField { .. })
    }
}

// Convert from zbus errors
impl From<zbus::Error> for Error {
    fn from(err: zbus::Error) -> Self {
        Error::Dbus(err.to_string())
    }
}

// Convert from toml parse errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParseFailed(err.to_string())
    }
}

// Convert from toml serialize errors
impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::ConfigSerializeFailed(err.to_string())
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParseFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_field_strips_colon() {
        let err = Error::invalid_field("IP address:");
        assert_eq!(err.to_string(), "IP address is invalid");
        match err {
            Error::InvalidField { field, reason } => {
                assert_eq!(field, "IP address");
                assert_eq!(reason, "invalid format");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_service_errors() {
        assert!(Error::ServiceUnavailable.is_service_unavailable());
        assert!(!Error::AutoConfigureFailed("timeout".into()).is_service_unavailable());
        assert_eq!(
            Error::AutoConfigureFailed("No such device".into()).to_string(),
            "Auto-configuring failed: No such device"
        );
    }
}
