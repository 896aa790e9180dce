//! Error types for resloc
//!
//! All modules use `ReslocResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for resloc operations
pub type ReslocResult<T> = Result<T, ReslocError>;

/// All errors that can occur while resolving or hashing resources
#[derive(Error, Debug)]
pub enum ReslocError {
    // Argument errors
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("The resource is not a valid \"{expected}\" type. \"{given}\" given")]
    TypeMismatch {
        expected: &'static str,
        given: &'static str,
    },

    // Identifier errors
    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Malformed identifier {identifier}: {source}")]
    MalformedIdentifier {
        identifier: String,
        #[source]
        source: url::ParseError,
    },

    #[error("File URI does not name a native path: {0}")]
    InvalidFileUri(String),

    // Digest errors
    #[error("Digest algorithm not available: {0}")]
    DigestUnavailable(String),

    // Archive errors
    #[error("Failed to open archive {path}: {source}")]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Archive already closed: {0}")]
    ArchiveClosed(PathBuf),

    #[error("Entry not found in {archive}: {entry}")]
    EntryNotFound { archive: PathBuf, entry: String },

    // Runtime image errors
    #[error("Failed to read runtime image {path}: {reason}")]
    RuntimeImage { path: PathBuf, reason: String },

    #[error("No runtime image available")]
    RuntimeImageNotFound,

    #[error("Resource not found in runtime image: {0}")]
    RuntimeImageEntryNotFound(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl ReslocError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Error raised when an extension query hits a directory
    pub(crate) fn not_a_file() -> Self {
        Self::TypeMismatch {
            expected: "Regular File",
            given: "Directory",
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::RuntimeImageNotFound => {
                Some("Set runtime_image.path in the config file or point JAVA_HOME at a JDK")
            }
            Self::UnsupportedScheme(_) => Some("Supported schemes: file, jar, jrt"),
            Self::DigestUnavailable(_) => Some(
                "Supported algorithms: MD5, SHA-1, SHA-224, SHA-256, SHA-384, SHA-512, SHA-512/224, SHA-512/256",
            ),
            _ => None,
        }
    }
}
