//! Error types and result aliases for Breeze operations.
//!
//! `ConfigError` covers everything that can go wrong while resolving a
//! configuration; `BreezeError` wraps it together with the loading and I/O
//! failures seen by the config loader and the CLI.

use thiserror::Error;

/// Sub-reason tag carried by every [`ConfigError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigErrorKind {
    /// A content pattern could not be compiled or enumerated
    MalformedPattern,
    /// A theme category was not a mapping
    InvalidThemeShape,
    /// A plugin reference could not be registered
    InvalidPluginEntry,
}

/// Resolution error produced by the scanner, the theme merger or the plugin registry
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Malformed content pattern #{index} '{pattern}': {reason}")]
    MalformedPattern {
        pattern: String,
        index: usize,
        reason: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Invalid theme shape at '{path}': expected a mapping, found {found}")]
    InvalidThemeShape { path: String, found: &'static str },

    #[error("Invalid plugin entry #{index}: {reason}")]
    InvalidPluginEntry { index: usize, reason: String },
}

impl ConfigError {
    /// Create a malformed-pattern error without an underlying cause
    pub fn malformed_pattern(pattern: &str, index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedPattern {
            pattern: pattern.to_string(),
            index,
            reason: reason.into(),
            source: None,
        }
    }

    /// Create a malformed-pattern error caused by a filesystem failure
    pub fn inaccessible_pattern(pattern: &str, index: usize, source: std::io::Error) -> Self {
        Self::MalformedPattern {
            pattern: pattern.to_string(),
            index,
            reason: "filesystem error while enumerating pattern".to_string(),
            source: Some(source),
        }
    }

    /// Create an invalid-shape error for the given dotted path
    pub fn invalid_theme_shape(path: impl Into<String>, found: &'static str) -> Self {
        Self::InvalidThemeShape {
            path: path.into(),
            found,
        }
    }

    /// Create an invalid plugin entry error
    pub fn invalid_plugin(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidPluginEntry {
            index,
            reason: reason.into(),
        }
    }

    /// The sub-reason tag of this error
    pub fn kind(&self) -> ConfigErrorKind {
        match self {
            ConfigError::MalformedPattern { .. } => ConfigErrorKind::MalformedPattern,
            ConfigError::InvalidThemeShape { .. } => ConfigErrorKind::InvalidThemeShape,
            ConfigError::InvalidPluginEntry { .. } => ConfigErrorKind::InvalidPluginEntry,
        }
    }
}

/// Unified error type for all Breeze operations
#[derive(Error, Debug)]
pub enum BreezeError {
    #[error("Failed to parse {file}: {message} at line {line}, column {column}")]
    TomlParse {
        file: String,
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Failed to parse {file}: {message}")]
    JsonParse { file: String, message: String },

    #[error("No breeze.toml or breeze.config.json found in {dir} or any parent directory")]
    ConfigNotFound { dir: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for Breeze operations
pub type BreezeResult<T> = Result<T, BreezeError>;

impl BreezeError {
    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            BreezeError::ConfigNotFound { .. } => {
                Some("Run 'breeze init' to create a breeze.toml, or pass --config")
            },
            BreezeError::TomlParse { .. } | BreezeError::JsonParse { .. } => {
                Some("Fix the syntax error at the reported location")
            },
            BreezeError::Config(err) => match err.kind() {
                ConfigErrorKind::MalformedPattern => {
                    Some("Check the pattern for unbalanced brackets or invalid wildcards such as '***'")
                },
                ConfigErrorKind::InvalidThemeShape => {
                    Some("Theme categories must be tables of token name to value")
                },
                ConfigErrorKind::InvalidPluginEntry => {
                    Some("Plugins must be a known plugin name or a table with a 'theme' or 'rules' key")
                },
            },
            _ => None,
        }
    }
}
