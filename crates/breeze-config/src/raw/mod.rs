//! The user-authored configuration object.
//!
//! `theme` and `plugins` are kept as untyped JSON values here: their shape is
//! checked by the theme merger and the plugin registry, which can report the
//! exact category path or list index that is wrong.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw configuration as written in breeze.toml or breeze.config.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawConfig {
    /// Files to scan for class names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentSpec>,

    /// Theme overrides and `extend` section
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Value>,

    /// Plugin references, in precedence order
    #[serde(default)]
    pub plugins: Vec<Value>,
}

/// `content` is either a bare list of globs or a table with a `files` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentSpec {
    /// `content = ["*.html"]`
    Patterns(Vec<String>),
    /// `content = { files = ["*.html"], relative = true }`
    Files {
        files: Vec<String>,
        /// Resolve patterns against the config file's directory
        #[serde(default, skip_serializing_if = "is_false")]
        relative: bool,
    },
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl ContentSpec {
    /// The glob patterns, in declaration order
    pub fn patterns(&self) -> &[String] {
        match self {
            ContentSpec::Patterns(patterns) => patterns,
            ContentSpec::Files { files, .. } => files,
        }
    }

    /// Whether patterns are relative to the config file rather than the working directory
    pub fn is_relative(&self) -> bool {
        matches!(self, ContentSpec::Files { relative: true, .. })
    }
}

impl RawConfig {
    /// Content patterns, empty when `content` is absent
    pub fn content_patterns(&self) -> &[String] {
        self.content.as_ref().map(ContentSpec::patterns).unwrap_or(&[])
    }

    /// Whether content patterns resolve against the config file's directory
    pub fn content_is_relative(&self) -> bool {
        self.content.as_ref().is_some_and(ContentSpec::is_relative)
    }

    /// A starter configuration written by `breeze init`
    pub fn starter() -> Self {
        Self {
            content: Some(ContentSpec::Files {
                files: vec!["*.html".to_string(), "./src/**/*.rs".to_string()],
                relative: false,
            }),
            theme: Some(serde_json::json!({ "extend": {} })),
            plugins: Vec::new(),
        }
    }
}
