//! Theme types.
//!
//! A theme maps a token category ("colors", "spacing", ...) to a mapping of
//! token name to value. Token values are kept as JSON values so nested
//! palettes (`colors.red.500`) survive untouched.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BreezeError, BreezeResult, ConfigError};

/// Token name to value mapping for a single category
pub type TokenMap = serde_json::Map<String, Value>;

const BASELINE_THEME: &str = include_str!("default_theme.json");

/// Mapping from token category to its tokens
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme {
    categories: IndexMap<String, TokenMap>,
}

impl Theme {
    /// Create an empty theme
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a theme from a JSON object, checking that every category is a mapping.
    ///
    /// `path` is the dotted prefix used in error messages, e.g. `theme`.
    pub fn from_value(value: &Value, path: &str) -> Result<Self, ConfigError> {
        let object = value
            .as_object()
            .ok_or_else(|| ConfigError::invalid_theme_shape(path, value_kind(value)))?;

        let mut theme = Theme::new();
        for (category, tokens) in object {
            let tokens = tokens.as_object().ok_or_else(|| {
                ConfigError::invalid_theme_shape(format!("{}.{}", path, category), value_kind(tokens))
            })?;
            theme.insert_category(category.clone(), tokens.clone());
        }
        Ok(theme)
    }

    /// Look up a category
    pub fn category(&self, name: &str) -> Option<&TokenMap> {
        self.categories.get(name)
    }

    /// Look up a single token
    pub fn token(&self, category: &str, name: &str) -> Option<&Value> {
        self.categories.get(category).and_then(|tokens| tokens.get(name))
    }

    /// Mutable access to a category, creating it empty if missing
    pub fn category_entry(&mut self, name: &str) -> &mut TokenMap {
        self.categories.entry(name.to_string()).or_default()
    }

    /// Insert or wholesale replace a category
    pub fn insert_category(&mut self, name: String, tokens: TokenMap) -> Option<TokenMap> {
        self.categories.insert(name, tokens)
    }

    /// Iterate categories in insertion order
    pub fn categories(&self) -> impl Iterator<Item = (&String, &TokenMap)> {
        self.categories.iter()
    }

    /// Check whether a category is present
    pub fn contains_category(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the theme has no categories
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of top-level tokens across all categories
    pub fn token_count(&self) -> usize {
        self.categories.values().map(|tokens| tokens.len()).sum()
    }
}

/// Platform-supplied baseline theme.
///
/// Read-only once constructed; the resolver only ever clones from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultTheme {
    theme: Theme,
}

impl DefaultTheme {
    /// Wrap an existing theme as the baseline
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// The baseline shipped with Breeze
    pub fn baseline() -> Self {
        Self::from_embedded(BASELINE_THEME)
    }

    /// Parse an asset compiled into the binary. A broken asset is a build
    /// defect; it is logged and the baseline degrades to an empty theme.
    fn from_embedded(content: &str) -> Self {
        match Self::from_json_str(content, "<builtin>") {
            Ok(theme) => theme,
            Err(e) => {
                tracing::error!(error = %e, "embedded default theme is invalid");
                Self::default()
            },
        }
    }

    /// Parse a baseline from a JSON document
    pub fn from_json_str(content: &str, file: &str) -> BreezeResult<Self> {
        let value: Value = serde_json::from_str(content).map_err(|e| BreezeError::JsonParse {
            file: file.to_string(),
            message: e.to_string(),
        })?;
        let theme = Theme::from_value(&value, "default")?;
        Ok(Self { theme })
    }

    /// Borrow the underlying theme
    pub fn as_theme(&self) -> &Theme {
        &self.theme
    }
}

impl From<Theme> for DefaultTheme {
    fn from(theme: Theme) -> Self {
        Self::new(theme)
    }
}

/// Human-readable name of a JSON value's type, for error messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}
