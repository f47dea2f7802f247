//! Plugin registration
//!
//! A plugin reference in the configuration is either the name of a plugin
//! registered in a [`PluginCatalog`] or an inline declaration table. Every
//! entry is checked for at least one capability when it is registered; rule
//! sets are never evaluated here, that is the generator's job.

use std::fmt;
use std::sync::Arc;

use breeze_core::error::ConfigError;
use breeze_core::types::{value_kind, Theme};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::ResolverResult;

/// Opaque rule set handed to the generator (selector to declarations)
pub type RuleSet = serde_json::Map<String, Value>;

/// What a plugin can contribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Capabilities {
    /// Contributes theme tokens, merged with the `extend` rule
    pub theme_extension: bool,
    /// Contributes utility rules
    pub rule_set: bool,
}

impl Capabilities {
    pub const NONE: Self = Self { theme_extension: false, rule_set: false };
    pub const THEME: Self = Self { theme_extension: true, rule_set: false };
    pub const RULES: Self = Self { theme_extension: false, rule_set: true };
    pub const ALL: Self = Self { theme_extension: true, rule_set: true };

    pub fn is_empty(&self) -> bool {
        !self.theme_extension && !self.rule_set
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.theme_extension, self.rule_set) {
            (true, true) => write!(f, "theme+rules"),
            (true, false) => write!(f, "theme"),
            (false, true) => write!(f, "rules"),
            (false, false) => write!(f, "none"),
        }
    }
}

/// Registration contract for plugins.
///
/// `contribute_theme` is called by the theme merger with the theme resolved
/// so far and must return a mapping of category to tokens. `contribute_rules`
/// is for the generator.
pub trait Plugin: fmt::Debug + Send + Sync {
    /// Name used in diagnostics and catalog lookups
    fn name(&self) -> &str;

    /// Declared capabilities, checked at registration time
    fn capabilities(&self) -> Capabilities;

    /// Theme extension to merge on top of `theme`
    fn contribute_theme(&self, _theme: &Theme) -> Option<Value> {
        None
    }

    /// Rules for the generator
    fn contribute_rules(&self) -> Option<RuleSet> {
        None
    }
}

/// Plugin declared inline in the configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarativePlugin {
    name: String,
    theme: Option<Value>,
    rules: Option<RuleSet>,
}

impl DeclarativePlugin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            theme: None,
            rules: None,
        }
    }

    /// Declare a theme extension (category to tokens)
    pub fn with_theme(mut self, theme: Value) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Declare a rule set
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Build from an inline `{ name?, theme?, rules? }` table
    fn from_table(table: &serde_json::Map<String, Value>, index: usize) -> ResolverResult<Self> {
        let name = match table.get("name") {
            None => format!("inline#{}", index),
            Some(Value::String(name)) => name.clone(),
            Some(other) => {
                return Err(ConfigError::invalid_plugin(
                    index,
                    format!("'name' must be a string, found {}", value_kind(other)),
                ))
            },
        };

        let rules = match table.get("rules") {
            None => None,
            Some(Value::Object(rules)) => Some(rules.clone()),
            Some(other) => {
                return Err(ConfigError::invalid_plugin(
                    index,
                    format!("'rules' must be a table, found {}", value_kind(other)),
                ))
            },
        };

        let theme = match table.get("theme") {
            None => None,
            Some(theme @ Value::Object(_)) => Some(theme.clone()),
            Some(other) => {
                return Err(ConfigError::invalid_plugin(
                    index,
                    format!("'theme' must be a table, found {}", value_kind(other)),
                ))
            },
        };

        Ok(Self { name, theme, rules })
    }
}

impl Plugin for DeclarativePlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            theme_extension: self.theme.is_some(),
            rule_set: self.rules.is_some(),
        }
    }

    fn contribute_theme(&self, _theme: &Theme) -> Option<Value> {
        self.theme.clone()
    }

    fn contribute_rules(&self) -> Option<RuleSet> {
        self.rules.clone()
    }
}

/// Named plugins available to configuration files
#[derive(Debug, Clone, Default)]
pub struct PluginCatalog {
    plugins: IndexMap<String, Arc<dyn Plugin>>,
}

impl PluginCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin under its own name, replacing any previous one
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) -> &mut Self {
        self.plugins.insert(plugin.name().to_string(), plugin);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Plugin>> {
        self.plugins.get(name)
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

/// How an entry was written in the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginReference {
    /// `"typography"`, looked up in the catalog
    Named(String),
    /// `{ name = ..., theme = ..., rules = ... }`
    Inline,
}

/// A validated plugin with its position in the configuration
#[derive(Debug, Clone)]
pub struct PluginEntry {
    index: usize,
    reference: PluginReference,
    capabilities: Capabilities,
    plugin: Arc<dyn Plugin>,
}

impl PluginEntry {
    /// Position in the `plugins` list; later entries win
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        self.plugin.name()
    }

    pub fn reference(&self) -> &PluginReference {
        &self.reference
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn plugin(&self) -> &Arc<dyn Plugin> {
        &self.plugin
    }
}

/// Ordered, validated plugin list
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    entries: Vec<PluginEntry>,
}

impl PluginRegistry {
    /// Validate every plugin reference, in order
    pub fn register_all(references: &[Value], catalog: &PluginCatalog) -> ResolverResult<Self> {
        let entries = references
            .iter()
            .enumerate()
            .map(|(index, reference)| Self::register_one(index, reference, catalog))
            .collect::<ResolverResult<Vec<_>>>()?;

        debug!(count = entries.len(), "plugins registered");
        Ok(Self { entries })
    }

    fn register_one(index: usize, raw: &Value, catalog: &PluginCatalog) -> ResolverResult<PluginEntry> {
        let (reference, plugin): (PluginReference, Arc<dyn Plugin>) = match raw {
            Value::String(name) => {
                let plugin = catalog.get(name).cloned().ok_or_else(|| {
                    ConfigError::invalid_plugin(index, format!("unknown plugin '{}'", name))
                })?;
                (PluginReference::Named(name.clone()), plugin)
            },
            Value::Object(table) => {
                let plugin = DeclarativePlugin::from_table(table, index)?;
                (PluginReference::Inline, Arc::new(plugin))
            },
            other => {
                return Err(ConfigError::invalid_plugin(
                    index,
                    format!("expected a plugin name or table, found {}", value_kind(other)),
                ))
            },
        };

        let capabilities = plugin.capabilities();
        if capabilities.is_empty() {
            return Err(ConfigError::invalid_plugin(
                index,
                format!(
                    "plugin '{}' provides neither a theme extension nor a rule set",
                    plugin.name()
                ),
            ));
        }

        debug!(index, name = plugin.name(), %capabilities, "registered plugin");
        Ok(PluginEntry {
            index,
            reference,
            capabilities,
            plugin,
        })
    }

    /// Entries in configuration order
    pub fn entries(&self) -> &[PluginEntry] {
        &self.entries
    }

    /// Entries that contribute theme tokens, in configuration order
    pub fn theme_providers(&self) -> impl Iterator<Item = &PluginEntry> {
        self.entries.iter().filter(|entry| entry.capabilities.theme_extension)
    }

    /// Entries that contribute rules, in configuration order
    pub fn rule_providers(&self) -> impl Iterator<Item = &PluginEntry> {
        self.entries.iter().filter(|entry| entry.capabilities.rule_set)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<PluginEntry> {
        self.entries
    }
}
