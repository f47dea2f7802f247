//! Theme merging
//!
//! The resolved theme is built in a fixed pipeline:
//!
//! 1. start from the platform default theme
//! 2. categories named directly under `theme` replace the default category
//! 3. categories under `theme.extend` are deep-merged into the result
//! 4. theme-extension plugins are deep-merged in configuration order
//!
//! Every category update is a [`ThemeStep`] carrying an explicit
//! [`ThemeOp::Replace`] or [`ThemeOp::Extend`], so the order of application is
//! visible and testable rather than implied by object spreading.

use breeze_core::error::ConfigError;
use breeze_core::types::{value_kind, DefaultTheme, Theme, TokenMap};
use serde_json::Value;
use tracing::{debug, trace};

use crate::plugin::PluginEntry;
use crate::ResolverResult;

/// The merged theme handed to the generator
pub type ResolvedTheme = Theme;

/// Key under `theme` holding additive extensions
const EXTEND_KEY: &str = "extend";

/// How a category is combined with what came before it
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeOp {
    /// Discard the existing category entirely
    Replace(TokenMap),
    /// Deep-merge into the existing category, later values winning
    Extend(TokenMap),
}

/// One category update, with the dotted path it came from
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeStep {
    pub category: String,
    pub op: ThemeOp,
    pub origin: String,
}

impl ThemeStep {
    /// Apply this step to `theme`
    pub fn apply(self, theme: &mut Theme) {
        trace!(category = %self.category, origin = %self.origin, "applying theme step");
        match self.op {
            ThemeOp::Replace(tokens) => {
                theme.insert_category(self.category, tokens);
            },
            ThemeOp::Extend(tokens) => {
                deep_merge_tokens(theme.category_entry(&self.category), tokens);
            },
        }
    }
}

/// Merges a raw `theme` section and plugin contributions onto the default theme
#[derive(Debug, Clone, Copy)]
pub struct ThemeMerger<'a> {
    default_theme: &'a DefaultTheme,
}

impl<'a> ThemeMerger<'a> {
    pub fn new(default_theme: &'a DefaultTheme) -> Self {
        Self { default_theme }
    }

    /// Produce the resolved theme
    pub fn merge(&self, raw_theme: Option<&Value>, plugins: &[PluginEntry]) -> ResolverResult<ResolvedTheme> {
        let mut theme = self.default_theme.as_theme().clone();

        let steps = Self::plan(raw_theme)?;
        debug!(steps = steps.len(), "applying configured theme");
        for step in steps {
            step.apply(&mut theme);
        }

        for entry in plugins.iter().filter(|entry| entry.capabilities().theme_extension) {
            let Some(contribution) = entry.plugin().contribute_theme(&theme) else {
                continue;
            };
            let origin = format!("plugins[{}].theme", entry.index());
            let steps = extension_steps(&contribution, &origin)?;
            debug!(plugin = entry.name(), steps = steps.len(), "applying plugin theme");
            for step in steps {
                step.apply(&mut theme);
            }
        }

        Ok(theme)
    }

    /// Translate a raw `theme` section into ordered steps: every direct
    /// override first, then every extension
    pub fn plan(raw_theme: Option<&Value>) -> ResolverResult<Vec<ThemeStep>> {
        let Some(raw_theme) = raw_theme else {
            return Ok(Vec::new());
        };
        let table = raw_theme
            .as_object()
            .ok_or_else(|| ConfigError::invalid_theme_shape("theme", value_kind(raw_theme)))?;

        let mut steps = Vec::with_capacity(table.len());
        for (category, tokens) in table.iter().filter(|(key, _)| key.as_str() != EXTEND_KEY) {
            let origin = format!("theme.{}", category);
            steps.push(ThemeStep {
                category: category.clone(),
                op: ThemeOp::Replace(expect_mapping(tokens, &origin)?),
                origin,
            });
        }

        if let Some(extend) = table.get(EXTEND_KEY) {
            steps.extend(extension_steps(extend, "theme.extend")?);
        }

        Ok(steps)
    }
}

/// Extend steps for a `{ category: tokens }` mapping found at `origin`
fn extension_steps(value: &Value, origin: &str) -> ResolverResult<Vec<ThemeStep>> {
    let table = value
        .as_object()
        .ok_or_else(|| ConfigError::invalid_theme_shape(origin, value_kind(value)))?;

    table
        .iter()
        .map(|(category, tokens)| {
            let origin = format!("{}.{}", origin, category);
            Ok(ThemeStep {
                category: category.clone(),
                op: ThemeOp::Extend(expect_mapping(tokens, &origin)?),
                origin,
            })
        })
        .collect()
}

fn expect_mapping(value: &Value, path: &str) -> ResolverResult<TokenMap> {
    value
        .as_object()
        .cloned()
        .ok_or_else(|| ConfigError::invalid_theme_shape(path, value_kind(value)))
}

/// Deep merge `overlay` into `base`.
///
/// Nested mappings merge by key; scalars and arrays in `overlay` replace
/// whatever was there. Keys only present in `base` are kept.
pub fn deep_merge_tokens(base: &mut TokenMap, overlay: TokenMap) {
    for (key, overlay_value) in overlay {
        match base.get_mut(&key) {
            Some(base_value) => deep_merge_value(base_value, overlay_value),
            None => {
                base.insert(key, overlay_value);
            },
        }
    }
}

fn deep_merge_value(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            deep_merge_tokens(base_map, overlay_map);
        },
        (base, overlay) => {
            *base = overlay;
        },
    }
}
