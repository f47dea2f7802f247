//! Path utilities for content scanning.
//!
//! Provides lexical path normalization and helpers to split a glob pattern
//! into the literal directory it starts from and the wildcard remainder.

use std::path::{Component, Path, PathBuf};

/// Characters that make a path component a glob rather than a literal
const GLOB_META: &[char] = &['*', '?', '['];

/// Normalize a path by resolving . and .. components lexically
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {
                // Skip current directory
            },
            Component::ParentDir => match components.last().copied() {
                Some(Component::Normal(_)) => {
                    components.pop();
                },
                // `/..` is still `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {},
                _ => components.push(component),
            },
            other => {
                components.push(other);
            },
        }
    }

    components.iter().collect()
}

/// Check whether a string contains glob metacharacters
pub fn has_glob_meta(text: &str) -> bool {
    text.contains(GLOB_META)
}

/// The longest leading run of components that contain no glob metacharacters.
///
/// `/proj/src/**/*.rs` gives `/proj/src`; a fully literal path is returned as is.
pub fn glob_base(pattern: &Path) -> PathBuf {
    let mut base = PathBuf::new();
    for component in pattern.components() {
        if has_glob_meta(&component.as_os_str().to_string_lossy()) {
            break;
        }
        base.push(component);
    }
    base
}

/// Strip leading `./` segments from a user-written pattern
pub fn strip_current_dir(pattern: &str) -> &str {
    let mut rest = pattern;
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped.trim_start_matches('/');
    }
    rest
}

/// Display `path` relative to `root` when it lives underneath it
pub fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
