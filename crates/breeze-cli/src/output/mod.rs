//! Terminal output formatting.
//!
//! Status messages go to stderr so that command results on stdout (JSON,
//! file lists) can be piped without filtering.

pub mod colors;
pub mod errors;

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: colors::ColorSupport,
}

impl OutputHandler {
    /// Create a new output handler
    pub fn new() -> Self {
        Self {
            colors: colors::ColorSupport::detect(),
        }
    }

    /// Output handler that never emits escape codes
    pub fn plain() -> Self {
        Self {
            colors: colors::ColorSupport::disabled(),
        }
    }

    /// Print a command result to stdout, uncolored
    pub fn data(&self, content: &str) {
        println!("{}", content);
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        eprintln!("{}", self.colors.dim(message));
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", self.colors.green("✓"), message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", self.colors.yellow("⚠"), message);
    }

    /// Print a labelled value, e.g. `files: 12`
    pub fn field(&self, label: &str, value: &str) {
        eprintln!("  {} {}", self.colors.bold(&format!("{}:", label)), value);
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}
