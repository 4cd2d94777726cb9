//! Stateless ANSI styling for terminal output.

use colored::{ColoredString, Colorize};

/// Renders emphasis when colour is enabled and plain text otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    use_color: bool,
}

impl Style {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    fn paint(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Tool title.
    pub fn title(&self, text: &str) -> String {
        self.paint(text, |s| s.bold().cyan())
    }

    /// Italic cyan narration.
    pub fn info(&self, text: &str) -> String {
        self.paint(text, |s| s.italic().cyan())
    }

    /// Underlined italic cyan, used for the values inside narration.
    pub fn value(&self, text: &str) -> String {
        self.paint(text, |s| s.italic().cyan().underline())
    }

    pub fn italic(&self, text: &str) -> String {
        self.paint(text, |s| s.italic())
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(text, |s| s.bold().green())
    }

    /// Yellow notes shown before operations with caveats.
    pub fn note(&self, text: &str) -> String {
        format!(
            "{}{}",
            self.paint("Note: ", |s| s.bold().yellow()),
            self.paint(text, |s| s.yellow())
        )
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, |s| s.bold().red())
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::plain()
    }
}
