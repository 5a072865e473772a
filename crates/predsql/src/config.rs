//! Output formatting configuration.

use serde::Deserialize;

/// Placeholder style written into the generated SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    /// `?` for every parameter (MySQL / SQLite / Manticore style).
    #[default]
    Question,
    /// `$1`, `$2`, ... numbered by position (PostgreSQL style).
    Dollar,
}

impl Placeholder {
    /// Render the placeholder for the 1-based parameter `index`.
    pub fn render(self, index: usize, out: &mut String) {
        match self {
            Placeholder::Question => out.push('?'),
            Placeholder::Dollar => {
                out.push('$');
                out.push_str(&index.to_string());
            }
        }
    }
}

/// Formatting options shared by the WHERE compiler and the statement builders.
///
/// The defaults reproduce the canonical output: `?` placeholders and four
/// spaces per nesting level.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatConfig {
    /// Placeholder style.
    pub placeholder: Placeholder,
    /// Spaces per nesting level inside parenthesized sub-trees.
    pub indent: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            placeholder: Placeholder::Question,
            indent: 4,
        }
    }
}

impl FormatConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder style.
    pub fn with_placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Set the number of spaces per nesting level.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub(crate) fn push_indent(&self, levels: usize, out: &mut String) {
        for _ in 0..levels * self.indent {
            out.push(' ');
        }
    }
}
