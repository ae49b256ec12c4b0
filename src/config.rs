// Copyright 2025 Cowboy AI, LLC.

//! Rendering configuration for justifications and detailed statements

use serde::{Deserialize, Serialize};

/// Controls how multi-line justifications and detailed statements are laid out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Spaces used for each nesting level
    pub indent: usize,
    /// Flatten chains of the same operator into a single block
    pub collapse_operators: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: 4,
            collapse_operators: true,
        }
    }
}

impl RenderConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Enable or disable operator collapsing
    pub fn with_collapsing(mut self, collapse: bool) -> Self {
        self.collapse_operators = collapse;
        self
    }

    pub(crate) fn pad(&self, depth: usize) -> String {
        " ".repeat(self.indent * depth)
    }
}
