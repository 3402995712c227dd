//! Browser configuration.

use crate::error::{Error, Result};
use crate::tui::HighlightMemory;

/// Settings fixed for the lifetime of a browsing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    /// How parent-group highlights are remembered
    pub highlight_memory: HighlightMemory,
    /// Lines scrolled by one page of dataset content
    pub content_page_size: usize,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            highlight_memory: HighlightMemory::SingleLevel,
            content_page_size: 20,
        }
    }
}

impl BrowserConfig {
    /// Set the highlight memory policy
    #[must_use]
    pub fn with_highlight_memory(mut self, memory: HighlightMemory) -> Self {
        self.highlight_memory = memory;
        self
    }

    /// Remember the highlight of every ancestor, not just the last one
    #[must_use]
    pub fn with_remember_all_levels(self, enabled: bool) -> Self {
        let memory = if enabled {
            HighlightMemory::PerDepth
        } else {
            HighlightMemory::SingleLevel
        };
        self.with_highlight_memory(memory)
    }

    /// Set the content page size
    #[must_use]
    pub fn with_content_page_size(mut self, lines: usize) -> Self {
        self.content_page_size = lines;
        self
    }

    /// Check the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the page size is zero.
    pub fn validate(&self) -> Result<()> {
        if self.content_page_size == 0 {
            return Err(Error::invalid_config("content page size must be at least 1"));
        }
        Ok(())
    }
}
