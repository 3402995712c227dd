//! Line viewport for the listing and content panes.
//!
//! Keeps a window of `visible` lines inside `total` lines. The offset is
//! always clamped so the last page is full whenever the text is longer than
//! the window.

use std::ops::Range;

/// Scroll position over a block of lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// First visible line
    offset: usize,
    /// Lines in the text
    total: usize,
    /// Lines that fit on screen
    visible: usize,
}

impl Viewport {
    /// Create a viewport at the top of the text.
    ///
    /// # Arguments
    /// * `total` - Number of lines in the text
    /// * `visible` - Number of lines on screen
    pub fn new(total: usize, visible: usize) -> Self {
        Self {
            offset: 0,
            total,
            visible,
        }
    }

    /// First visible line.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of lines in the text.
    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of lines on screen.
    #[inline]
    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Replace the text length, keeping the offset in bounds.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.offset = self.clamp_offset(self.offset);
    }

    /// Resize the window, keeping the offset in bounds.
    pub fn set_visible(&mut self, visible: usize) {
        self.visible = visible;
        self.offset = self.clamp_offset(self.offset);
    }

    /// Move down one line.
    pub fn scroll_down(&mut self) {
        self.offset = self.clamp_offset(self.offset.saturating_add(1));
    }

    /// Move up one line.
    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    /// Move down `lines` lines.
    pub fn page_down(&mut self, lines: usize) {
        self.offset = self.clamp_offset(self.offset.saturating_add(lines.max(1)));
    }

    /// Move up `lines` lines.
    pub fn page_up(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines.max(1));
    }

    /// Jump to the top.
    pub fn home(&mut self) {
        self.offset = 0;
    }

    /// Jump to the last page.
    pub fn end(&mut self) {
        self.offset = self.max_offset();
    }

    /// Scroll just enough for `line` to be on screen.
    pub fn ensure_visible(&mut self, line: usize) {
        if line < self.offset {
            self.offset = line;
        } else if line >= self.offset + self.visible {
            self.offset = line.saturating_sub(self.visible.saturating_sub(1));
        }
        self.offset = self.clamp_offset(self.offset);
    }

    /// Indices of the lines on screen.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.total.min(self.offset + self.visible)
    }

    /// Whether the text is longer than the window.
    pub fn is_scrollable(&self) -> bool {
        self.total > self.visible
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.visible)
    }

    fn clamp_offset(&self, offset: usize) -> usize {
        offset.min(self.max_offset())
    }
}
