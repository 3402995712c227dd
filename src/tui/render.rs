//! Frame layout for the terminal browser.
//!
//! Turns controller projections into styled lines that fit a given
//! terminal size. Nothing here touches the terminal, so the layout can be
//! checked without one.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::controller::Controller;
use super::scroll::Viewport;
use crate::store::HierarchicalStore;

/// How a line should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Path and dataset header
    Header,
    /// Listing rows and dataset content
    Body,
    /// The highlighted listing row
    Selected,
    /// Separator and status bar
    Chrome,
}

/// One line of a frame, already cut to the terminal width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Text to draw
    pub text: String,
    /// Drawing style
    pub style: LineStyle,
}

impl Line {
    fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Lines above the body: the header plus a separator.
pub fn chrome_height<S: HierarchicalStore>(controller: &Controller<S>) -> usize {
    controller.current_header().lines().count() + 1
}

/// Lines left for the listing or content.
pub fn body_height<S: HierarchicalStore>(controller: &Controller<S>, height: usize) -> usize {
    // One more line for the status bar.
    height.saturating_sub(chrome_height(controller) + 1)
}

/// Lay out a full frame.
///
/// `view` is the scroll position of whichever pane is shown: the listing
/// while browsing groups, the content while a dataset is open.
pub fn render_frame<S: HierarchicalStore>(
    controller: &Controller<S>,
    view: &Viewport,
    width: usize,
    height: usize,
) -> Vec<Line> {
    let mut lines: Vec<Line> = controller
        .current_header()
        .lines()
        .map(|l| Line::new(truncate_to_width(l, width), LineStyle::Header))
        .collect();
    lines.push(Line::new("─".repeat(width), LineStyle::Chrome));

    let body = body_height(controller, height);
    if let Some(content) = controller.current_content() {
        let text: Vec<&str> = content.lines().collect();
        for idx in view.range().take(body) {
            if let Some(l) = text.get(idx) {
                lines.push(Line::new(truncate_to_width(l, width), LineStyle::Body));
            }
        }
    } else {
        let listing = controller.current_listing();
        for idx in view.range().take(body) {
            if let Some(name) = listing.get(idx) {
                let style = if idx == controller.highlighted() {
                    LineStyle::Selected
                } else {
                    LineStyle::Body
                };
                lines.push(Line::new(truncate_to_width(name, width), style));
            }
        }
    }

    while lines.len() + 1 < height {
        lines.push(Line::new(String::new(), LineStyle::Body));
    }
    if lines.len() < height {
        lines.push(Line::new(
            truncate_to_width(&status_text(controller), width),
            LineStyle::Chrome,
        ));
    }
    lines.truncate(height);
    lines
}

/// Status bar contents.
pub fn status_text<S: HierarchicalStore>(controller: &Controller<S>) -> String {
    if controller.is_viewing_dataset() {
        format!(
            "truncate: {}  suppress: {}  [t]runcate [s]uppress [h] back [q]uit",
            on_off(controller.truncate()),
            on_off(controller.suppress()),
        )
    } else {
        "[j/k] move [l] open [h] up [q]uit".to_string()
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

/// Cut a string to at most `max_width` terminal columns.
///
/// Strings that do not fit end in `..`.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width < 3 {
        return take_columns(s, max_width);
    }
    let mut out = take_columns(s, max_width - 2);
    out.push_str("..");
    out
}

fn take_columns(s: &str, columns: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > columns {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

/// Terminal columns taken by a string.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}
