//! Terminal browser core.
//!
//! Everything here is independent of the terminal itself:
//! - `Cursor` - where the browser is in the tree and what to highlight
//! - `Controller` - applies user actions against a store
//! - `format_array` - array content text with truncation and suppression
//! - `escape_name` - child names made safe for display
//! - `Viewport` and `render_frame` - frame layout for a given terminal size
//!
//! The crossterm front end lives in `cli::view` and only draws what
//! `render_frame` returns.
//!
//! # Example
//!
//! ```
//! use h5tui::array::ArrayValues;
//! use h5tui::store::MemoryStore;
//! use h5tui::tui::Controller;
//! use h5tui::BrowserConfig;
//!
//! let mut store = MemoryStore::new();
//! store
//!     .add_dataset("/big", ArrayValues::from_i64(vec![5000], (0..5000).collect()).unwrap())
//!     .unwrap();
//!
//! let mut browser = Controller::new(store, BrowserConfig::default()).unwrap();
//! browser.activate_selection();
//! assert!(browser.current_content().unwrap().contains("..."));
//! browser.toggle_truncate();
//! assert!(!browser.current_content().unwrap().contains("..."));
//! ```

mod controller;
mod cursor;
mod escape;
mod format;
mod numeric;
mod render;
mod scroll;

pub use controller::Controller;
pub use cursor::{Cursor, EnterResult, HighlightMemory, UpResult};
pub use escape::escape_name;
pub use format::{format_array, FormatOptions, EDGE_ITEMS, LINE_WIDTH, SUMMARY_THRESHOLD};
pub use numeric::PRECISION;
pub use render::{
    body_height, chrome_height, display_width, render_frame, status_text, truncate_to_width,
    Line, LineStyle,
};
pub use scroll::Viewport;
