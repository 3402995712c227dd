//! h5tui - Terminal Browser for Group/Dataset Trees
//!
//! Browse HDF5 files (or any store with the same group/dataset shape) from
//! the terminal: walk groups, open datasets and read their values in a
//! compact nested-bracket layout.
//!
//! # Design Principles
//!
//! 1. **Store-agnostic** - the browser only needs `children`, `kind` and
//!    `read`, see [`store::HierarchicalStore`]
//! 2. **Terminal-free core** - navigation, formatting and frame layout are
//!    plain functions over plain data
//! 3. **Arrow payloads** - dataset values are flat Arrow arrays plus a shape
//!
//! # Quick Start
//!
//! ```
//! use h5tui::array::ArrayValues;
//! use h5tui::store::MemoryStore;
//! use h5tui::{BrowserConfig, Controller};
//!
//! let mut store = MemoryStore::new();
//! store
//!     .add_dataset("/a/x", ArrayValues::from_i64(vec![3], vec![1, 2, 3]).unwrap())
//!     .unwrap();
//!
//! let mut browser = Controller::new(store, BrowserConfig::default()).unwrap();
//! browser.activate_selection();
//! browser.activate_selection();
//! assert_eq!(browser.current_content(), Some("[1 2 3]"));
//!
//! browser.go_back();
//! browser.go_back();
//! assert_eq!(browser.current_header(), "Path: /");
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::float_cmp,
        clippy::unreadable_literal
    )
)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]

pub mod array;
/// CLI module for command-line interface
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
#[cfg(feature = "cli")]
pub mod logging;
pub mod path;
pub mod store;
/// Terminal browser core
pub mod tui;

pub use array::{ArrayValues, Shape};
pub use config::BrowserConfig;
pub use error::{Error, Result};
pub use path::NodePath;
pub use store::{HierarchicalStore, MemoryStore, NodeKind, StoreError};
pub use tui::{format_array, Controller, Cursor, HighlightMemory};
