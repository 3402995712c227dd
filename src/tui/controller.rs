//! Browser controller.
//!
//! Glues the [`Cursor`], the array formatter and a [`HierarchicalStore`]
//! together and exposes what a front end needs to draw: a header, the
//! escaped child listing and the formatted content of the open dataset.
//!
//! Store failures while browsing never escape this type. An operation that
//! hits one leaves every projection exactly as it was.

use std::borrow::Cow;

use super::cursor::{Cursor, EnterResult, UpResult};
use super::escape::escape_name;
use super::format::FormatOptions;
use crate::array::ArrayValues;
use crate::config::BrowserConfig;
use crate::error::Result;
use crate::path::NodePath;
use crate::store::{HierarchicalStore, NodeKind};

/// Interactive browsing state over one store.
///
/// # Example
///
/// ```
/// use h5tui::array::ArrayValues;
/// use h5tui::store::MemoryStore;
/// use h5tui::{BrowserConfig, Controller};
///
/// let mut store = MemoryStore::new();
/// store
///     .add_dataset("/a/x", ArrayValues::from_i64(vec![3], vec![1, 2, 3]).unwrap())
///     .unwrap();
///
/// let mut controller = Controller::new(store, BrowserConfig::default()).unwrap();
/// controller.activate_selection(); // enter /a
/// controller.activate_selection(); // open /a/x
/// assert_eq!(controller.current_header(), "Path: /a\nDataset: x (3,)");
/// assert_eq!(controller.current_content(), Some("[1 2 3]"));
/// ```
#[derive(Debug)]
pub struct Controller<S> {
    store: S,
    config: BrowserConfig,
    cursor: Cursor,
    /// Raw child names of the current group, in store order
    listing: Vec<String>,
    header: String,
    options: FormatOptions,
    /// Values of the open dataset, kept for reformatting
    cached: Option<ArrayValues>,
    content: Option<String>,
}

impl<S: HierarchicalStore> Controller<S> {
    /// Start a session at the root group.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the root group
    /// cannot be listed.
    pub fn new(store: S, config: BrowserConfig) -> Result<Self> {
        config.validate()?;
        let cursor = Cursor::new(config.highlight_memory);
        let listing = store.children(cursor.current_path())?;
        let header = group_header(cursor.current_path());
        tracing::debug!(children = listing.len(), "listed root group");

        Ok(Self {
            store,
            config,
            cursor,
            listing,
            header,
            options: FormatOptions::default(),
            cached: None,
            content: None,
        })
    }

    /// Open the highlighted child.
    ///
    /// Groups become the listed group; datasets are read, formatted and
    /// shown. Does nothing while a dataset is open, when the listing is
    /// empty, or when the store cannot answer.
    pub fn activate_selection(&mut self) {
        if self.cursor.is_viewing_dataset() {
            return;
        }
        let Some(name) = self.listing.get(self.cursor.highlighted()).cloned() else {
            return;
        };
        let target = match self.cursor.current_path().join(&name) {
            Ok(target) => target,
            Err(e) => {
                tracing::debug!(%name, error = %e, "ignoring unusable child name");
                return;
            }
        };
        let kind = match self.store.kind(&target) {
            Ok(kind) => kind,
            Err(e) => {
                tracing::debug!(%target, error = %e, "ignoring selection");
                return;
            }
        };

        match kind {
            NodeKind::Group => self.enter_group(&name),
            NodeKind::Dataset => self.open_dataset(&name, &target),
        }
    }

    fn enter_group(&mut self, name: &str) {
        let previous = self.cursor.clone();
        let path = match self.cursor.enter_child(name, NodeKind::Group) {
            Ok(EnterResult::EnteredGroup(path)) => path,
            Ok(_) => return,
            Err(e) => {
                tracing::debug!(%name, error = %e, "ignoring selection");
                return;
            }
        };
        match self.store.children(&path) {
            Ok(listing) => {
                tracing::debug!(%path, children = listing.len(), "entered group");
                self.listing = listing;
                self.header = group_header(&path);
            }
            Err(e) => {
                tracing::debug!(%path, error = %e, "group listing failed, staying put");
                self.cursor = previous;
            }
        }
    }

    fn open_dataset(&mut self, name: &str, target: &NodePath) {
        let values = match self.store.read(target) {
            Ok(values) => values,
            Err(e) => {
                tracing::debug!(%target, error = %e, "dataset read failed");
                return;
            }
        };
        match self.cursor.enter_child(name, NodeKind::Dataset) {
            Ok(EnterResult::EnteredDataset) => {}
            Ok(_) => return,
            Err(e) => {
                tracing::debug!(%name, error = %e, "ignoring selection");
                return;
            }
        }

        self.header = format!(
            "Path: {}\nDataset: {} {}",
            self.cursor.current_path(),
            target.basename(),
            values.display_shape()
        );
        self.content = Some(self.options.apply(&values));
        tracing::debug!(%target, shape = %values.display_shape(), "opened dataset");
        self.cached = Some(values);
    }

    /// Close the open dataset, or move to the parent group.
    ///
    /// Does nothing at the root or when the parent cannot be listed.
    pub fn go_back(&mut self) {
        let previous = self.cursor.clone();
        match self.cursor.go_up() {
            UpResult::ClosedDataset => {
                self.cached = None;
                self.content = None;
                self.header = group_header(self.cursor.current_path());
            }
            UpResult::MovedUp(path) => match self.store.children(&path) {
                Ok(listing) => {
                    tracing::debug!(%path, children = listing.len(), "moved up");
                    self.cursor.clamp_highlighted(listing.len());
                    self.listing = listing;
                    self.header = group_header(&path);
                }
                Err(e) => {
                    tracing::debug!(%path, error = %e, "parent listing failed, staying put");
                    self.cursor = previous;
                }
            },
            UpResult::AtRoot => {}
        }
    }

    /// Flip truncation of the open dataset's content.
    ///
    /// Does nothing unless a dataset is open.
    pub fn toggle_truncate(&mut self) {
        if self.cursor.is_viewing_dataset() {
            self.options.truncate = !self.options.truncate;
            self.reformat();
        }
    }

    /// Flip small-number suppression of the open dataset's content.
    ///
    /// Does nothing unless a dataset is open.
    pub fn toggle_suppress(&mut self) {
        if self.cursor.is_viewing_dataset() {
            self.options.suppress = !self.options.suppress;
            self.reformat();
        }
    }

    fn reformat(&mut self) {
        if let Some(values) = &self.cached {
            self.content = Some(self.options.apply(values));
        }
    }

    /// Highlight the row below, stopping at the last one.
    pub fn select_next(&mut self) {
        self.set_highlighted(self.cursor.highlighted().saturating_add(1));
    }

    /// Highlight the row above, stopping at the first one.
    pub fn select_prev(&mut self) {
        self.set_highlighted(self.cursor.highlighted().saturating_sub(1));
    }

    /// Highlight the first row.
    pub fn select_first(&mut self) {
        self.set_highlighted(0);
    }

    /// Highlight the last row.
    pub fn select_last(&mut self) {
        self.set_highlighted(self.listing.len().saturating_sub(1));
    }

    /// Highlight a row, clamped to the listing.
    ///
    /// Does nothing while a dataset is open.
    pub fn set_highlighted(&mut self, index: usize) {
        if self.cursor.is_viewing_dataset() {
            return;
        }
        self.cursor.set_highlighted(index);
        self.cursor.clamp_highlighted(self.listing.len());
    }

    /// Header text: the listed path, plus the dataset name and shape while
    /// one is open.
    #[inline]
    pub fn current_header(&self) -> &str {
        &self.header
    }

    /// Child names of the listed group, escaped for display.
    pub fn current_listing(&self) -> Vec<Cow<'_, str>> {
        self.listing.iter().map(|name| escape_name(name)).collect()
    }

    /// Child names of the listed group exactly as the store reports them.
    #[inline]
    pub fn raw_listing(&self) -> &[String] {
        &self.listing
    }

    /// Formatted values of the open dataset.
    #[inline]
    pub fn current_content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Whether a dataset is open.
    #[inline]
    pub fn is_viewing_dataset(&self) -> bool {
        self.cursor.is_viewing_dataset()
    }

    /// Highlighted row of the listing.
    #[inline]
    pub fn highlighted(&self) -> usize {
        self.cursor.highlighted()
    }

    /// The listed group.
    #[inline]
    pub fn current_path(&self) -> &NodePath {
        self.cursor.current_path()
    }

    /// Whether long arrays are summarized.
    #[inline]
    pub fn truncate(&self) -> bool {
        self.options.truncate
    }

    /// Whether small floats stay in fixed notation.
    #[inline]
    pub fn suppress(&self) -> bool {
        self.options.suppress
    }

    /// Session settings.
    #[inline]
    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// The underlying store.
    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }
}

fn group_header(path: &NodePath) -> String {
    format!("Path: {path}")
}
