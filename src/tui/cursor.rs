//! Navigation cursor.
//!
//! Tracks where the browser is in the tree: the group being listed, the
//! highlighted row, whether a dataset is open, and what to highlight again
//! after moving back up. The cursor never talks to the store; the
//! controller decides which transition applies and the cursor records it.

use crate::error::Result;
use crate::path::NodePath;
use crate::store::NodeKind;

/// What the cursor remembers about highlights in parent groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HighlightMemory {
    /// Only the highlight of the most recently left group is kept.
    ///
    /// Moving up any number of levels restores that one value.
    #[default]
    SingleLevel,
    /// One saved highlight per ancestor, restored level by level.
    PerDepth,
}

/// Outcome of [`Cursor::enter_child`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnterResult {
    /// Now listing the child group at this path.
    EnteredGroup(NodePath),
    /// A dataset is now being viewed; the listed group is unchanged.
    EnteredDataset,
    /// A dataset is already open, nothing changed.
    Blocked,
}

/// Outcome of [`Cursor::go_up`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpResult {
    /// The open dataset was closed; the listed group is unchanged.
    ClosedDataset,
    /// Already at the root, nothing changed.
    AtRoot,
    /// Now listing the parent group at this path.
    MovedUp(NodePath),
}

#[derive(Debug, Clone)]
enum Saved {
    Single(usize),
    Stack(Vec<usize>),
}

/// Position and selection state of the browser.
#[derive(Debug, Clone)]
pub struct Cursor {
    path: NodePath,
    highlighted: usize,
    viewing_dataset: bool,
    saved: Saved,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(HighlightMemory::default())
    }
}

impl Cursor {
    /// A cursor at the root with the first row highlighted.
    pub fn new(memory: HighlightMemory) -> Self {
        let saved = match memory {
            HighlightMemory::SingleLevel => Saved::Single(0),
            HighlightMemory::PerDepth => Saved::Stack(Vec::new()),
        };
        Self {
            path: NodePath::root(),
            highlighted: 0,
            viewing_dataset: false,
            saved,
        }
    }

    /// The group currently listed.
    #[inline]
    pub fn current_path(&self) -> &NodePath {
        &self.path
    }

    /// Whether a dataset is open.
    #[inline]
    pub fn is_viewing_dataset(&self) -> bool {
        self.viewing_dataset
    }

    /// Highlighted row within the listing.
    #[inline]
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Move the highlight.
    pub fn set_highlighted(&mut self, index: usize) {
        self.highlighted = index;
    }

    /// Keep the highlight inside a listing of `len` rows.
    pub fn clamp_highlighted(&mut self, len: usize) {
        self.highlighted = self.highlighted.min(len.saturating_sub(1));
    }

    /// Record entering the child `name`, which the store reports as `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` cannot be a path segment. The cursor is
    /// left unchanged in that case.
    pub fn enter_child(&mut self, name: &str, kind: NodeKind) -> Result<EnterResult> {
        if self.viewing_dataset {
            return Ok(EnterResult::Blocked);
        }
        match kind {
            NodeKind::Group => {
                self.path = self.path.join(name)?;
                match &mut self.saved {
                    Saved::Single(prev) => *prev = self.highlighted,
                    Saved::Stack(stack) => stack.push(self.highlighted),
                }
                self.highlighted = 0;
                Ok(EnterResult::EnteredGroup(self.path.clone()))
            }
            NodeKind::Dataset => {
                self.viewing_dataset = true;
                Ok(EnterResult::EnteredDataset)
            }
        }
    }

    /// Close the open dataset, or move to the parent group.
    pub fn go_up(&mut self) -> UpResult {
        if self.viewing_dataset {
            self.viewing_dataset = false;
            return UpResult::ClosedDataset;
        }
        let Some(parent) = self.path.parent() else {
            return UpResult::AtRoot;
        };
        self.path = parent;
        self.highlighted = match &mut self.saved {
            Saved::Single(prev) => *prev,
            Saved::Stack(stack) => stack.pop().unwrap_or(0),
        };
        UpResult::MovedUp(self.path.clone())
    }
}
