//! Hierarchical stores that h5tui can browse.
//!
//! A store exposes a tree of groups and datasets. The [`HierarchicalStore`]
//! trait is the only interface the browser core uses, with implementations
//! for in-memory trees, JSON tree documents, and HDF5 files (behind the
//! `hdf5` feature).

#[cfg(feature = "hdf5")]
pub mod hdf5;
pub mod json;
pub mod memory;

use std::path::Path;

#[cfg(feature = "hdf5")]
pub use self::hdf5::Hdf5Store;
pub use memory::MemoryStore;

use crate::array::ArrayValues;
use crate::error::{Error, Result};
use crate::path::NodePath;

/// Result type for store queries.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// What a path names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Interior node with named children.
    Group,
    /// Leaf node holding a shaped numeric array.
    Dataset,
}

/// Failures reported by a store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No node exists at the path.
    #[error("No such node: {path}")]
    NotFound {
        /// The missing path.
        path: String,
    },

    /// The path names a dataset where a group was expected.
    #[error("Not a group: {path}")]
    NotAGroup {
        /// The offending path.
        path: String,
    },

    /// The path names a group where a dataset was expected.
    #[error("Not a dataset: {path}")]
    NotADataset {
        /// The offending path.
        path: String,
    },

    /// The underlying library failed.
    #[error("Store backend error: {message}")]
    Backend {
        /// Description from the backend.
        message: String,
    },
}

impl StoreError {
    /// Create a not-found error.
    pub fn not_found(path: impl std::fmt::Display) -> Self {
        Self::NotFound {
            path: path.to_string(),
        }
    }

    /// Create a not-a-group error.
    pub fn not_a_group(path: impl std::fmt::Display) -> Self {
        Self::NotAGroup {
            path: path.to_string(),
        }
    }

    /// Create a not-a-dataset error.
    pub fn not_a_dataset(path: impl std::fmt::Display) -> Self {
        Self::NotADataset {
            path: path.to_string(),
        }
    }

    /// Create a backend error.
    pub fn backend(message: impl std::fmt::Display) -> Self {
        Self::Backend {
            message: message.to_string(),
        }
    }
}

/// Read access to a group/dataset tree.
///
/// All operations are synchronous and side-effect free. Child order is
/// whatever the backend reports; callers never re-sort it.
pub trait HierarchicalStore {
    /// Lists the child names of a group.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotAGroup`] if `path` names a dataset,
    /// [`StoreError::NotFound`] if it does not exist.
    fn children(&self, path: &NodePath) -> StoreResult<Vec<String>>;

    /// Reports whether `path` is a group or a dataset.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if it does not exist.
    fn kind(&self, path: &NodePath) -> StoreResult<NodeKind>;

    /// Reads a dataset's shape and values.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotADataset`] if `path` names a group,
    /// [`StoreError::NotFound`] if it does not exist.
    fn read(&self, path: &NodePath) -> StoreResult<ArrayValues>;
}

impl<S: HierarchicalStore + ?Sized> HierarchicalStore for Box<S> {
    fn children(&self, path: &NodePath) -> StoreResult<Vec<String>> {
        (**self).children(path)
    }

    fn kind(&self, path: &NodePath) -> StoreResult<NodeKind> {
        (**self).kind(path)
    }

    fn read(&self, path: &NodePath) -> StoreResult<ArrayValues> {
        (**self).read(path)
    }
}

impl<S: HierarchicalStore + ?Sized> HierarchicalStore for &S {
    fn children(&self, path: &NodePath) -> StoreResult<Vec<String>> {
        (**self).children(path)
    }

    fn kind(&self, path: &NodePath) -> StoreResult<NodeKind> {
        (**self).kind(path)
    }

    fn read(&self, path: &NodePath) -> StoreResult<ArrayValues> {
        (**self).read(path)
    }
}

/// File formats [`open`] recognises by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFormat {
    /// JSON tree document (`.json`).
    Json,
    /// HDF5 file (`.h5`, `.hdf5`, `.he5`).
    Hdf5,
    /// NetCDF-4 file (`.nc`), read as HDF5.
    NetCdf4,
}

impl StoreFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str())? {
            "json" => Some(Self::Json),
            "h5" | "hdf5" | "he5" => Some(Self::Hdf5),
            "nc" => Some(Self::NetCdf4),
            _ => None,
        }
    }

    /// Human-readable format name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON tree",
            Self::Hdf5 => "HDF5",
            Self::NetCdf4 => "NetCDF-4",
        }
    }
}

/// Open a store from a file path based on extension.
///
/// # Errors
///
/// Returns an error for unknown extensions, for HDF5 files when the crate
/// was built without the `hdf5` feature, and when the file cannot be
/// opened or parsed.
pub fn open(path: &Path) -> Result<Box<dyn HierarchicalStore>> {
    let Some(format) = StoreFormat::from_path(path) else {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        return Err(Error::unsupported_format(ext));
    };
    tracing::debug!(path = %path.display(), format = format.name(), "opening store");

    match format {
        StoreFormat::Json => Ok(Box::new(json::load(path)?)),
        StoreFormat::Hdf5 | StoreFormat::NetCdf4 => open_hdf5(path, format),
    }
}

#[cfg(feature = "hdf5")]
fn open_hdf5(path: &Path, _format: StoreFormat) -> Result<Box<dyn HierarchicalStore>> {
    Ok(Box::new(Hdf5Store::open(path)?))
}

#[cfg(not(feature = "hdf5"))]
fn open_hdf5(_path: &Path, format: StoreFormat) -> Result<Box<dyn HierarchicalStore>> {
    Err(Error::unsupported_format(format!(
        "{} (built without the `hdf5` feature)",
        format.name()
    )))
}
