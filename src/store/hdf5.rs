//! HDF5 files via the `hdf5` bindings.
//!
//! Requires the `hdf5` feature and a system HDF5 library. The file is
//! opened read-only once and held for the life of the store.

use std::path::Path;

use ::hdf5::types::{FloatSize, TypeDescriptor};
use ::hdf5::{File, LocationType};

use super::{HierarchicalStore, NodeKind, StoreError, StoreResult};
use crate::array::ArrayValues;
use crate::error::Result;
use crate::path::NodePath;

/// A read-only HDF5 file.
pub struct Hdf5Store {
    file: File,
}

impl std::fmt::Debug for Hdf5Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hdf5Store")
            .field("filename", &self.file.filename())
            .finish()
    }
}

impl Hdf5Store {
    /// Open an HDF5 file read-only.
    ///
    /// # Errors
    ///
    /// Returns a store backend error if the file is missing or not HDF5.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(StoreError::backend)?;
        tracing::debug!(path = %path.display(), "opened HDF5 file");
        Ok(Self { file })
    }
}

impl HierarchicalStore for Hdf5Store {
    fn children(&self, path: &NodePath) -> StoreResult<Vec<String>> {
        match self.kind(path)? {
            NodeKind::Group => self
                .file
                .group(path.as_str())
                .and_then(|g| g.member_names())
                .map_err(StoreError::backend),
            NodeKind::Dataset => Err(StoreError::not_a_group(path)),
        }
    }

    fn kind(&self, path: &NodePath) -> StoreResult<NodeKind> {
        if path.is_root() {
            return Ok(NodeKind::Group);
        }
        // Every ancestor link has to exist before the final one can be probed.
        let mut probe = NodePath::root();
        for segment in path.segments() {
            probe = probe
                .join(segment)
                .map_err(|_| StoreError::not_found(path))?;
            if !self.file.link_exists(probe.as_str()) {
                return Err(StoreError::not_found(path));
            }
        }
        let info = self
            .file
            .loc_info_by_name(path.as_str())
            .map_err(StoreError::backend)?;
        match info.loc_type {
            LocationType::Group => Ok(NodeKind::Group),
            LocationType::Dataset => Ok(NodeKind::Dataset),
            LocationType::NamedDatatype => Err(StoreError::backend(format!(
                "{path} is a named datatype"
            ))),
        }
    }

    fn read(&self, path: &NodePath) -> StoreResult<ArrayValues> {
        if self.kind(path)? == NodeKind::Group {
            return Err(StoreError::not_a_dataset(path));
        }
        let dataset = self
            .file
            .dataset(path.as_str())
            .map_err(StoreError::backend)?;
        let shape = dataset.shape();
        let descriptor = dataset
            .dtype()
            .and_then(|dt| dt.to_descriptor())
            .map_err(StoreError::backend)?;

        let values = match descriptor {
            TypeDescriptor::Integer(_) => dataset
                .read_raw::<i64>()
                .map_err(StoreError::backend)
                .and_then(|data| {
                    ArrayValues::from_i64(shape, data).map_err(StoreError::backend)
                }),
            TypeDescriptor::Unsigned(_) => dataset
                .read_raw::<u64>()
                .map_err(StoreError::backend)
                .and_then(|data| {
                    ArrayValues::from_u64(shape, data).map_err(StoreError::backend)
                }),
            TypeDescriptor::Float(FloatSize::U4) => dataset
                .read_raw::<f32>()
                .map_err(StoreError::backend)
                .and_then(|data| {
                    ArrayValues::from_f32(shape, data).map_err(StoreError::backend)
                }),
            TypeDescriptor::Float(_) => dataset
                .read_raw::<f64>()
                .map_err(StoreError::backend)
                .and_then(|data| {
                    ArrayValues::from_f64(shape, data).map_err(StoreError::backend)
                }),
            TypeDescriptor::Boolean => dataset
                .read_raw::<bool>()
                .map_err(StoreError::backend)
                .and_then(|data| {
                    ArrayValues::from_bool(shape, data).map_err(StoreError::backend)
                }),
            other => Err(StoreError::backend(format!(
                "{path}: unsupported element type {other:?}"
            ))),
        }?;

        tracing::debug!(%path, shape = %values.display_shape(), "read dataset");
        Ok(values)
    }
}
