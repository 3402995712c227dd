//! JSON tree documents.
//!
//! A document describes one group/dataset tree:
//!
//! ```json
//! {
//!   "kind": "group",
//!   "children": {
//!     "a": {
//!       "kind": "group",
//!       "children": {
//!         "x": { "kind": "dataset", "dtype": "i64", "shape": [3], "data": [1, 2, 3] }
//!       }
//!     },
//!     "b": { "kind": "group" }
//!   }
//! }
//! ```
//!
//! Children keep document order. `data` is flat and row-major; float
//! datasets may spell non-finite values as `"nan"`, `"inf"` and `"-inf"`.

use std::path::Path;

use serde::Deserialize;

use super::MemoryStore;
use crate::array::{build_flat, ArrayValues};
use crate::error::{Error, Result};
use crate::path::NodePath;

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum JsonNode {
    Group {
        #[serde(default)]
        children: serde_json::Map<String, serde_json::Value>,
    },
    Dataset {
        dtype: String,
        shape: Vec<usize>,
        data: Vec<serde_json::Value>,
    },
}

/// Load a JSON tree file into a [`MemoryStore`].
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or
/// does not describe a tree whose root is a group.
pub fn load(path: &Path) -> Result<MemoryStore> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(e, path))?;
    let store = from_str(&text)?;
    tracing::debug!(path = %path.display(), nodes = store.node_count(), "loaded JSON tree");
    Ok(store)
}

/// Parse a JSON tree document.
///
/// # Errors
///
/// Returns an error if the text is not valid JSON, the root is not a
/// group, or a dataset's payload does not match its dtype and shape.
pub fn from_str(text: &str) -> Result<MemoryStore> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let mut store = MemoryStore::new();
    match JsonNode::deserialize(&value)? {
        JsonNode::Group { children } => {
            insert_children(&mut store, &NodePath::root(), &children)?;
        }
        JsonNode::Dataset { .. } => {
            return Err(Error::data("the document root must be a group"));
        }
    }
    Ok(store)
}

fn insert_children(
    store: &mut MemoryStore,
    parent: &NodePath,
    children: &serde_json::Map<String, serde_json::Value>,
) -> Result<()> {
    for (name, value) in children {
        let path = parent.join(name)?;
        match JsonNode::deserialize(value)? {
            JsonNode::Group { children } => {
                store.add_group(path.as_str())?;
                insert_children(store, &path, &children)?;
            }
            JsonNode::Dataset { dtype, shape, data } => {
                let flat = build_flat(&dtype, &data)
                    .map_err(|e| Error::data(format!("{path}: {e}")))?;
                let values = ArrayValues::new(shape, flat)
                    .map_err(|e| Error::data(format!("{path}: {e}")))?;
                store.add_dataset(path.as_str(), values)?;
            }
        }
    }
    Ok(())
}
