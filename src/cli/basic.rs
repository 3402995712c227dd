//! Non-interactive listing and dataset printing.

use std::io::Write;
use std::path::Path;

use crate::array::ArrayValues;
use crate::path::NodePath;
use crate::store::{self, HierarchicalStore, NodeKind};
use crate::tui::{escape_name, format_array};

/// List the children of a group, marking groups with a trailing `/`.
pub(crate) fn cmd_ls(file: &Path, group: &str) -> crate::Result<()> {
    let store = store::open(file)?;
    let path = NodePath::parse(group)?;
    let mut out = std::io::stdout().lock();
    write_listing(&store, &path, &mut out)
}

pub(crate) fn write_listing<S, W>(store: &S, path: &NodePath, out: &mut W) -> crate::Result<()>
where
    S: HierarchicalStore + ?Sized,
    W: Write,
{
    for name in store.children(path)? {
        let is_group = path
            .join(&name)
            .ok()
            .and_then(|child| store.kind(&child).ok())
            == Some(NodeKind::Group);
        let suffix = if is_group { "/" } else { "" };
        writeln!(out, "{}{suffix}", escape_name(&name)).map_err(crate::Error::io_no_path)?;
    }
    Ok(())
}

/// Print a dataset's header and formatted values.
pub(crate) fn cmd_show(file: &Path, dataset: &str, full: bool, suppress: bool) -> crate::Result<()> {
    let store = store::open(file)?;
    let path = NodePath::parse(dataset)?;
    let values = store.read(&path)?;
    let mut out = std::io::stdout().lock();
    write_dataset(&path, &values, !full, suppress, &mut out)
}

pub(crate) fn write_dataset<W: Write>(
    path: &NodePath,
    values: &ArrayValues,
    truncate: bool,
    suppress: bool,
    out: &mut W,
) -> crate::Result<()> {
    let parent = path.parent().unwrap_or_default();
    writeln!(out, "Path: {parent}").map_err(crate::Error::io_no_path)?;
    writeln!(
        out,
        "Dataset: {} {} {}",
        path.basename(),
        values.display_shape(),
        values.dtype_name()
    )
    .map_err(crate::Error::io_no_path)?;
    writeln!(out, "{}", format_array(values, truncate, suppress)).map_err(crate::Error::io_no_path)
}
