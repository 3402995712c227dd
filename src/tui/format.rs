//! Array display formatting.
//!
//! Renders a dataset's values as text in the familiar nested-bracket
//! layout, e.g. `[1 2 3]` or `[[1. 2.]\n [3. 4.]]`. Two independent flags
//! control the output:
//!
//! - `truncate`: arrays with more than [`SUMMARY_THRESHOLD`] elements show
//!   only the first and last [`EDGE_ITEMS`] entries of each long axis.
//! - `suppress`: small floats are never switched to scientific notation.
//!
//! Formatting is a pure function of the cached values and the flags, so
//! toggling a flag back reproduces the previous string exactly.

use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    ArrowPrimitiveType, DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type,
    Int8Type, UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};

use super::numeric::{format_bool, FloatElement, FloatFormat, IntFormat};
use crate::array::ArrayValues;

/// Element count above which truncated output summarizes.
pub const SUMMARY_THRESHOLD: usize = 1000;

/// Entries kept at each end of a summarized axis.
pub const EDGE_ITEMS: usize = 3;

/// Column at which rows wrap.
pub const LINE_WIDTH: usize = 75;

const SUMMARY_MARK: &str = "...";

/// Formatting flags for dataset content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Bound the number of rendered elements.
    pub truncate: bool,
    /// Avoid scientific notation for small magnitudes.
    pub suppress: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            truncate: true,
            suppress: false,
        }
    }
}

impl FormatOptions {
    /// Render `values` with these flags.
    pub fn apply(&self, values: &ArrayValues) -> String {
        format_array(values, self.truncate, self.suppress)
    }
}

/// Format a dataset's values as display text.
///
/// # Arguments
/// * `values` - The shaped array to render
/// * `truncate` - Summarize arrays longer than [`SUMMARY_THRESHOLD`]
/// * `suppress` - Keep small floats in fixed notation
///
/// # Example
/// ```
/// use h5tui::array::ArrayValues;
/// use h5tui::tui::format_array;
///
/// let values = ArrayValues::from_i64(vec![3], vec![1, 2, 3]).unwrap();
/// assert_eq!(format_array(&values, true, false), "[1 2 3]");
/// ```
pub fn format_array(values: &ArrayValues, truncate: bool, suppress: bool) -> String {
    if values.is_empty() {
        return "[]".to_string();
    }

    let shape = values.shape();
    let summarize = truncate && values.len() > SUMMARY_THRESHOLD;

    let mut indices = Vec::new();
    collect_indices(shape, &row_major_strides(shape), 0, 0, summarize, &mut indices);
    let words = format_elements(values.values().as_ref(), &indices, suppress, shape.is_empty());

    if shape.is_empty() {
        return words.into_iter().next().unwrap_or_default();
    }

    let mut layout = Layout {
        shape,
        summarize,
        words: words.into_iter(),
    };
    layout.axis(0, " ", LINE_WIDTH)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Item(usize),
    Summary,
}

/// Positions shown along one axis.
fn slots(len: usize, summarize: bool) -> Vec<Slot> {
    if summarize && len > 2 * EDGE_ITEMS {
        (0..EDGE_ITEMS)
            .map(Slot::Item)
            .chain(std::iter::once(Slot::Summary))
            .chain((len - EDGE_ITEMS..len).map(Slot::Item))
            .collect()
    } else {
        (0..len).map(Slot::Item).collect()
    }
}

fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for axis in (0..shape.len().saturating_sub(1)).rev() {
        strides[axis] = strides[axis + 1] * shape[axis + 1];
    }
    strides
}

/// Flat indices of the displayed elements, in display order.
fn collect_indices(
    shape: &[usize],
    strides: &[usize],
    axis: usize,
    base: usize,
    summarize: bool,
    out: &mut Vec<usize>,
) {
    if axis == shape.len() {
        out.push(base);
        return;
    }
    for slot in slots(shape[axis], summarize) {
        if let Slot::Item(i) = slot {
            collect_indices(shape, strides, axis + 1, base + i * strides[axis], summarize, out);
        }
    }
}

fn gather<T: ArrowPrimitiveType>(array: &dyn Array, indices: &[usize]) -> Option<Vec<T::Native>> {
    array
        .as_primitive_opt::<T>()
        .map(|arr| indices.iter().map(|&i| arr.value(i)).collect())
}

fn gather_ints<T>(array: &dyn Array, indices: &[usize]) -> Option<Vec<String>>
where
    T: ArrowPrimitiveType,
    T::Native: Into<i128>,
{
    let values: Vec<i128> = gather::<T>(array, indices)?
        .into_iter()
        .map(Into::into)
        .collect();
    let format = IntFormat::new(&values);
    Some(values.into_iter().map(|v| format.format(v)).collect())
}

fn gather_floats<T>(array: &dyn Array, indices: &[usize], suppress: bool) -> Option<Vec<String>>
where
    T: ArrowPrimitiveType,
    T::Native: FloatElement,
{
    let values = gather::<T>(array, indices)?;
    let format = FloatFormat::new(&values, suppress);
    Some(values.into_iter().map(|v| format.format(v)).collect())
}

/// Format the selected elements with one shared formatter.
fn format_elements(
    array: &dyn Array,
    indices: &[usize],
    suppress: bool,
    scalar: bool,
) -> Vec<String> {
    let formatted = match array.data_type() {
        DataType::Int8 => gather_ints::<Int8Type>(array, indices),
        DataType::Int16 => gather_ints::<Int16Type>(array, indices),
        DataType::Int32 => gather_ints::<Int32Type>(array, indices),
        DataType::Int64 => gather_ints::<Int64Type>(array, indices),
        DataType::UInt8 => gather_ints::<UInt8Type>(array, indices),
        DataType::UInt16 => gather_ints::<UInt16Type>(array, indices),
        DataType::UInt32 => gather_ints::<UInt32Type>(array, indices),
        DataType::UInt64 => gather_ints::<UInt64Type>(array, indices),
        DataType::Float32 => gather_floats::<Float32Type>(array, indices, suppress),
        DataType::Float64 => gather_floats::<Float64Type>(array, indices, suppress),
        DataType::Boolean => array.as_boolean_opt().map(|arr| {
            indices
                .iter()
                .map(|&i| format_bool(arr.value(i), scalar))
                .collect()
        }),
        _ => None,
    };

    // ArrayValues only admits the types above; anything else gets a placeholder.
    formatted.unwrap_or_else(|| vec![format!("<{}>", array.data_type()); indices.len()])
}

/// Nested-bracket layout over pre-formatted words.
struct Layout<'a> {
    shape: &'a [usize],
    summarize: bool,
    words: std::vec::IntoIter<String>,
}

impl Layout<'_> {
    fn axis(&mut self, axis: usize, hanging: &str, width: usize) -> String {
        let axes_left = self.shape.len() - axis;
        let next_hanging = format!("{hanging} ");
        let next_width = width.saturating_sub(1);
        let slots = slots(self.shape[axis], self.summarize);
        let last = slots.len().saturating_sub(1);
        let mut s = String::new();

        if axes_left == 1 {
            let mut line = hanging.to_string();
            for (i, slot) in slots.iter().enumerate() {
                let word = match slot {
                    Slot::Item(_) => self.words.next().unwrap_or_default(),
                    Slot::Summary => SUMMARY_MARK.to_string(),
                };
                // Every word leaves room for a closing bracket.
                extend_line(&mut s, &mut line, &word, next_width, hanging);
                if i != last {
                    line.push(' ');
                }
            }
            s.push_str(&line);
        } else {
            let separator = "\n".repeat(axes_left - 1);
            for (i, slot) in slots.iter().enumerate() {
                s.push_str(hanging);
                match slot {
                    Slot::Item(_) => {
                        let nested = self.axis(axis + 1, &next_hanging, next_width);
                        s.push_str(&nested);
                    }
                    Slot::Summary => s.push_str(SUMMARY_MARK),
                }
                if i != last {
                    s.push_str(&separator);
                }
            }
        }

        format!("[{}]", &s[hanging.len()..])
    }
}

fn extend_line(s: &mut String, line: &mut String, word: &str, width: usize, hanging: &str) {
    let needs_wrap = line.len() > hanging.len() && line.len() + word.len() > width;
    if needs_wrap {
        s.push_str(line.trim_end());
        s.push('\n');
        *line = hanging.to_string();
    }
    line.push_str(word);
}
