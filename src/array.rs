//! Shaped n-dimensional numeric arrays read from a store.
//!
//! Values are kept as one flat Arrow array in row-major (C) order next to
//! the shape, so that display code can re-derive any rendering from the
//! same buffer without going back to the store.

use std::fmt;
use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array, Int64Array,
    Int8Array, UInt16Array, UInt32Array, UInt64Array, UInt8Array,
};
use arrow::datatypes::DataType;

use crate::error::{Error, Result};

/// A dataset payload: shape plus flat row-major values.
#[derive(Debug, Clone)]
pub struct ArrayValues {
    shape: Vec<usize>,
    values: ArrayRef,
}

impl ArrayValues {
    /// Wrap a flat array with its shape.
    ///
    /// An empty shape denotes a scalar holding exactly one element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Data`] if the element count does not match the
    /// shape, the element type is not numeric or boolean, or the array
    /// contains nulls.
    pub fn new(shape: Vec<usize>, values: ArrayRef) -> Result<Self> {
        let expected = element_count(&shape)
            .ok_or_else(|| Error::data(format!("shape {} overflows usize", Shape(&shape))))?;
        if values.len() != expected {
            return Err(Error::data(format!(
                "{} values do not fit shape {}",
                values.len(),
                Shape(&shape)
            )));
        }
        if !is_supported(values.data_type()) {
            return Err(Error::data(format!(
                "unsupported element type {}",
                values.data_type()
            )));
        }
        if values.null_count() > 0 {
            return Err(Error::data("null elements are not supported"));
        }
        Ok(Self { shape, values })
    }

    /// Build from signed integers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Data`] on a shape mismatch.
    pub fn from_i64(shape: Vec<usize>, data: Vec<i64>) -> Result<Self> {
        Self::new(shape, Arc::new(Int64Array::from(data)))
    }

    /// Build from unsigned integers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Data`] on a shape mismatch.
    pub fn from_u64(shape: Vec<usize>, data: Vec<u64>) -> Result<Self> {
        Self::new(shape, Arc::new(UInt64Array::from(data)))
    }

    /// Build from double precision floats.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Data`] on a shape mismatch.
    pub fn from_f64(shape: Vec<usize>, data: Vec<f64>) -> Result<Self> {
        Self::new(shape, Arc::new(Float64Array::from(data)))
    }

    /// Build from single precision floats.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Data`] on a shape mismatch.
    pub fn from_f32(shape: Vec<usize>, data: Vec<f32>) -> Result<Self> {
        Self::new(shape, Arc::new(Float32Array::from(data)))
    }

    /// Build from booleans.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Data`] on a shape mismatch.
    pub fn from_bool(shape: Vec<usize>, data: Vec<bool>) -> Result<Self> {
        Self::new(shape, Arc::new(BooleanArray::from(data)))
    }

    /// Shape, one extent per axis.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Shape wrapper that displays in tuple notation.
    #[inline]
    pub fn display_shape(&self) -> Shape<'_> {
        Shape(&self.shape)
    }

    /// Number of axes; 0 for a scalar.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The flat row-major values.
    #[inline]
    pub fn values(&self) -> &ArrayRef {
        &self.values
    }

    /// Element type of the payload.
    #[inline]
    pub fn data_type(&self) -> &DataType {
        self.values.data_type()
    }

    /// Short element type name such as `i64` or `f32`.
    pub fn dtype_name(&self) -> &'static str {
        dtype_name(self.values.data_type())
    }
}

/// Shape rendered the way tuples print: `()`, `(3,)`, `(2, 3)`.
#[derive(Debug, Clone, Copy)]
pub struct Shape<'a>(pub &'a [usize]);

impl fmt::Display for Shape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            [] => write!(f, "()"),
            [only] => write!(f, "({only},)"),
            [first, rest @ ..] => {
                write!(f, "({first}")?;
                for extent in rest {
                    write!(f, ", {extent}")?;
                }
                write!(f, ")")
            }
        }
    }
}

fn element_count(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &n| acc.checked_mul(n))
}

fn is_supported(dt: &DataType) -> bool {
    matches!(
        dt,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
            | DataType::Boolean
    )
}

fn dtype_name(dt: &DataType) -> &'static str {
    match dt {
        DataType::Boolean => "bool",
        DataType::Int8 => "i8",
        DataType::Int16 => "i16",
        DataType::Int32 => "i32",
        DataType::Int64 => "i64",
        DataType::UInt8 => "u8",
        DataType::UInt16 => "u16",
        DataType::UInt32 => "u32",
        DataType::UInt64 => "u64",
        DataType::Float32 => "f32",
        DataType::Float64 => "f64",
        _ => "unknown",
    }
}

/// Build a flat array of the named element type from JSON-ish numbers.
///
/// Used by the JSON tree loader; `dtype` accepts the names returned by
/// [`ArrayValues::dtype_name`].
///
/// # Errors
///
/// Returns [`Error::Data`] for an unknown dtype or a value that does not
/// fit it.
pub fn build_flat(dtype: &str, data: &[serde_json::Value]) -> Result<ArrayRef> {
    fn collect<T>(
        data: &[serde_json::Value],
        dtype: &str,
        convert: impl Fn(&serde_json::Value) -> Option<T>,
    ) -> Result<Vec<T>> {
        data.iter()
            .enumerate()
            .map(|(i, v)| {
                convert(v).ok_or_else(|| {
                    Error::data(format!("element {i} ({v}) is not a valid {dtype}"))
                })
            })
            .collect()
    }

    fn int<T: TryFrom<i64>>(v: &serde_json::Value) -> Option<T> {
        v.as_i64().and_then(|n| T::try_from(n).ok())
    }

    fn uint<T: TryFrom<u64>>(v: &serde_json::Value) -> Option<T> {
        v.as_u64().and_then(|n| T::try_from(n).ok())
    }

    #[allow(clippy::cast_possible_truncation)]
    let array: ArrayRef = match dtype {
        "i8" => Arc::new(Int8Array::from(collect(data, dtype, int::<i8>)?)),
        "i16" => Arc::new(Int16Array::from(collect(data, dtype, int::<i16>)?)),
        "i32" => Arc::new(Int32Array::from(collect(data, dtype, int::<i32>)?)),
        "i64" => Arc::new(Int64Array::from(collect(data, dtype, int::<i64>)?)),
        "u8" => Arc::new(UInt8Array::from(collect(data, dtype, uint::<u8>)?)),
        "u16" => Arc::new(UInt16Array::from(collect(data, dtype, uint::<u16>)?)),
        "u32" => Arc::new(UInt32Array::from(collect(data, dtype, uint::<u32>)?)),
        "u64" => Arc::new(UInt64Array::from(collect(data, dtype, uint::<u64>)?)),
        "f32" => Arc::new(Float32Array::from(collect(data, dtype, |v| {
            float(v).map(|f| f as f32)
        })?)),
        "f64" => Arc::new(Float64Array::from(collect(data, dtype, float)?)),
        "bool" => Arc::new(BooleanArray::from(collect(data, dtype, |v| v.as_bool())?)),
        other => return Err(Error::data(format!("unknown dtype '{other}'"))),
    };
    Ok(array)
}

/// JSON has no NaN or infinity literals, so those travel as strings.
fn float(v: &serde_json::Value) -> Option<f64> {
    match v {
        serde_json::Value::String(s) => match s.as_str() {
            "nan" | "NaN" => Some(f64::NAN),
            "inf" | "Infinity" => Some(f64::INFINITY),
            "-inf" | "-Infinity" => Some(f64::NEG_INFINITY),
            _ => None,
        },
        other => other.as_f64(),
    }
}
