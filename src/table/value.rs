//! Scalar cell values and their conversion from Arrow arrays.

use std::fmt;

use arrow::array::{
    Array, Float16Array, Float32Array, Float64Array, Int16Array, Int32Array, Int64Array,
    Int8Array, LargeStringArray, StringArray, StringViewArray, UInt16Array, UInt32Array,
    UInt64Array, UInt8Array,
};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;

use crate::error::Result;

/// A single cell of a record.
///
/// Tables coming from spreadsheet exports only carry text, numbers and
/// holes, so anything richer (dates, booleans, binaries) is kept as its
/// display text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null or missing cell.
    Empty,
    /// Text cell, stored verbatim.
    Text(String),
    /// Integer cell.
    Int(i64),
    /// Floating point cell. Never NaN.
    Float(f64),
}

impl Value {
    /// Build a text value, mapping `None` to [`Value::Empty`].
    pub fn text(s: Option<impl Into<String>>) -> Self {
        s.map_or(Self::Empty, |s| Self::Text(s.into()))
    }

    /// Build a float value; NaN is a hole in spreadsheet exports.
    #[must_use]
    pub fn float(v: f64) -> Self {
        if v.is_nan() {
            Self::Empty
        } else {
            Self::Float(v)
        }
    }

    /// Whether the value is absent or whitespace-only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Int(_) | Self::Float(_) => false,
        }
    }

    /// The display string of a non-blank value.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        if self.is_blank() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::float(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Empty, Into::into)
    }
}

/// Read the value at `row` of an Arrow array.
///
/// Out-of-range rows and nulls both yield [`Value::Empty`].
pub fn value_at(array: &dyn Array, row: usize) -> Result<Value> {
    if row >= array.len() || array.is_null(row) {
        return Ok(Value::Empty);
    }

    let value = match array.data_type() {
        DataType::Null => Some(Value::Empty),

        DataType::Utf8 => downcast::<StringArray>(array).map(|a| Value::from(a.value(row))),
        DataType::LargeUtf8 => {
            downcast::<LargeStringArray>(array).map(|a| Value::from(a.value(row)))
        }
        DataType::Utf8View => {
            downcast::<StringViewArray>(array).map(|a| Value::from(a.value(row)))
        }

        DataType::Int8 => downcast::<Int8Array>(array).map(|a| Value::Int(a.value(row).into())),
        DataType::Int16 => downcast::<Int16Array>(array).map(|a| Value::Int(a.value(row).into())),
        DataType::Int32 => downcast::<Int32Array>(array).map(|a| Value::Int(a.value(row).into())),
        DataType::Int64 => downcast::<Int64Array>(array).map(|a| Value::Int(a.value(row))),
        DataType::UInt8 => downcast::<UInt8Array>(array).map(|a| Value::Int(a.value(row).into())),
        DataType::UInt16 => {
            downcast::<UInt16Array>(array).map(|a| Value::Int(a.value(row).into()))
        }
        DataType::UInt32 => {
            downcast::<UInt32Array>(array).map(|a| Value::Int(a.value(row).into()))
        }
        DataType::UInt64 => downcast::<UInt64Array>(array).map(|a| {
            let v = a.value(row);
            i64::try_from(v).map_or_else(|_| Value::Text(v.to_string()), Value::Int)
        }),

        DataType::Float16 => {
            downcast::<Float16Array>(array).map(|a| Value::float(a.value(row).to_f64()))
        }
        DataType::Float32 => {
            downcast::<Float32Array>(array).map(|a| Value::float(f64::from(a.value(row))))
        }
        DataType::Float64 => downcast::<Float64Array>(array).map(|a| Value::float(a.value(row))),

        _ => None,
    };

    match value {
        Some(v) => Ok(v),
        // Dates, booleans, decimals and anything else: keep the display text.
        None => Ok(Value::Text(array_value_to_string(array, row)?)),
    }
}

fn downcast<T: 'static>(array: &dyn Array) -> Option<&T> {
    array.as_any().downcast_ref::<T>()
}
