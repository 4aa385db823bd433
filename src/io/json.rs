//! JSON export with numeric-type coercion

use crate::error::{Error, Result};
use crate::quant::QFormat;
use ndarray::Array0;
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// A value destined for a JSON export
///
/// Numeric-library scalars (`f32`, 0-d arrays, integer widths) collapse into
/// plain JSON numbers on conversion. Type objects are exported by name.
/// Values with no JSON form are carried as [`ExportValue::Unsupported`] and
/// rejected at export time.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    /// Non-finite values are written as `null`
    Float(f64),
    Str(String),
    List(Vec<ExportValue>),
    Map(BTreeMap<String, ExportValue>),
    /// Name of a type, e.g. `ExportValue::type_name::<f32>()` → `"f32"`
    TypeName(String),
    /// Value that cannot be exported; carries its type name for the error
    Unsupported { type_name: String },
}

impl ExportValue {
    /// The unqualified name of `T`, exported as a string
    pub fn type_name<T: ?Sized>() -> Self {
        ExportValue::TypeName(short_type_name::<T>())
    }

    /// Placeholder for a value of type `T` that has no JSON representation
    pub fn unsupported<T: ?Sized>() -> Self {
        ExportValue::Unsupported {
            type_name: short_type_name::<T>(),
        }
    }

    /// First unsupported value in depth-first order
    fn find_unsupported(&self) -> Option<&str> {
        match self {
            ExportValue::Unsupported { type_name } => Some(type_name),
            ExportValue::List(items) => items.iter().find_map(ExportValue::find_unsupported),
            ExportValue::Map(entries) => entries.values().find_map(ExportValue::find_unsupported),
            _ => None,
        }
    }
}

fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    // Strip module paths but keep generic arguments readable
    let base = full.split('<').next().unwrap_or(full);
    let short = base.rsplit("::").next().unwrap_or(base);
    format!("{short}{}", &full[base.len()..])
}

impl Serialize for ExportValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ExportValue::Null => serializer.serialize_unit(),
            ExportValue::Bool(b) => serializer.serialize_bool(*b),
            ExportValue::Int(i) => serializer.serialize_i64(*i),
            ExportValue::UInt(u) => serializer.serialize_u64(*u),
            ExportValue::Float(x) => serializer.serialize_f64(*x),
            ExportValue::Str(s) | ExportValue::TypeName(s) => serializer.serialize_str(s),
            ExportValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ExportValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            ExportValue::Unsupported { type_name } => Err(S::Error::custom(format!(
                "{type_name} not JSON serializable"
            ))),
        }
    }
}

macro_rules! export_from {
    ($variant:ident: $target:ty => $($source:ty),+) => {
        $(
            impl From<$source> for ExportValue {
                fn from(value: $source) -> Self {
                    ExportValue::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

export_from!(Int: i64 => i8, i16, i32, i64);
export_from!(UInt: u64 => u8, u16, u32, u64);
export_from!(Float: f64 => f32, f64);
export_from!(Bool: bool => bool);
export_from!(Str: String => String, &str);

impl From<usize> for ExportValue {
    fn from(value: usize) -> Self {
        ExportValue::UInt(value as u64)
    }
}

impl From<Array0<f32>> for ExportValue {
    fn from(value: Array0<f32>) -> Self {
        ExportValue::Float(f64::from(value.into_scalar()))
    }
}

impl From<Array0<f64>> for ExportValue {
    fn from(value: Array0<f64>) -> Self {
        ExportValue::Float(value.into_scalar())
    }
}

impl From<QFormat> for ExportValue {
    fn from(value: QFormat) -> Self {
        ExportValue::Str(value.to_string())
    }
}

impl<T: Into<ExportValue>> From<Option<T>> for ExportValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ExportValue::Null, Into::into)
    }
}

impl<T: Into<ExportValue>> From<Vec<T>> for ExportValue {
    fn from(values: Vec<T>) -> Self {
        ExportValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ExportValue>> From<BTreeMap<String, T>> for ExportValue {
    fn from(entries: BTreeMap<String, T>) -> Self {
        ExportValue::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// Serialize `data` to a JSON string
pub fn to_json_string(data: &BTreeMap<String, ExportValue>) -> Result<String> {
    check_exportable(data)?;
    serde_json::to_string(data)
        .map_err(|e| Error::Serialization(format!("JSON serialization failed: {e}")))
}

/// Write `data` to `path` as JSON
///
/// Fails with [`Error::NotSerializable`] before touching the file if any
/// value is unsupported.
///
/// ```no_run
/// use std::collections::BTreeMap;
/// use snnkit::io::{to_json, ExportValue};
///
/// let mut data = BTreeMap::new();
/// data.insert("accuracy".to_string(), ExportValue::from(0.93f32));
/// data.insert("dtype".to_string(), ExportValue::type_name::<f32>());
/// to_json(&data, "results.json").unwrap();
/// ```
pub fn to_json(data: &BTreeMap<String, ExportValue>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    check_exportable(data)?;

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, data)
        .map_err(|e| Error::Serialization(format!("JSON serialization failed: {e}")))?;
    writer.flush()?;

    tracing::debug!(path = %path.display(), entries = data.len(), "wrote JSON export");
    Ok(())
}

fn check_exportable(data: &BTreeMap<String, ExportValue>) -> Result<()> {
    match data.values().find_map(ExportValue::find_unsupported) {
        Some(type_name) => Err(Error::NotSerializable {
            type_name: type_name.to_string(),
        }),
        None => Ok(()),
    }
}
