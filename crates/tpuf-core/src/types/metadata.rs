//! Metadata values attached to documents and remote records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Metadata map attached to a [`Document`](super::Document).
pub type Metadata = HashMap<String, MetadataValue>;

/// A single metadata or attribute value.
///
/// The set of variants is closed: scalars, `null`, and lists of those.
/// Serialized untagged, so a value maps to the plain JSON scalar or array.
///
/// # Examples
///
/// ```rust
/// use tpuf_core::MetadataValue;
///
/// let value = MetadataValue::from("docs/intro.md");
/// assert_eq!(value.as_str(), Some("docs/intro.md"));
///
/// let tags = MetadataValue::from(vec!["a", "b"]);
/// assert_eq!(serde_json::to_string(&tags).unwrap(), r#"["a","b"]"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Absent value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integral number.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
    /// Text value.
    String(String),
    /// Ordered list of values.
    List(Vec<MetadataValue>),
}

impl MetadataValue {
    /// Returns `true` for [`MetadataValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the text if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if this is a bool value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an integral value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the number as `f64` for integral and floating-point values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the elements if this is a list value.
    pub fn as_list(&self) -> Option<&[MetadataValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for MetadataValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for MetadataValue {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for MetadataValue {
    fn from(value: f32) -> Self {
        Self::Float(value.into())
    }
}

impl<T: Into<MetadataValue>> From<Vec<T>> for MetadataValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<MetadataValue>> From<Option<T>> for MetadataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_serialization() {
        let values = vec![
            MetadataValue::Null,
            MetadataValue::from(true),
            MetadataValue::from(7),
            MetadataValue::from(0.5),
            MetadataValue::from("text"),
            MetadataValue::from(vec![1, 2]),
        ];

        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,true,7,0.5,"text",[1,2]]"#);
    }

    #[test]
    fn test_deserialization_prefers_integers() {
        let values: Vec<MetadataValue> = serde_json::from_str("[3, 3.25, null]").unwrap();
        assert_eq!(values[0], MetadataValue::Integer(3));
        assert_eq!(values[1], MetadataValue::Float(3.25));
        assert!(values[2].is_null());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(MetadataValue::from("a").as_str(), Some("a"));
        assert_eq!(MetadataValue::from(2).as_f64(), Some(2.0));
        assert_eq!(MetadataValue::from(false).as_bool(), Some(false));
        assert_eq!(MetadataValue::from(2).as_str(), None);
        assert_eq!(
            MetadataValue::from(vec!["x"]).as_list(),
            Some(&[MetadataValue::from("x")][..])
        );
        assert!(MetadataValue::from(None::<String>).is_null());
    }
}
