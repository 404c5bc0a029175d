//! Attribute filters passed through to the service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Filter expression forwarded verbatim in the `filters` field.
///
/// The expression language belongs to the service; it is neither parsed
/// nor validated here.
///
/// ```rust
/// use tpuf_vector::Filters;
///
/// let filters = Filters::new(serde_json::json!({ "source": ["Eq", "a.md"] }));
/// assert!(filters.as_value().is_object());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filters(Value);

impl Filters {
    /// Wraps a filter expression.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the wrapped expression.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Returns the wrapped expression by value.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Filters {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serializes_verbatim() {
        let expr = json!(["And", [["source", "Eq", "a.md"], ["page", "Gt", 2]]]);
        let filters = Filters::from(expr.clone());

        assert_eq!(serde_json::to_value(&filters).unwrap(), expr);
        assert_eq!(filters.into_value(), expr);
    }
}
