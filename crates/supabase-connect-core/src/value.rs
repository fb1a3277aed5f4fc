use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// A dynamic row: column name to JSON value.
/// Returned by RPC calls and string-based queries that have no typed struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Row(pub HashMap<String, JsonValue>);

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Set a column value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Whether the row has `column`.
    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    /// Decode `column` into `T`; `None` when absent or of another shape.
    pub fn get_as<T: serde::de::DeserializeOwned>(&self, column: &str) -> Option<T> {
        self.0
            .get(column)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn into_inner(self) -> HashMap<String, JsonValue> {
        self.0
    }
}

/// Macro for constructing a `Row` with key-value pairs.
///
/// # Examples
/// ```
/// use supabase_connect_core::row;
/// let row = row![("content", "hello"), ("ip_address", "10.0.0.1")];
/// ```
#[macro_export]
macro_rules! row {
    () => {
        $crate::Row::new()
    };
    ($(($key:expr, $val:expr)),+ $(,)?) => {{
        let mut row = $crate::Row::new();
        $(
            row.set($key, serde_json::json!($val));
        )+
        row
    }};
}
