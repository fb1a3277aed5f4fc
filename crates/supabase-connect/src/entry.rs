use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use supabase_connect_query::Table;

use crate::schema::TABLE_NAME;

/// A row of `text_entries` as returned by PostgREST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextEntry {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub ip_address: Option<String>,
}

impl Table for TextEntry {
    fn table_name() -> &'static str {
        TABLE_NAME
    }

    fn column_names() -> &'static [&'static str] {
        &["id", "content", "created_at", "ip_address"]
    }

    fn insertable_columns() -> &'static [&'static str] {
        &["content", "ip_address"]
    }
}

impl fmt::Display for TextEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.content, self.created_at.to_rfc3339())
    }
}

/// Insert payload; `id` and `created_at` are generated by the database.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTextEntry {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

impl NewTextEntry {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ip_address: None,
        }
    }

    pub fn ip_address(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_postgrest_row() {
        let json = r#"{
            "id": "0b6f5a0e-5d1c-4c1e-9d59-3e1f6f0d8a11",
            "content": "hello",
            "created_at": "2025-03-29T12:30:00.123456+00:00",
            "ip_address": null
        }"#;
        let entry: TextEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.content, "hello");
        assert_eq!(entry.ip_address, None);
        assert_eq!(entry.created_at.timestamp(), 1743251400);
    }

    #[test]
    fn test_deserialize_without_ip_column() {
        let json = r#"{"id":"0b6f5a0e-5d1c-4c1e-9d59-3e1f6f0d8a11","content":"x","created_at":"2025-03-29T12:30:00Z"}"#;
        let entry: TextEntry = serde_json::from_str(json).unwrap();
        assert!(entry.ip_address.is_none());
    }

    #[test]
    fn test_new_entry_omits_missing_ip() {
        let body = serde_json::to_value(NewTextEntry::new("hi")).unwrap();
        assert_eq!(body, serde_json::json!({"content": "hi"}));

        let body = serde_json::to_value(NewTextEntry::new("hi").ip_address("10.0.0.1")).unwrap();
        assert_eq!(body["ip_address"], "10.0.0.1");
    }

    #[test]
    fn test_display() {
        let entry: TextEntry = serde_json::from_str(
            r#"{"id":"0b6f5a0e-5d1c-4c1e-9d59-3e1f6f0d8a11","content":"hi","created_at":"2025-03-29T12:30:00Z"}"#,
        )
        .unwrap();
        assert_eq!(entry.to_string(), "hi - 2025-03-29T12:30:00+00:00");
    }

    #[test]
    fn test_table_metadata() {
        assert_eq!(TextEntry::table_name(), "text_entries");
        assert!(TextEntry::has_column("created_at"));
        assert!(!TextEntry::insertable_columns().contains(&"id"));
    }
}
