use std::fmt;

use serde::Deserialize;

/// PostgreSQL SQLSTATE for `undefined_table`.
pub const UNDEFINED_TABLE: &str = "42P01";
/// PostgREST code returned when a table is absent from its schema cache.
pub const PGRST_TABLE_NOT_FOUND: &str = "PGRST205";

/// All errors that can occur in the supabase-connect crates.
#[derive(Debug, thiserror::Error)]
pub enum SupabaseError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("PostgREST error ({status}): {message}")]
    PostgRest {
        status: u16,
        message: String,
        code: Option<String>,
        details: Option<String>,
        hint: Option<String>,
    },

    #[error("Query builder error: {0}")]
    QueryBuilder(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Expected exactly one row, but got none")]
    NoRows,

    #[error("Expected at most one row, but got {0}")]
    MultipleRows(usize),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SupabaseError {
    pub fn query_builder(msg: impl Into<String>) -> Self {
        Self::QueryBuilder(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn postgrest(status: u16, message: impl Into<String>, code: Option<String>) -> Self {
        Self::PostgRest {
            status,
            message: message.into(),
            code,
            details: None,
            hint: None,
        }
    }

    /// Build from a decoded PostgREST error body.
    pub fn from_body(status: u16, body: PostgrestErrorBody) -> Self {
        Self::PostgRest {
            status,
            message: body.message.unwrap_or_else(|| "Unknown error".to_string()),
            code: body.code,
            details: body.details,
            hint: body.hint,
        }
    }

    /// The PostgREST / SQLSTATE code, if the server supplied one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::PostgRest { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Whether this error reports that the target relation does not exist.
    ///
    /// Matches the Postgres and PostgREST codes, and falls back to the
    /// message text for servers that only send a string. Missing roles,
    /// columns or functions do not count.
    pub fn is_missing_table(&self) -> bool {
        if matches!(self.code(), Some(UNDEFINED_TABLE) | Some(PGRST_TABLE_NOT_FOUND)) {
            return true;
        }
        let text = self.to_string();
        (text.contains("relation") && text.contains("does not exist"))
            || text.contains("Could not find the table")
    }
}

impl From<serde_json::Error> for SupabaseError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for SupabaseError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl From<url::ParseError> for SupabaseError {
    fn from(e: url::ParseError) -> Self {
        Self::Config(format!("invalid Supabase URL: {e}"))
    }
}

/// Result alias using SupabaseError.
pub type SupabaseResult<T> = Result<T, SupabaseError>;

/// PostgREST error format: `{ "message", "code", "details", "hint" }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostgrestErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

/// HTTP status codes for response metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok,
    Created,
    NoContent,
    NotFound,
    InternalError,
    Other(u16),
}

impl StatusCode {
    pub fn from_u16(code: u16) -> Self {
        match code {
            200 => Self::Ok,
            201 => Self::Created,
            204 => Self::NoContent,
            404 => Self::NotFound,
            500 => Self::InternalError,
            other => Self::Other(other),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::NoContent => 204,
            Self::NotFound => 404,
            Self::InternalError => 500,
            Self::Other(code) => *code,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "200 OK"),
            Self::Created => write!(f, "201 Created"),
            Self::NoContent => write!(f, "204 No Content"),
            Self::NotFound => write!(f, "404 Not Found"),
            Self::InternalError => write!(f, "500 Internal Server Error"),
            Self::Other(code) => write!(f, "{code}"),
        }
    }
}
