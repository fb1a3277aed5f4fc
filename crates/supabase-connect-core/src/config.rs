use std::fmt;
use std::time::Duration;

use crate::error::{SupabaseError, SupabaseResult};

/// Environment variable holding the project URL.
pub const ENV_URL: &str = "SUPABASE_URL";
/// Environment variable holding the anon key.
pub const ENV_ANON_KEY: &str = "SUPABASE_ANON_KEY";
/// Accepted fallback for the key.
pub const ENV_KEY: &str = "SUPABASE_KEY";
/// Optional schema override.
pub const ENV_SCHEMA: &str = "SUPABASE_SCHEMA";

/// Configuration for connecting to a hosted Supabase project over PostgREST.
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Project URL (e.g. "https://xyzcompany.supabase.co")
    pub supabase_url: String,
    /// Anon or service key, sent as `apikey` and bearer token
    pub supabase_key: String,
    /// Default schema (defaults to "public")
    pub schema: String,
    /// Per-request timeout; `None` keeps the HTTP client default
    pub timeout: Option<Duration>,
}

impl SupabaseConfig {
    /// Create a new config from a project URL and an API key.
    pub fn new(supabase_url: impl Into<String>, supabase_key: impl Into<String>) -> Self {
        Self {
            supabase_url: supabase_url.into(),
            supabase_key: supabase_key.into(),
            schema: "public".to_string(),
            timeout: None,
        }
    }

    /// Build a config from `SUPABASE_URL` and `SUPABASE_ANON_KEY` (or `SUPABASE_KEY`).
    ///
    /// `SUPABASE_SCHEMA` overrides the default schema when set.
    pub fn from_env() -> SupabaseResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> SupabaseResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let url = non_empty(ENV_URL)
            .ok_or_else(|| SupabaseError::config(format!("{ENV_URL} is not set")))?;
        let key = non_empty(ENV_ANON_KEY)
            .or_else(|| non_empty(ENV_KEY))
            .ok_or_else(|| {
                SupabaseError::config(format!("{ENV_ANON_KEY} (or {ENV_KEY}) is not set"))
            })?;

        let mut config = Self::new(url, key);
        if let Some(schema) = non_empty(ENV_SCHEMA) {
            config.schema = schema;
        }
        Ok(config)
    }

    /// Set the default schema.
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Base URL of the PostgREST API (`{supabase_url}/rest/v1`).
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.supabase_url.trim_end_matches('/'))
    }
}

// Keep the key out of logs.
impl fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("supabase_url", &self.supabase_url)
            .field("supabase_key", &"<redacted>")
            .field("schema", &self.schema)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_new_defaults() {
        let config = SupabaseConfig::new("https://example.supabase.co", "anon");
        assert_eq!(config.schema, "public");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_rest_url_trims_trailing_slash() {
        let config = SupabaseConfig::new("https://example.supabase.co/", "anon");
        assert_eq!(config.rest_url(), "https://example.supabase.co/rest/v1");
    }

    #[test]
    fn test_builder_setters() {
        let config = SupabaseConfig::new("https://example.supabase.co", "anon")
            .schema("demo")
            .timeout(Duration::from_secs(5));
        assert_eq!(config.schema, "demo");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_from_lookup_anon_key() {
        let config = SupabaseConfig::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "https://example.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();
        assert_eq!(config.supabase_url, "https://example.supabase.co");
        assert_eq!(config.supabase_key, "anon");
        assert_eq!(config.schema, "public");
    }

    #[test]
    fn test_from_lookup_key_fallback_and_schema() {
        let config = SupabaseConfig::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "https://example.supabase.co"),
            ("SUPABASE_KEY", "fallback"),
            ("SUPABASE_SCHEMA", "demo"),
        ]))
        .unwrap();
        assert_eq!(config.supabase_key, "fallback");
        assert_eq!(config.schema, "demo");
    }

    #[test]
    fn test_from_lookup_missing_url() {
        let err = SupabaseConfig::from_lookup(lookup_from(&[("SUPABASE_ANON_KEY", "anon")]))
            .unwrap_err();
        assert!(matches!(err, SupabaseError::Config(ref msg) if msg.contains("SUPABASE_URL")));
    }

    #[test]
    fn test_from_lookup_blank_key_is_missing() {
        let err = SupabaseConfig::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "https://example.supabase.co"),
            ("SUPABASE_ANON_KEY", "  "),
        ]))
        .unwrap_err();
        assert!(matches!(err, SupabaseError::Config(_)));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = SupabaseConfig::new("https://example.supabase.co", "super-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
