use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use url::Url;

use crate::config::SupabaseConfig;
use crate::error::{SupabaseError, SupabaseResult};

/// Handle to a hosted Supabase project.
///
/// Wraps a shared HTTP client that already carries the `apikey` and bearer
/// headers, so cloning is cheap and every request is authenticated.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    config: Arc<SupabaseConfig>,
    base_url: Url,
}

impl SupabaseClient {
    /// Create a new client from a configuration.
    ///
    /// Fails if the project URL does not parse or the key cannot be sent as a header.
    pub fn new(config: SupabaseConfig) -> SupabaseResult<Self> {
        let base_url = Url::parse(config.supabase_url.trim_end_matches('/'))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(SupabaseError::config(format!(
                "unsupported URL scheme: {}",
                base_url.scheme()
            )));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            "apikey",
            HeaderValue::from_str(&config.supabase_key)
                .map_err(|e| SupabaseError::config(format!("Invalid API key header: {e}")))?,
        );
        default_headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.supabase_key))
                .map_err(|e| SupabaseError::config(format!("Invalid auth header: {e}")))?,
        );

        let mut builder = reqwest::Client::builder().default_headers(default_headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        tracing::debug!(url = %base_url, schema = %config.schema, "Created Supabase client");

        Ok(Self {
            http,
            config: Arc::new(config),
            base_url,
        })
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The parsed project URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Project URL as configured (no trailing slash).
    pub fn supabase_url(&self) -> &str {
        self.config.supabase_url.trim_end_matches('/')
    }

    /// Base URL of the PostgREST API.
    pub fn rest_url(&self) -> String {
        self.config.rest_url()
    }

    /// Get the default schema.
    pub fn schema(&self) -> &str {
        &self.config.schema
    }

    /// Get the full config.
    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }
}
