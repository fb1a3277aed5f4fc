use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use supabase_connect_core::{SupabaseClient, SupabaseError, SupabaseResponse};

use crate::modifier::Modifiable;
use crate::postgrest::build_postgrest_select;
use crate::postgrest_execute::execute_rest;
use crate::sql::SqlParts;

/// Builder for SELECT queries.
pub struct SelectBuilder<T> {
    pub(crate) client: SupabaseClient,
    pub(crate) parts: SqlParts,
    pub(crate) error: Option<SupabaseError>,
    pub(crate) _marker: PhantomData<T>,
}

impl<T> Modifiable for SelectBuilder<T> {
    fn parts_mut(&mut self) -> &mut SqlParts {
        &mut self.parts
    }
}

impl<T> SelectBuilder<T> {
    /// Override the schema for this query (sent as `Accept-Profile`).
    pub fn schema(mut self, schema: &str) -> Self {
        self.parts.schema = schema.to_string();
        self
    }

    /// The request parts as built so far.
    pub fn parts(&self) -> &SqlParts {
        &self.parts
    }
}

impl<T> SelectBuilder<T>
where
    T: DeserializeOwned + Send,
{
    /// Execute the SELECT query and return results.
    pub async fn execute(self) -> SupabaseResponse<T> {
        if let Some(err) = self.error {
            return SupabaseResponse::error(err);
        }
        let (url, headers) = match build_postgrest_select(&self.client.rest_url(), &self.parts) {
            Ok(built) => built,
            Err(e) => return SupabaseResponse::error(e),
        };
        execute_rest(&self.client, reqwest::Method::GET, &url, headers, None, &self.parts).await
    }
}
