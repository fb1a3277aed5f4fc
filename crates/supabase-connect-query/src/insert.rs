use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use supabase_connect_core::{SupabaseClient, SupabaseError, SupabaseResponse};

use crate::modifier::Modifiable;
use crate::postgrest::build_postgrest_insert;
use crate::postgrest_execute::execute_rest;
use crate::sql::SqlParts;

/// Builder for INSERT queries. Implements Modifiable (for count).
/// Call `.select()` to get the inserted rows back.
pub struct InsertBuilder<T> {
    pub(crate) client: SupabaseClient,
    pub(crate) parts: SqlParts,
    pub(crate) values: JsonValue,
    pub(crate) error: Option<SupabaseError>,
    pub(crate) _marker: PhantomData<T>,
}

impl<T> Modifiable for InsertBuilder<T> {
    fn parts_mut(&mut self) -> &mut SqlParts {
        &mut self.parts
    }
}

impl<T> InsertBuilder<T> {
    /// Request `return=representation` so inserted rows come back.
    pub fn select(mut self) -> Self {
        self.parts.returning = true;
        self
    }

    /// The JSON body that will be sent.
    pub fn values(&self) -> &JsonValue {
        &self.values
    }
}

impl<T> InsertBuilder<T>
where
    T: DeserializeOwned + Send,
{
    /// Execute the INSERT query.
    pub async fn execute(self) -> SupabaseResponse<T> {
        if let Some(err) = self.error {
            return SupabaseResponse::error(err);
        }
        let (url, headers, body) =
            match build_postgrest_insert(&self.client.rest_url(), &self.parts, &self.values) {
                Ok(built) => built,
                Err(e) => return SupabaseResponse::error(e),
            };
        execute_rest(&self.client, reqwest::Method::POST, &url, headers, Some(body), &self.parts)
            .await
    }
}
