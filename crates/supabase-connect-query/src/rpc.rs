use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use supabase_connect_core::{Row, SupabaseClient, SupabaseError, SupabaseResponse};

use crate::postgrest::build_postgrest_rpc;
use crate::postgrest_execute::execute_rest;
use crate::sql::{SqlOperation, SqlParts, validate_identifier};

/// Builder for RPC (function call) queries, `POST /rest/v1/rpc/<function>`.
pub struct RpcBuilder<T = Row> {
    client: SupabaseClient,
    parts: SqlParts,
    args: JsonValue,
    _marker: PhantomData<T>,
}

impl<T> RpcBuilder<T> {
    /// Validate the function and argument names and create the builder.
    ///
    /// Arguments must be a JSON object (named parameters) or null.
    pub fn new(
        client: SupabaseClient,
        schema: String,
        function: String,
        args: JsonValue,
    ) -> Result<Self, SupabaseError> {
        validate_identifier(&function, "Function")?;

        match &args {
            JsonValue::Object(map) => {
                for key in map.keys() {
                    validate_identifier(key, "Parameter")?;
                }
            }
            JsonValue::Null => {}
            _ => {
                return Err(SupabaseError::query_builder(
                    "RPC arguments must be a JSON object or null",
                ))
            }
        }

        Ok(Self {
            client,
            parts: SqlParts::new(SqlOperation::Rpc, &schema, &function),
            args,
            _marker: PhantomData,
        })
    }

    /// Deserialize results into `U` instead.
    pub fn returns<U>(self) -> RpcBuilder<U> {
        RpcBuilder {
            client: self.client,
            parts: self.parts,
            args: self.args,
            _marker: PhantomData,
        }
    }

    /// Name of the function being called.
    pub fn function(&self) -> &str {
        &self.parts.table
    }
}

impl<T> RpcBuilder<T>
where
    T: DeserializeOwned + Send,
{
    /// Execute the RPC call.
    pub async fn execute(self) -> SupabaseResponse<T> {
        let (url, headers, body) =
            match build_postgrest_rpc(&self.client.rest_url(), &self.parts, &self.args) {
                Ok(built) => built,
                Err(e) => return SupabaseResponse::error(e),
            };
        execute_rest(&self.client, reqwest::Method::POST, &url, headers, Some(body), &self.parts)
            .await
    }
}
