pub mod sql;
pub mod table;
pub mod modifier;
pub mod postgrest;
pub mod postgrest_execute;
pub mod builder;
pub mod select;
pub mod insert;
pub mod rpc;

pub use sql::{CountOption, OrderDirection, SqlOperation, SqlParts};
pub use table::Table;
pub use modifier::Modifiable;
pub use builder::{QueryBuilder, TypedQueryBuilder};
pub use select::SelectBuilder;
pub use insert::InsertBuilder;
pub use rpc::RpcBuilder;

use serde_json::Value as JsonValue;
use supabase_connect_core::{SupabaseClient, SupabaseError};

/// Extension trait adding PostgREST query builders to SupabaseClient.
pub trait SupabaseClientQueryExt {
    /// Start a dynamic (string-based) query on a table.
    fn from(&self, table: &str) -> QueryBuilder;

    /// Start a typed query on a table using the Table trait.
    fn from_typed<T: Table>(&self) -> TypedQueryBuilder<T>;

    /// Call a stored procedure/function; rows come back as dynamic `Row`s.
    fn rpc(&self, function: &str, args: JsonValue) -> Result<RpcBuilder, SupabaseError>;
}

impl SupabaseClientQueryExt for SupabaseClient {
    fn from(&self, table: &str) -> QueryBuilder {
        QueryBuilder::new(self.clone(), self.schema().to_string(), table.to_string())
    }

    fn from_typed<T: Table>(&self) -> TypedQueryBuilder<T> {
        let schema = if T::schema_name() != "public" {
            T::schema_name().to_string()
        } else {
            self.schema().to_string()
        };
        TypedQueryBuilder::new(self.clone(), schema)
    }

    fn rpc(&self, function: &str, args: JsonValue) -> Result<RpcBuilder, SupabaseError> {
        RpcBuilder::new(self.clone(), self.schema().to_string(), function.to_string(), args)
    }
}
