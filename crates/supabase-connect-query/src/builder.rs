use std::marker::PhantomData;

use serde::Serialize;
use serde_json::Value as JsonValue;

use supabase_connect_core::{Row, SupabaseClient, SupabaseError};

use crate::insert::InsertBuilder;
use crate::select::SelectBuilder;
use crate::sql::{SqlOperation, SqlParts, validate_column_name, validate_identifier};
use crate::table::Table;

/// Entry point query builder created by `client.from("table")`.
///
/// Call `.select()` or `.insert()` to specialize into the appropriate builder type.
/// An invalid table name is reported when the query executes.
pub struct QueryBuilder {
    client: SupabaseClient,
    schema: String,
    table: String,
}

impl QueryBuilder {
    pub fn new(client: SupabaseClient, schema: String, table: String) -> Self {
        Self {
            client,
            schema,
            table,
        }
    }

    fn parts(&self, operation: SqlOperation) -> (SqlParts, Option<SupabaseError>) {
        let error = validate_identifier(&self.table, "Table").err();
        (SqlParts::new(operation, &self.schema, &self.table), error)
    }

    /// Start a SELECT query.
    /// Pass column expressions like "content, created_at" or "*".
    pub fn select(self, columns: &str) -> SelectBuilder<Row> {
        let (mut parts, mut error) = self.parts(SqlOperation::Select);
        if error.is_none() {
            match parse_columns(columns) {
                Ok(cols) => parts.select_columns = cols,
                Err(e) => error = Some(e),
            }
        }

        SelectBuilder {
            client: self.client,
            parts,
            error,
            _marker: PhantomData,
        }
    }

    /// Start an INSERT query with a single row.
    pub fn insert(self, row: Row) -> InsertBuilder<Row> {
        let (parts, error) = self.parts(SqlOperation::Insert);
        let values = JsonValue::Object(row.into_inner().into_iter().collect());

        InsertBuilder {
            client: self.client,
            parts,
            values,
            error,
            _marker: PhantomData,
        }
    }
}

/// Typed query builder created by `client.from_typed::<T>()`.
pub struct TypedQueryBuilder<T: Table> {
    client: SupabaseClient,
    schema: String,
    _marker: PhantomData<T>,
}

impl<T: Table> TypedQueryBuilder<T> {
    pub fn new(client: SupabaseClient, schema: String) -> Self {
        Self {
            client,
            schema,
            _marker: PhantomData,
        }
    }

    fn parts(&self, operation: SqlOperation) -> SqlParts {
        SqlParts::new(operation, &self.schema, T::table_name())
    }

    /// Start a SELECT of all columns.
    pub fn select(self) -> SelectBuilder<T> {
        let parts = self.parts(SqlOperation::Select);
        SelectBuilder {
            client: self.client,
            parts,
            error: None,
            _marker: PhantomData,
        }
    }

    /// Start a SELECT of specific columns; each must be a column of `T`.
    pub fn select_columns(self, columns: &str) -> SelectBuilder<T> {
        let mut parts = self.parts(SqlOperation::Select);
        let mut error = None;
        match parse_columns(columns) {
            Ok(cols) => {
                if let Some(unknown) = cols
                    .as_deref()
                    .into_iter()
                    .flat_map(|c| c.split(','))
                    .find(|c| !T::has_column(c))
                {
                    error = Some(SupabaseError::query_builder(format!(
                        "Unknown column {unknown:?} for table {}",
                        T::table_name()
                    )));
                }
                parts.select_columns = cols;
            }
            Err(e) => error = Some(e),
        }

        SelectBuilder {
            client: self.client,
            parts,
            error,
            _marker: PhantomData,
        }
    }

    /// Start an INSERT of a serializable value.
    ///
    /// The value must serialize to a JSON object whose keys are insertable columns of `T`.
    pub fn insert<V: Serialize>(self, value: &V) -> InsertBuilder<T> {
        let parts = self.parts(SqlOperation::Insert);
        let (values, error) = match serde_json::to_value(value) {
            Ok(JsonValue::Object(map)) => {
                let error = map
                    .keys()
                    .find(|k| !T::insertable_columns().contains(&k.as_str()))
                    .map(|k| {
                        SupabaseError::query_builder(format!(
                            "Column {k:?} is not insertable on table {}",
                            T::table_name()
                        ))
                    });
                (JsonValue::Object(map), error)
            }
            Ok(other) => (
                other,
                Some(SupabaseError::query_builder(
                    "Insert value must serialize to a JSON object",
                )),
            ),
            Err(e) => (JsonValue::Null, Some(e.into())),
        };

        InsertBuilder {
            client: self.client,
            parts,
            values,
            error,
            _marker: PhantomData,
        }
    }
}

/// Normalize a column list; `*` or empty selects everything.
fn parse_columns(columns: &str) -> Result<Option<String>, SupabaseError> {
    let trimmed = columns.trim();
    if trimmed.is_empty() || trimmed == "*" {
        return Ok(None);
    }
    let cols = trimmed
        .split(',')
        .map(|c| c.trim().trim_matches('"'))
        .map(|c| validate_column_name(c).map(|_| c))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(cols.join(",")))
}
