/// Trait for typed table mapping, implemented manually per row type.
///
/// Provides the metadata the typed builders need to address the table and
/// validate column names before a request is sent.
pub trait Table: Sized + Send + serde::de::DeserializeOwned {
    /// The database table name (e.g. "text_entries").
    fn table_name() -> &'static str;

    /// The schema name (defaults to "public").
    fn schema_name() -> &'static str {
        "public"
    }

    /// All column names.
    fn column_names() -> &'static [&'static str];

    /// Columns that can be inserted (excludes server-generated columns).
    fn insertable_columns() -> &'static [&'static str];

    /// Whether `column` belongs to this table.
    fn has_column(column: &str) -> bool {
        Self::column_names().contains(&column)
    }
}
