use supabase_connect_core::SupabaseError;

// --- Order / Modifier types ---

#[derive(Debug, Clone)]
pub struct OrderClause {
    pub column: String,
    pub direction: OrderDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Ascending,
    Descending,
}

impl OrderDirection {
    /// PostgREST `order=` suffix.
    pub fn as_postgrest(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Count mode for responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountOption {
    /// No count requested.
    None,
    /// Exact count (`Prefer: count=exact`).
    Exact,
}

// --- Query Parts ---

/// The type of request being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlOperation {
    Select,
    Insert,
    Rpc,
}

/// Collects all the components of a PostgREST request being built.
#[derive(Debug, Clone)]
pub struct SqlParts {
    pub operation: SqlOperation,
    pub schema: String,
    /// Table name, or function name for RPC.
    pub table: String,
    /// Column list for `select=`; `None` means `*`.
    pub select_columns: Option<String>,
    pub orders: Vec<OrderClause>,
    pub limit: Option<i64>,
    /// Ask the server to return written rows.
    pub returning: bool,
    pub single: bool,
    pub maybe_single: bool,
    pub count: CountOption,
}

impl SqlParts {
    pub fn new(operation: SqlOperation, schema: &str, table: &str) -> Self {
        Self {
            operation,
            schema: schema.to_string(),
            table: table.to_string(),
            select_columns: None,
            orders: Vec::new(),
            limit: None,
            returning: false,
            single: false,
            maybe_single: false,
            count: CountOption::None,
        }
    }

    /// Whether the schema differs from the PostgREST default and needs a profile header.
    pub fn needs_profile(&self) -> bool {
        self.schema != "public"
    }
}

// --- Validation ---

const PROHIBITED: &[char] = &['"', ';', '&', '?', '#', '/', '='];

/// Validate a column name.
pub fn validate_column_name(name: &str) -> Result<(), SupabaseError> {
    validate_identifier(name, "Column")
}

/// Validate a table, schema, function, or parameter name.
pub fn validate_identifier(name: &str, kind: &str) -> Result<(), SupabaseError> {
    if name.trim().is_empty() {
        return Err(SupabaseError::query_builder(format!(
            "{kind} name cannot be empty"
        )));
    }
    if name.contains(PROHIBITED) || name.contains("--") || name.chars().any(char::is_whitespace) {
        return Err(SupabaseError::query_builder(format!(
            "Invalid {kind} name: {name:?} (contains prohibited characters)"
        )));
    }
    Ok(())
}
