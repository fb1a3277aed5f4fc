use serde_json::json;
use tracing::{debug, error, info, warn};

use supabase_connect_core::{SupabaseClient, SupabaseConfig, SupabaseResult};
use supabase_connect_query::{Modifiable, OrderDirection, SupabaseClientQueryExt};

use crate::entry::{NewTextEntry, TextEntry};
use crate::schema::{self, DEFAULT_SQL_FUNCTION, TABLE_NAME};

/// Outcome of a connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// The API answered and the table is readable.
    Connected,
    /// The API answered but the table does not exist.
    TableMissing,
    /// Any other failure (network, auth, server error).
    Unreachable(String),
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// Runs the `text_entries` operations against one Supabase project.
///
/// Public operations never fail: errors are logged and turned into
/// `false`, `None` or an empty list.
#[derive(Debug, Clone)]
pub struct TextEntryManager {
    client: SupabaseClient,
    sql_function: String,
}

impl TextEntryManager {
    /// Create a manager from a project URL and API key.
    pub fn new(supabase_url: &str, api_key: &str) -> SupabaseResult<Self> {
        Self::from_config(SupabaseConfig::new(supabase_url, api_key))
    }

    /// Create a manager from a full configuration.
    pub fn from_config(config: SupabaseConfig) -> SupabaseResult<Self> {
        let client = SupabaseClient::new(config)?;
        info!(url = %client.supabase_url(), "Connected to Supabase project");
        Ok(Self {
            client,
            sql_function: DEFAULT_SQL_FUNCTION.to_string(),
        })
    }

    /// Use a different remote procedure for [`execute_sql`](Self::execute_sql).
    pub fn with_sql_function(mut self, function: impl Into<String>) -> Self {
        self.sql_function = function.into();
        self
    }

    pub fn client(&self) -> &SupabaseClient {
        &self.client
    }

    pub fn sql_function(&self) -> &str {
        &self.sql_function
    }

    /// Read at most one row to check the API and the table.
    pub async fn probe(&self) -> ConnectionStatus {
        debug!(table = TABLE_NAME, "Probing connection");
        match self.try_probe().await {
            Ok(()) => {
                info!("Connection to Supabase API successful");
                ConnectionStatus::Connected
            }
            Err(e) if e.is_missing_table() => {
                warn!(table = TABLE_NAME, error = %e, "Connected, but table does not exist");
                ConnectionStatus::TableMissing
            }
            Err(e) => {
                error!(error = %e, "Error testing connection");
                ConnectionStatus::Unreachable(e.to_string())
            }
        }
    }

    /// `true` when the API is reachable and the table exists.
    pub async fn test_connection(&self) -> bool {
        self.probe().await.is_connected()
    }

    /// Insert one entry and return the stored row.
    pub async fn create_text_entry(&self, content: &str) -> Option<TextEntry> {
        self.insert_entry(NewTextEntry::new(content)).await
    }

    /// Insert one entry recording the client's IP address.
    pub async fn create_text_entry_with_ip(
        &self,
        content: &str,
        ip_address: &str,
    ) -> Option<TextEntry> {
        self.insert_entry(NewTextEntry::new(content).ip_address(ip_address))
            .await
    }

    /// The `limit` most recent entries, newest first.
    pub async fn list_text_entries(&self, limit: i64) -> Vec<TextEntry> {
        match self.try_list(limit).await {
            Ok(entries) => {
                info!(count = entries.len(), "Retrieved text entries");
                entries
            }
            Err(e) => {
                error!(error = %e, "Error listing text entries");
                Vec::new()
            }
        }
    }

    /// Run arbitrary SQL through the remote procedure.
    pub async fn execute_sql(&self, sql: &str) -> bool {
        match self.try_execute_sql(sql).await {
            Ok(()) => {
                info!(function = %self.sql_function, "SQL executed");
                true
            }
            Err(e) => {
                error!(function = %self.sql_function, error = %e, "Error executing SQL");
                false
            }
        }
    }

    /// Create the table and its anonymous-access policies.
    pub async fn create_table(&self) -> bool {
        info!(table = TABLE_NAME, "Creating table");
        self.execute_sql(&schema::setup_sql()).await
    }

    async fn insert_entry(&self, entry: NewTextEntry) -> Option<TextEntry> {
        match self.try_insert(&entry).await {
            Ok(created) => {
                info!(id = %created.id, content = %created.content, "Created new text entry");
                Some(created)
            }
            Err(e) => {
                error!(error = %e, "Error creating text entry");
                None
            }
        }
    }

    async fn try_probe(&self) -> SupabaseResult<()> {
        self.client
            .from_typed::<TextEntry>()
            .select()
            .limit(1)
            .execute()
            .await
            .into_result()
            .map(|_| ())
    }

    async fn try_insert(&self, entry: &NewTextEntry) -> SupabaseResult<TextEntry> {
        self.client
            .from_typed::<TextEntry>()
            .insert(entry)
            .select()
            .execute()
            .await
            .into_single()
    }

    async fn try_list(&self, limit: i64) -> SupabaseResult<Vec<TextEntry>> {
        self.client
            .from_typed::<TextEntry>()
            .select()
            .order("created_at", OrderDirection::Descending)
            .limit(limit)
            .execute()
            .await
            .into_result()
    }

    async fn try_execute_sql(&self, sql: &str) -> SupabaseResult<()> {
        self.client
            .rpc(&self.sql_function, json!({ "sql": sql }))?
            .execute()
            .await
            .into_result()
            .map(|_| ())
    }
}
