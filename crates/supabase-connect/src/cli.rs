use std::time::Duration;

use clap::Parser;

use supabase_connect_core::config::{ENV_ANON_KEY, ENV_URL};
use supabase_connect_core::{SupabaseConfig, SupabaseResult};

use crate::runner::{RunOptions, DEFAULT_CONTENT, DEFAULT_LIMIT};
use crate::schema::DEFAULT_SQL_FUNCTION;

/// Probe a Supabase project, insert a sample text entry, and list recent entries.
///
/// Credentials are read from the environment (or a `.env` file) unless given
/// on the command line.
#[derive(Debug, Clone, Parser)]
#[command(name = "supabase-connect", version, about)]
pub struct Cli {
    /// Project URL, e.g. https://xyzcompany.supabase.co
    #[arg(long, env = "SUPABASE_URL")]
    pub url: Option<String>,

    /// Anon API key
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Content of the sample entry to insert
    #[arg(long, default_value = DEFAULT_CONTENT)]
    pub content: String,

    /// Number of recent entries to list
    #[arg(long, default_value_t = DEFAULT_LIMIT, value_parser = clap::value_parser!(i64).range(0..))]
    pub limit: i64,

    /// Create the table through the SQL function when it is missing
    #[arg(long)]
    pub auto_create: bool,

    /// Remote procedure that executes raw SQL
    #[arg(long, default_value = DEFAULT_SQL_FUNCTION)]
    pub sql_function: String,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    /// Resolve the client config: flags first, then environment variables.
    pub fn config(&self) -> SupabaseResult<SupabaseConfig> {
        self.config_with(|name| std::env::var(name).ok())
    }

    fn config_with<F>(&self, env: F) -> SupabaseResult<SupabaseConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = SupabaseConfig::from_lookup(|name| match name {
            ENV_URL => self.url.clone().or_else(|| env(name)),
            ENV_ANON_KEY => self.key.clone().or_else(|| env(name)),
            _ => env(name),
        })?;
        if let Some(secs) = self.timeout_secs {
            config = config.timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            content: self.content.clone(),
            limit: self.limit,
            auto_create: self.auto_create,
        }
    }
}
