use std::io::{self, Write};

use tracing::info;

use crate::entry::TextEntry;
use crate::manager::{ConnectionStatus, TextEntryManager};
use crate::schema::{self, TABLE_NAME};

/// Sample row inserted by the demo.
pub const DEFAULT_CONTENT: &str = "This is a test entry from supabase-connect!";
/// Rows listed by the demo.
pub const DEFAULT_LIMIT: i64 = 10;

/// Knobs for the demo sequence.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub content: String,
    pub limit: i64,
    /// Try to create the table through the SQL procedure when it is missing.
    pub auto_create: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            content: DEFAULT_CONTENT.to_string(),
            limit: DEFAULT_LIMIT,
            auto_create: false,
        }
    }
}

/// What a demo run did.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Final probe result (after any table creation).
    pub status: ConnectionStatus,
    pub table_created: bool,
    pub instructions_shown: bool,
    pub inserted: Option<TextEntry>,
    pub entries: Vec<TextEntry>,
}

impl RunReport {
    fn new(status: ConnectionStatus) -> Self {
        Self {
            status,
            table_created: false,
            instructions_shown: false,
            inserted: None,
            entries: Vec::new(),
        }
    }
}

/// Probe, insert a sample row, then list recent rows, writing progress to `out`.
///
/// Nothing is inserted unless the probe ends in [`ConnectionStatus::Connected`].
pub async fn run<W: Write>(
    manager: &TextEntryManager,
    options: &RunOptions,
    out: &mut W,
) -> io::Result<RunReport> {
    writeln!(out, "Testing Supabase connection...")?;
    let mut report = RunReport::new(manager.probe().await);

    if report.status == ConnectionStatus::TableMissing {
        writeln!(out, "Connected successfully, but the '{TABLE_NAME}' table doesn't exist.")?;

        if options.auto_create {
            writeln!(
                out,
                "Attempting to create it through rpc/{}...",
                manager.sql_function()
            )?;
            report.table_created = manager.create_table().await;
            if report.table_created {
                report.status = manager.probe().await;
            }
        }

        if !report.status.is_connected() {
            writeln!(out, "{}", schema::setup_instructions(manager.sql_function()))?;
            report.instructions_shown = true;
        }
    }

    match &report.status {
        ConnectionStatus::Connected => {
            writeln!(out, "Connection test successful!")?;
            run_operations(manager, options, out, &mut report).await?;
        }
        ConnectionStatus::TableMissing => {}
        ConnectionStatus::Unreachable(message) => {
            writeln!(out, "Error testing connection: {message}")?;
        }
    }

    writeln!(out, "\nConnection test complete.")?;
    info!(status = ?report.status, inserted = report.inserted.is_some(), listed = report.entries.len(), "Run finished");
    Ok(report)
}

async fn run_operations<W: Write>(
    manager: &TextEntryManager,
    options: &RunOptions,
    out: &mut W,
    report: &mut RunReport,
) -> io::Result<()> {
    report.inserted = manager.create_text_entry(&options.content).await;
    match &report.inserted {
        Some(entry) => writeln!(out, "Created new text entry: {}", entry.content)?,
        None => writeln!(out, "Could not create text entry.")?,
    }

    report.entries = manager.list_text_entries(options.limit).await;
    writeln!(out, "Retrieved {} text entries", report.entries.len())?;
    if !report.entries.is_empty() {
        writeln!(out, "\nText Entries:")?;
        for (i, entry) in report.entries.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, entry)?;
        }
    }
    Ok(())
}
