//! Connectivity probe and `text_entries` demo for a hosted Supabase project.
//!
//! ```ignore
//! use supabase_connect::prelude::*;
//!
//! let manager = TextEntryManager::new("https://your-project.supabase.co", "your-anon-key")?;
//! if manager.test_connection().await {
//!     manager.create_text_entry("hello").await;
//!     for entry in manager.list_text_entries(10).await {
//!         println!("{entry}");
//!     }
//! }
//! ```

pub mod cli;
pub mod entry;
pub mod manager;
pub mod runner;
pub mod schema;

// Re-export the client layers
pub use supabase_connect_core::*;
pub use supabase_connect_query::*;

pub use entry::{NewTextEntry, TextEntry};
pub use manager::{ConnectionStatus, TextEntryManager};
pub use runner::{run, RunOptions, RunReport};

/// Prelude module for convenient imports.
///
/// ```ignore
/// use supabase_connect::prelude::*;
/// ```
pub mod prelude {
    pub use supabase_connect_core::{
        row, Row, SupabaseClient, SupabaseConfig, SupabaseError, SupabaseResponse, SupabaseResult,
    };
    pub use supabase_connect_query::{
        Modifiable, OrderDirection, SupabaseClientQueryExt, Table,
    };

    pub use crate::entry::{NewTextEntry, TextEntry};
    pub use crate::manager::{ConnectionStatus, TextEntryManager};
    pub use crate::runner::{run, RunOptions, RunReport};
}
