pub mod client;
pub mod config;
pub mod error;
pub mod response;
pub mod value;

pub use client::SupabaseClient;
pub use config::SupabaseConfig;
pub use error::{PostgrestErrorBody, StatusCode, SupabaseError, SupabaseResult};
pub use response::SupabaseResponse;
pub use value::Row;
