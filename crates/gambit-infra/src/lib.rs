//! # Gambit Infrastructure
//!
//! Concrete implementations of the ports defined in `gambit-core`.
//! This crate contains the database repositories and the image bucket client.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL repositories via SeaORM
//! - `supabase` - Supabase Storage client for post images

pub mod database;
pub mod storage;

// Re-exports - In-Memory
pub use database::{InMemoryPostRepository, InMemoryTournamentRepository};
pub use storage::InMemoryImageStorage;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, PostgresPostRepository, PostgresTournamentRepository};

#[cfg(feature = "supabase")]
pub use storage::{SupabaseConfig, SupabaseStorage};
