//! Image storage adapters.
//!
//! Implementations of the `ImageStore` port:
//!
//! - `SupabaseImageStore` - Supabase Storage bucket (production)
//! - `LocalImageStore` - Files on disk for local development
//! - `InMemoryImageStore` - Tests

mod in_memory;
mod local;
mod supabase;

pub use in_memory::InMemoryImageStore;
pub use local::LocalImageStore;
pub use supabase::{SupabaseImageStore, SupabaseStorageConfig};
