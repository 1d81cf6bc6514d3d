// storage/mod.rs
// Scan dataset access

pub mod dataset;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod models;
pub mod pool;
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used items
pub use dataset::{HeaderDataset, SqliteDataset};
pub use models::{HeaderRow, PairCount, ValueCountRow};
pub use pool::{init_db_pool_with_path, run_migrations, DbPool};
