//! header_stats library: HTTP security header adoption statistics
//!
//! This library serves aggregate statistics over a database of scanned sites and
//! the security headers they returned: per-header value distributions, the share
//! of sites agreeing with one site's setting, and per-site reports.
//!
//! # Example
//!
//! ```no_run
//! use header_stats::{run_server, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     db_path: std::path::PathBuf::from("scan.db"),
//!     port: 9000,
//!     ..Default::default()
//! };
//!
//! run_server(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod server;
pub mod stats;
pub mod storage;

// Re-export public API
pub use catalog::{ChartPayload, HeaderKind};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::StatsError;
pub use run::run_server;
pub use server::{build_router, AppState};
pub use stats::{HeaderEntry, SiteReport, StatsEngine};
pub use storage::{run_migrations, HeaderDataset, SqliteDataset};

// Internal run module (server lifecycle)
mod run {
    use anyhow::{Context, Result};
    use log::{info, warn};

    use crate::config::Config;
    use crate::initialization::init_app_state;
    use crate::server::start_server;

    /// Opens the database and serves the API until Ctrl+C.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The database cannot be opened or migrated
    /// - The listen address cannot be bound
    pub async fn run_server(config: Config) -> Result<()> {
        let (state, pool) = init_app_state(&config)
            .await
            .context("Failed to initialize application state")?;

        match state.engine.total_sites().await {
            Ok(total) => info!(
                "Serving statistics for {} site(s) from {}",
                total,
                config.db_path.display()
            ),
            Err(e) => warn!("Dataset not readable at startup: {}", e),
        }

        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Shutdown signal received");
        };

        let result = start_server(&config.bind_addr(), state, shutdown).await;
        pool.close().await;
        result
    }
}
