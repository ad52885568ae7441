pub mod config;
pub mod error;
pub mod operation;

pub use config::{
    CalendarConfig, Config, FaultConfig, LatencyConfig, ValidationResult, WeekStart,
};
pub use error::{AppError, ConfigError};
pub use operation::{Operation, UnknownOperation};

use anyhow::Result;

/// Initialize logging for a mockcal host.
///
/// Honors `RUST_LOG`, defaulting to `info`.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::info!("mockcal core initialized");
    Ok(())
}
