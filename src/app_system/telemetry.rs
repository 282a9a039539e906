use crate::app_system::{SystemConfig, SystemError};

/// Installs the global subscriber. Call once, at startup.
///
/// The filter comes from [`SystemConfig::log_filter`], which mirrors `RUST_LOG`:
///
/// ```bash
/// RUST_LOG=debug cargo run
/// RUST_LOG=storefront_orders::clients=debug,info cargo run
/// ```
pub fn setup_tracing(config: &SystemConfig) -> Result<(), SystemError> {
    let env_filter = config.env_filter()?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
    Ok(())
}
