//! System orchestration, configuration, startup, and shutdown logic.

pub mod order_system;
pub mod config;
pub mod telemetry;
pub mod error;

pub use order_system::*;
pub use config::*;
pub use telemetry::*;
pub use error::*;
