//! # IBFT Telemetry
//!
//! Structured logging setup for processes embedding the IBFT message core.
//!
//! Library crates only emit `tracing` events; this crate installs the
//! subscriber that renders them.
//!
//! ## Features
//!
//! - **Logging**: JSON, text or compact output with configurable levels
//! - **Filtering**: `RUST_LOG` override plus per-target directives

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{init_logging, LogConfig, LogFormat};
