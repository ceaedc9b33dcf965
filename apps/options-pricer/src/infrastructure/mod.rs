//! Infrastructure layer.
//!
//! Adapters and wiring: the mock market-data source, environment-driven
//! configuration, and tracing setup.

pub mod config;
pub mod marketdata;
pub mod telemetry;
