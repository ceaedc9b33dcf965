// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Options Pricer - Rust Core Library
//!
//! Pricing core for the IDB options dashboard. Takes free-form broker
//! shorthand ("AAPL Jun26 240/220 PS 1X2 vs250 15d 500x @ 3.50 1X over"),
//! recovers a typed multi-leg order from it, and computes a screen-implied
//! bid/mid/offer for the whole structure from per-leg market data.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic
//!   - `structure`: Option legs, structures, structure-type templates
//!   - `shorthand`: The broker shorthand parser (token matcher passes)
//!   - `pricing`: Black-Scholes valuation and Greeks
//!   - `quoting`: Market-value sentinel types and the structure aggregator
//!
//! - **Application**: Orchestration over the domain
//!   - `ports`: `MarketDataPort` for the external data collaborator
//!   - `services`: Leg quote resolution, structure pricing
//!   - `dto`: Table rows and blotter records for the UI/persistence
//!     collaborators
//!
//! - **Infrastructure**: Adapters
//!   - `marketdata`: Mock market-data adapter (Black-Scholes synthesis)
//!   - `config`: Data-source selection and mock quote parameters
//!   - `telemetry`: Tracing subscriber setup
//!
//! The domain and application layers are synchronous, side-effect-free
//! transformations; the only suspension point is the market-data port.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Services, port definitions, and DTOs.
pub mod application;

/// Infrastructure layer - Adapters and configuration.
pub mod infrastructure;

// Domain re-exports
pub use domain::pricing::{OptionValue, PricingInputError, black_scholes};
pub use domain::quoting::services::aggregate_structure;
pub use domain::quoting::{LegMarketData, MarketSize, MarketValue, StructureMarketData};
pub use domain::shorthand::{ParseError, parse_order, parse_order_at};
pub use domain::structure::{
    OptionLeg, OptionRight, OptionStructure, ParsedOrder, PositionSide, QuoteSide, StructureType,
};

// Application re-exports
pub use application::dto::{OrderRecord, StructureRow, build_structure_table};
pub use application::ports::{MarketDataError, MarketDataPort};
pub use application::services::{LegQuoteResolver, PricedStructure, StructurePricingService};

// Infrastructure re-exports
pub use infrastructure::config::{DataSource, DataSourceConfig, MockQuoteConfig};
pub use infrastructure::marketdata::{MockMarketData, create_market_data};
