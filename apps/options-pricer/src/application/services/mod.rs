//! Application services.

mod leg_quote_resolver;
mod structure_pricing;

pub use leg_quote_resolver::LegQuoteResolver;
pub use structure_pricing::{PricedStructure, StructurePricingService};
