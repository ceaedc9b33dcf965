//! Option structure bounded context.
//!
//! The typed vocabulary the rest of the core operates on: single legs,
//! multi-leg structures, parsed orders, and the structure-type template
//! table that fixes each recognized shape's leg signs and option types.

pub mod errors;
pub mod templates;
pub mod value_objects;

pub use errors::StructureError;
pub use templates::{LegTemplate, OverModifier, leg_templates, resolve_legs};
pub use value_objects::{
    DEFAULT_MULTIPLIER, OptionLeg, OptionRight, OptionStructure, ParsedOrder, PositionSide,
    QuoteSide, StructureType,
};
