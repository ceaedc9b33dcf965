//! Value objects for the option structure context.

mod leg;
mod option_right;
mod option_structure;
mod parsed_order;
mod structure_type;

pub use leg::{OptionLeg, PositionSide};
pub use option_right::OptionRight;
pub use option_structure::{DEFAULT_MULTIPLIER, OptionStructure, QuoteSide};
pub use parsed_order::ParsedOrder;
pub use structure_type::StructureType;
