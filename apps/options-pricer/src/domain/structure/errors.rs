//! Structure Errors

use thiserror::Error;

use super::value_objects::StructureType;

/// Errors building a structure's legs from a tag and strike list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// The listed strikes don't match the shape's slot count.
    #[error("{structure_type} requires {expected} strikes, found {found}")]
    StrikeCountMismatch {
        /// The shape being built.
        structure_type: StructureType,
        /// Strikes the shape needs.
        expected: usize,
        /// Strikes actually listed.
        found: usize,
    },

    /// A ratio override doesn't fit the shape.
    #[error("ratio {ratio} does not fit a {expected}-strike {structure_type}")]
    RatioMismatch {
        /// The shape being built.
        structure_type: StructureType,
        /// The ratio as listed (e.g. "1x2x1").
        ratio: String,
        /// Strikes the shape needs.
        expected: usize,
    },

    /// A directional modifier names a leg the shape doesn't have.
    #[error("modifier '{modifier}' does not apply to a {structure_type}")]
    ModifierConflict {
        /// The shape being built.
        structure_type: StructureType,
        /// The offending modifier.
        modifier: String,
    },

    /// No expiry available to assign to a leg.
    #[error("no expiry available for {structure_type} legs")]
    MissingExpiry {
        /// The shape being built.
        structure_type: StructureType,
    },

    /// A leg field failed validation.
    #[error("invalid leg: {message}")]
    InvalidLeg {
        /// What was wrong.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StructureError::StrikeCountMismatch {
            structure_type: StructureType::PutSpread,
            expected: 2,
            found: 3,
        };
        assert_eq!(err.to_string(), "Put Spread requires 2 strikes, found 3");

        let err = StructureError::RatioMismatch {
            structure_type: StructureType::Straddle,
            ratio: "1x2x1".to_string(),
            expected: 1,
        };
        assert!(err.to_string().contains("1x2x1"));

        let err = StructureError::ModifierConflict {
            structure_type: StructureType::CallSpread,
            modifier: "putover".to_string(),
        };
        assert!(err.to_string().contains("putover"));
    }
}
