//! Structure Type Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Recognized multi-leg structure shapes.
///
/// Each variant maps to a fixed leg template (see
/// [`crate::domain::structure::templates`]); `Custom` covers anything built
/// from explicit per-leg types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureType {
    /// Single call.
    Call,
    /// Single put.
    Put,
    /// Put spread (buy first listed strike, sell second).
    PutSpread,
    /// Call spread (buy first listed strike, sell second).
    CallSpread,
    /// Risk reversal (sell put, buy call by default; `putover` flips it).
    RiskReversal,
    /// Straddle (call + put, same strike).
    Straddle,
    /// Strangle (put at first strike, call at second).
    Strangle,
    /// Butterfly (1 x -2 x 1, call-typed unless told otherwise).
    Butterfly,
    /// Put fly (1 x -2 x 1 in puts).
    PutFly,
    /// Call fly (1 x -2 x 1 in calls).
    CallFly,
    /// Iron butterfly (put spread + call spread sharing the body strike).
    IronButterfly,
    /// Iron condor (OTM put spread + OTM call spread).
    IronCondor,
    /// Put condor (4 strikes, all puts).
    PutCondor,
    /// Call condor (4 strikes, all calls).
    CallCondor,
    /// Collar (buy put, sell call).
    Collar,
    /// Call spread collar (buy put, sell call spread's short, buy its wing).
    CallSpreadCollar,
    /// Put spread collar (sell put, buy put, sell call).
    PutSpreadCollar,
    /// Put stupid (buy both puts).
    PutStupid,
    /// Call stupid (buy both calls).
    CallStupid,
    /// Custom/unclassified structure with explicit per-leg types.
    Custom,
}

impl Default for StructureType {
    fn default() -> Self {
        Self::Custom
    }
}

impl fmt::Display for StructureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Call => "Call",
            Self::Put => "Put",
            Self::PutSpread => "Put Spread",
            Self::CallSpread => "Call Spread",
            Self::RiskReversal => "Risk Reversal",
            Self::Straddle => "Straddle",
            Self::Strangle => "Strangle",
            Self::Butterfly => "Butterfly",
            Self::PutFly => "Put Fly",
            Self::CallFly => "Call Fly",
            Self::IronButterfly => "Iron Butterfly",
            Self::IronCondor => "Iron Condor",
            Self::PutCondor => "Put Condor",
            Self::CallCondor => "Call Condor",
            Self::Collar => "Collar",
            Self::CallSpreadCollar => "Call Spread Collar",
            Self::PutSpreadCollar => "Put Spread Collar",
            Self::PutStupid => "Put Stupid",
            Self::CallStupid => "Call Stupid",
            Self::Custom => "Custom",
        };
        write!(f, "{name}")
    }
}

impl StructureType {
    /// Number of distinct strikes this shape is listed with.
    ///
    /// Note the iron butterfly takes 3 listed strikes but builds 4 legs
    /// (the body strike is used twice). Zero means variable (`Custom`).
    #[must_use]
    pub const fn strike_slot_count(&self) -> usize {
        match self {
            Self::Call | Self::Put | Self::Straddle => 1,
            Self::PutSpread
            | Self::CallSpread
            | Self::RiskReversal
            | Self::Strangle
            | Self::Collar
            | Self::PutStupid
            | Self::CallStupid => 2,
            Self::Butterfly
            | Self::PutFly
            | Self::CallFly
            | Self::IronButterfly
            | Self::CallSpreadCollar
            | Self::PutSpreadCollar => 3,
            Self::IronCondor | Self::PutCondor | Self::CallCondor => 4,
            Self::Custom => 0,
        }
    }

    /// Whether a broker-quoted delta on this structure is put-signed
    /// (negative) when no explicit `dp`/`dc` direction is given.
    #[must_use]
    pub const fn is_put_delta(&self) -> bool {
        matches!(
            self,
            Self::Put | Self::PutSpread | Self::PutFly | Self::PutCondor | Self::PutStupid
        )
    }

    /// Canonical shorthand tag, where one exists.
    #[must_use]
    pub const fn canonical_tag(&self) -> Option<&'static str> {
        match self {
            Self::Call | Self::Put | Self::Custom => None,
            Self::PutSpread => Some("PS"),
            Self::CallSpread => Some("CS"),
            Self::RiskReversal => Some("RR"),
            Self::Straddle => Some("straddle"),
            Self::Strangle => Some("strangle"),
            Self::Butterfly => Some("fly"),
            Self::PutFly => Some("PF"),
            Self::CallFly => Some("CF"),
            Self::IronButterfly => Some("IF"),
            Self::IronCondor => Some("IC"),
            Self::PutCondor => Some("PC"),
            Self::CallCondor => Some("CC"),
            Self::Collar => Some("collar"),
            Self::CallSpreadCollar => Some("CSC"),
            Self::PutSpreadCollar => Some("PSC"),
            Self::PutStupid => Some("put stupid"),
            Self::CallStupid => Some("call stupid"),
        }
    }
}
