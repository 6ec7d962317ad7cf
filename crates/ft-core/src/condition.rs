//! Bridge condition classes.
//!
//! Condition labels come straight from the inventory data: `A` (best) through
//! `D` (worst), plus `X` for structures without a rated condition.  The enum
//! is shared by the element table (ft-network), the collapse model (ft-infra),
//! and the per-condition tallies (ft-sim), so it lives in core.

use std::fmt;

/// A bridge's rated physical condition.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BridgeCondition {
    A,
    B,
    C,
    D,
    X,
}

impl BridgeCondition {
    /// All conditions in dense-index order.
    pub const ALL: [BridgeCondition; 5] = [
        BridgeCondition::A,
        BridgeCondition::B,
        BridgeCondition::C,
        BridgeCondition::D,
        BridgeCondition::X,
    ];

    /// Dense index for per-condition counter arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            BridgeCondition::A => 0,
            BridgeCondition::B => 1,
            BridgeCondition::C => 2,
            BridgeCondition::D => 3,
            BridgeCondition::X => 4,
        }
    }

    /// Parse a condition label from the element table.
    ///
    /// Returns `None` for anything other than the five known labels; the
    /// caller decides whether that is fatal (it is for bridge rows).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "A" => Some(BridgeCondition::A),
            "B" => Some(BridgeCondition::B),
            "C" => Some(BridgeCondition::C),
            "D" => Some(BridgeCondition::D),
            "X" => Some(BridgeCondition::X),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BridgeCondition::A => "A",
            BridgeCondition::B => "B",
            BridgeCondition::C => "C",
            BridgeCondition::D => "D",
            BridgeCondition::X => "X",
        }
    }
}

impl fmt::Display for BridgeCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
