//! Lane identification.
//!
//! Each player's board has three lanes, ordered left to right. Lane order
//! is also deployment order, and it is the order the trigger matcher scans.

use serde::{Deserialize, Serialize};

/// Number of lanes on each player's board.
pub const LANE_COUNT: usize = 3;

/// One of the three board lanes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LaneId(pub u8);

impl LaneId {
    /// Leftmost lane.
    pub const LANE1: LaneId = LaneId(0);
    /// Middle lane.
    pub const LANE2: LaneId = LaneId(1);
    /// Rightmost lane.
    pub const LANE3: LaneId = LaneId(2);

    /// All lanes, left to right.
    pub const ALL: [LaneId; LANE_COUNT] = [Self::LANE1, Self::LANE2, Self::LANE3];

    /// Create a lane ID from a 0-based index.
    ///
    /// Returns `None` for indices outside the board.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < LANE_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Get the 0-based lane index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for LaneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "lane{}", self.0 + 1)
    }
}
