//! Drone identification.
//!
//! Every drone on the board has a `DroneId` that is unique within its
//! owner's board for the lifetime of the match. Ids are allocated by the
//! deployment code; the trigger engine never creates or reuses them.
//!
//! ## Usage
//!
//! ```
//! use drone_ccg::core::DroneId;
//!
//! let scout = DroneId::new(7);
//! assert_eq!(scout.raw(), 7);
//! assert_eq!(scout.to_string(), "drone_7");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a drone instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DroneId(pub u32);

impl DroneId {
    /// Create a new drone ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for DroneId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for DroneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "drone_{}", self.0)
    }
}
