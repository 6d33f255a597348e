//! Triggered abilities: trigger types, ability data, filters and matching.
//!
//! Ability data is static; matching is a pure function of the board. The
//! engine module drives the matcher and executes what it returns.

pub mod ability;
pub mod filter;
pub mod matcher;
pub mod trigger;

pub use ability::{Ability, AbilityKind, LaneAura, OwnerRule, TriggerScope};
pub use filter::{FilterContext, FilterEvaluator, TriggerFilter};
pub use matcher::{MatchQuery, MatchTier, TriggerMatch, TriggerMatcher};
pub use trigger::{TriggerCategory, TriggerType};
