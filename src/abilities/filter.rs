//! Trigger filters.
//!
//! Filters narrow down when a matched ability actually fires: by the type
//! or subtype of the card being played, or by a stat of the drone that
//! caused the event. They are evaluated by the matcher after trigger type,
//! ownership and scope checks pass.

use serde::{Deserialize, Serialize};

use crate::catalog::{AbilityCatalog, CardInfo, CardType};
use crate::core::{DroneInstance, StatKind};

/// A predicate over the event's card or triggering drone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerFilter {
    // === Card Filters ===

    /// Played card has this type.
    CardType { card_type: CardType },

    /// Played card has this subtype.
    CardSubtype { subtype: String },

    // === Drone Filters ===

    /// Triggering drone's stat is at least `value`.
    StatAtLeast { stat: StatKind, value: i64 },

    /// Triggering drone's stat is at most `value`.
    StatAtMost { stat: StatKind, value: i64 },

    // === Combinators ===

    /// All filters must pass.
    All { filters: Vec<TriggerFilter> },

    /// At least one filter must pass.
    Any { filters: Vec<TriggerFilter> },

    /// Filter must fail.
    Not { filter: Box<TriggerFilter> },
}

impl TriggerFilter {
    /// Create a card type filter.
    pub fn card_type(card_type: CardType) -> Self {
        Self::CardType { card_type }
    }

    /// Create a card subtype filter.
    pub fn card_subtype(subtype: impl Into<String>) -> Self {
        Self::CardSubtype {
            subtype: subtype.into(),
        }
    }

    /// Create a minimum stat filter.
    pub fn stat_at_least(stat: StatKind, value: i64) -> Self {
        Self::StatAtLeast { stat, value }
    }

    /// Create a maximum stat filter.
    pub fn stat_at_most(stat: StatKind, value: i64) -> Self {
        Self::StatAtMost { stat, value }
    }

    /// Create an AND filter.
    pub fn all(filters: impl IntoIterator<Item = TriggerFilter>) -> Self {
        Self::All {
            filters: filters.into_iter().collect(),
        }
    }

    /// Create an OR filter.
    pub fn any(filters: impl IntoIterator<Item = TriggerFilter>) -> Self {
        Self::Any {
            filters: filters.into_iter().collect(),
        }
    }

    /// Negate this filter.
    pub fn negate(self) -> Self {
        Self::Not {
            filter: Box::new(self),
        }
    }
}

/// Inputs a filter can look at.
pub struct FilterContext<'a> {
    /// Card being played, if any.
    pub card: Option<&'a CardInfo>,
    /// Drone that caused the event, if any.
    pub triggering_drone: Option<&'a DroneInstance>,
    /// Catalog for base stats.
    pub catalog: &'a AbilityCatalog,
}

/// Evaluator for trigger filters.
pub struct FilterEvaluator;

impl FilterEvaluator {
    /// Check if a filter passes.
    ///
    /// A card filter without a card, or a stat filter without a
    /// triggering drone, fails.
    pub fn evaluate(filter: &TriggerFilter, ctx: &FilterContext<'_>) -> bool {
        match filter {
            TriggerFilter::CardType { card_type } => {
                ctx.card.is_some_and(|card| card.is_type(*card_type))
            }

            TriggerFilter::CardSubtype { subtype } => {
                ctx.card.is_some_and(|card| card.has_subtype(subtype))
            }

            TriggerFilter::StatAtLeast { stat, value } => ctx
                .triggering_drone
                .is_some_and(|drone| ctx.catalog.effective_stat(drone, *stat) >= *value),

            TriggerFilter::StatAtMost { stat, value } => ctx
                .triggering_drone
                .is_some_and(|drone| ctx.catalog.effective_stat(drone, *stat) <= *value),

            TriggerFilter::All { filters } => filters.iter().all(|f| Self::evaluate(f, ctx)),

            TriggerFilter::Any { filters } => filters.iter().any(|f| Self::evaluate(f, ctx)),

            TriggerFilter::Not { filter } => !Self::evaluate(filter, ctx),
        }
    }
}
