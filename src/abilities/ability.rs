//! Ability definitions.
//!
//! Abilities are static data attached to drone templates. A passive
//! ability is always on (lane auras); a triggered ability listens for one
//! `TriggerType` and runs its effects when the matcher selects it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PlayerId, StatKind};
use crate::effects::Effect;

use super::filter::TriggerFilter;
use super::trigger::{TriggerCategory, TriggerType};

/// Passive or triggered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AbilityKind {
    Passive,
    #[default]
    Triggered,
}

/// Whose actions an ability reacts to.
///
/// `Controller` and `Opponent` are used with controller triggers;
/// `LaneOwner` and `LaneEnemy` with lane triggers. Both pairs compare the
/// same thing: the player who caused the event against the holder's owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnerRule {
    Controller,
    Opponent,
    LaneOwner,
    LaneEnemy,
    Any,
}

impl OwnerRule {
    /// Check the rule for a holder owned by `holder` reacting to an event
    /// caused by `triggering`.
    #[must_use]
    pub fn admits(self, holder: PlayerId, triggering: PlayerId) -> bool {
        match self {
            Self::Controller | Self::LaneOwner => holder == triggering,
            Self::Opponent | Self::LaneEnemy => holder != triggering,
            Self::Any => true,
        }
    }
}

/// Extra positional restriction on controller triggers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerScope {
    /// Fire wherever the event happened.
    #[default]
    Anywhere,
    /// Fire only when the event happened in the holder's lane.
    SameLane,
}

/// A passive bonus granted to other friendly drones in the holder's lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaneAura {
    pub stat: StatKind,
    pub value: i64,
}

/// A drone ability.
///
/// ## Example
///
/// ```
/// use drone_ccg::abilities::{Ability, OwnerRule, TriggerType};
/// use drone_ccg::effects::Effect;
///
/// // A mine: hits whatever enemy enters its lane, then blows itself up.
/// let mine = Ability::triggered("Proximity Charge", TriggerType::OnLaneMovementIn)
///     .with_owner_rule(OwnerRule::LaneEnemy)
///     .with_effect(Effect::damage_triggering(3))
///     .destroy_after_trigger();
///
/// assert!(mine.listens_to(TriggerType::OnLaneMovementIn));
/// assert!(mine.destroy_after_trigger);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ability {
    /// Ability name (display, timeline keys).
    pub name: String,

    /// Passive or triggered.
    pub kind: AbilityKind,

    /// Trigger type for triggered abilities.
    pub trigger: Option<TriggerType>,

    /// Ownership rule. `None` uses the category default.
    pub owner_rule: Option<OwnerRule>,

    /// Positional restriction (controller triggers only).
    pub scope: TriggerScope,

    /// Card or drone filter.
    pub filter: Option<TriggerFilter>,

    /// Effects, in resolution order.
    pub effects: SmallVec<[Effect; 2]>,

    /// Remove the holder after the effects resolve.
    pub destroy_after_trigger: bool,

    /// Divides a scaling amount into a repeat count. `None` means 1.
    pub scaling_divisor: Option<u32>,

    /// Passive lane aura.
    pub aura: Option<LaneAura>,
}

impl Ability {
    /// Create a triggered ability.
    pub fn triggered(name: impl Into<String>, trigger: TriggerType) -> Self {
        Self {
            name: name.into(),
            kind: AbilityKind::Triggered,
            trigger: Some(trigger),
            ..Self::default()
        }
    }

    /// Create a passive ability.
    pub fn passive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AbilityKind::Passive,
            ..Self::default()
        }
    }

    /// Set the ownership rule (builder pattern).
    #[must_use]
    pub fn with_owner_rule(mut self, rule: OwnerRule) -> Self {
        self.owner_rule = Some(rule);
        self
    }

    /// Set the positional scope (builder pattern).
    #[must_use]
    pub fn with_scope(mut self, scope: TriggerScope) -> Self {
        self.scope = scope;
        self
    }

    /// Set the filter (builder pattern).
    #[must_use]
    pub fn with_filter(mut self, filter: TriggerFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Add an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Remove the holder after triggering (builder pattern).
    #[must_use]
    pub fn destroy_after_trigger(mut self) -> Self {
        self.destroy_after_trigger = true;
        self
    }

    /// Set the scaling divisor (builder pattern).
    #[must_use]
    pub fn with_scaling_divisor(mut self, divisor: u32) -> Self {
        self.scaling_divisor = Some(divisor);
        self
    }

    /// Set a lane aura (builder pattern).
    #[must_use]
    pub fn with_aura(mut self, stat: StatKind, value: i64) -> Self {
        self.aura = Some(LaneAura { stat, value });
        self
    }

    /// Check if this is a triggered ability listening for `trigger`.
    #[must_use]
    pub fn listens_to(&self, trigger: TriggerType) -> bool {
        self.kind == AbilityKind::Triggered && self.trigger == Some(trigger)
    }

    /// Ownership rule after applying the category default.
    ///
    /// Controller triggers default to `Controller`; everything else to `Any`.
    #[must_use]
    pub fn effective_owner_rule(&self) -> OwnerRule {
        match (self.owner_rule, self.trigger.map(TriggerType::category)) {
            (Some(rule), _) => rule,
            (None, Some(TriggerCategory::Controller)) => OwnerRule::Controller,
            (None, _) => OwnerRule::Any,
        }
    }

    /// Scaling divisor, never below 1.
    #[must_use]
    pub fn divisor(&self) -> i64 {
        i64::from(self.scaling_divisor.unwrap_or(1).max(1))
    }
}
