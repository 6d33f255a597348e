//! Effect descriptors.
//!
//! Effects are the building blocks of drone abilities. They are plain
//! data: the trigger engine routes them to an `EffectInterpreter`, and
//! only special-cases three shapes itself:
//!
//! - `Damage` scoped to the triggering drone (applied inline)
//! - `Destroy` scoped to the ability holder
//! - `GoAgain` (a control-flow signal, never delegated)
//!
//! New effect types are added here and in the interpreter; the trigger
//! engine does not need to change.

use serde::{Deserialize, Serialize};

use crate::core::StatKind;

/// Who an effect applies to, relative to the ability that fired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectScope {
    /// The drone holding the ability.
    #[default]
    #[serde(rename = "SELF")]
    Holder,

    /// The drone whose action caused the trigger.
    #[serde(rename = "TRIGGERING_DRONE")]
    TriggeringDrone,
}

/// An atomic ability effect.
///
/// ## Drone Effects
///
/// Apply to a drone picked by `scope`:
/// - `Damage`: shields absorb first, the rest reduces hull
/// - `Heal`: restore hull up to the template maximum
/// - `ModifyStat`: add a temporary or permanent stat modifier
/// - `Exhaust` / `Ready`: toggle the exhaustion flag
/// - `Destroy`: remove the drone from the board
///
/// ## Player Effects
///
/// Apply to the holder's owner:
/// - `Draw`: move cards from deck to hand
/// - `GainEnergy`: add energy
///
/// ## Control Flow
///
/// - `GoAgain`: the acting player takes another action
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    Damage {
        amount: i64,
        #[serde(default)]
        scope: EffectScope,
    },

    Heal {
        amount: i64,
        #[serde(default)]
        scope: EffectScope,
    },

    ModifyStat {
        stat: StatKind,
        value: i64,
        #[serde(default)]
        permanent: bool,
        #[serde(default)]
        scope: EffectScope,
    },

    Exhaust {
        #[serde(default)]
        scope: EffectScope,
    },

    Ready {
        #[serde(default)]
        scope: EffectScope,
    },

    Draw {
        count: u32,
    },

    GainEnergy {
        amount: i64,
    },

    Destroy {
        #[serde(default)]
        scope: EffectScope,
    },

    GoAgain,
}

impl Effect {
    /// Damage the ability holder.
    pub fn damage(amount: i64) -> Self {
        Self::Damage {
            amount,
            scope: EffectScope::Holder,
        }
    }

    /// Damage the drone that caused the trigger (mine-style retaliation).
    pub fn damage_triggering(amount: i64) -> Self {
        Self::Damage {
            amount,
            scope: EffectScope::TriggeringDrone,
        }
    }

    /// Heal the ability holder.
    pub fn heal(amount: i64) -> Self {
        Self::Heal {
            amount,
            scope: EffectScope::Holder,
        }
    }

    /// Temporary stat modifier on the ability holder.
    pub fn modify_stat(stat: StatKind, value: i64) -> Self {
        Self::ModifyStat {
            stat,
            value,
            permanent: false,
            scope: EffectScope::Holder,
        }
    }

    /// Permanent stat modifier on the ability holder.
    pub fn modify_stat_permanent(stat: StatKind, value: i64) -> Self {
        Self::ModifyStat {
            stat,
            value,
            permanent: true,
            scope: EffectScope::Holder,
        }
    }

    /// Exhaust the drone that caused the trigger.
    pub fn exhaust_triggering() -> Self {
        Self::Exhaust {
            scope: EffectScope::TriggeringDrone,
        }
    }

    /// Ready the ability holder.
    pub fn ready() -> Self {
        Self::Ready {
            scope: EffectScope::Holder,
        }
    }

    /// Draw cards for the holder's owner.
    pub fn draw(count: u32) -> Self {
        Self::Draw { count }
    }

    /// Gain energy for the holder's owner.
    pub fn gain_energy(amount: i64) -> Self {
        Self::GainEnergy { amount }
    }

    /// Destroy the ability holder.
    pub fn destroy_self() -> Self {
        Self::Destroy {
            scope: EffectScope::Holder,
        }
    }

    /// Grant the acting player an extra action.
    pub fn go_again() -> Self {
        Self::GoAgain
    }

    /// The drone this effect applies to.
    ///
    /// Player-level effects and `GoAgain` resolve against the holder.
    #[must_use]
    pub fn scope(&self) -> EffectScope {
        match self {
            Self::Damage { scope, .. }
            | Self::Heal { scope, .. }
            | Self::ModifyStat { scope, .. }
            | Self::Exhaust { scope }
            | Self::Ready { scope }
            | Self::Destroy { scope } => *scope,
            Self::Draw { .. } | Self::GainEnergy { .. } | Self::GoAgain => EffectScope::Holder,
        }
    }

    /// Short tag for logs and timelines.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Damage { .. } => "DAMAGE",
            Self::Heal { .. } => "HEAL",
            Self::ModifyStat { .. } => "MODIFY_STAT",
            Self::Exhaust { .. } => "EXHAUST",
            Self::Ready { .. } => "READY",
            Self::Draw { .. } => "DRAW",
            Self::GainEnergy { .. } => "GAIN_ENERGY",
            Self::Destroy { .. } => "DESTROY",
            Self::GoAgain => "GO_AGAIN",
        }
    }
}
