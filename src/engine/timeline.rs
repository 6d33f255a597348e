//! Cascade timeline.
//!
//! Every `fire_trigger` call returns an ordered list of `TimelineEvent`s
//! that a viewer can replay frame by frame. For each executed candidate
//! the order is:
//!
//! 1. `AbilityFired` for the holder
//! 2. events produced by its effects, including any nested cascade
//!    (preceded by a snapshot of the state just before that cascade)
//! 3. `StateSnapshot` of the state after the candidate finished
//!
//! Snapshots hold their own copy of both boards. Player states are built
//! on `im` structures, so taking a snapshot is cheap and later writes to
//! the live state never show up in it.

use serde::{Deserialize, Serialize};

use crate::abilities::TriggerType;
use crate::core::{DroneId, LaneId, PlayerId, PlayerStates, StatKind};

/// Ordered cascade output.
pub type Timeline = Vec<TimelineEvent>;

/// One replayable step of a cascade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimelineEvent {
    // === Engine Events ===

    /// A matched ability started resolving.
    AbilityFired {
        holder_id: DroneId,
        holder_name: String,
        holder_owner: PlayerId,
        holder_lane: LaneId,
        ability_name: String,
        trigger_type: TriggerType,
        depth: u32,
        /// `"<holderId>:<abilityName>:<depth>"`, stable across replays.
        key: String,
    },

    /// Both boards at this point of the cascade.
    StateSnapshot { states: PlayerStates },

    /// A drone left the board.
    DroneDestroyed {
        drone_id: DroneId,
        drone_name: String,
        owner: PlayerId,
        lane: LaneId,
    },

    /// The acting player earned another action.
    ExtraActionGranted { player: PlayerId },

    // === Effect Events ===

    DamageDealt {
        drone_id: DroneId,
        owner: PlayerId,
        shield_damage: i64,
        hull_damage: i64,
    },

    Healed {
        drone_id: DroneId,
        owner: PlayerId,
        amount: i64,
    },

    StatModified {
        drone_id: DroneId,
        owner: PlayerId,
        stat: StatKind,
        value: i64,
        permanent: bool,
    },

    Exhausted { drone_id: DroneId, owner: PlayerId },

    Readied { drone_id: DroneId, owner: PlayerId },

    CardsDrawn { player: PlayerId, count: u32 },

    EnergyGained { player: PlayerId, amount: i64 },
}

impl TimelineEvent {
    /// Snapshot both boards.
    #[must_use]
    pub fn snapshot(states: &PlayerStates) -> Self {
        Self::StateSnapshot {
            states: states.clone(),
        }
    }

    /// Build the replay key of an `AbilityFired` event.
    #[must_use]
    pub fn fired_key(holder: DroneId, ability_name: &str, depth: u32) -> String {
        format!("{holder}:{ability_name}:{depth}")
    }

    /// Check if this is a state snapshot.
    #[must_use]
    pub fn is_snapshot(&self) -> bool {
        matches!(self, Self::StateSnapshot { .. })
    }

    /// Check if this marks `drone` being destroyed.
    #[must_use]
    pub fn destroys(&self, drone: DroneId) -> bool {
        matches!(self, Self::DroneDestroyed { drone_id, .. } if *drone_id == drone)
    }

    /// Wire tag of the event.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AbilityFired { .. } => "ABILITY_FIRED",
            Self::StateSnapshot { .. } => "STATE_SNAPSHOT",
            Self::DroneDestroyed { .. } => "DRONE_DESTROYED",
            Self::ExtraActionGranted { .. } => "EXTRA_ACTION_GRANTED",
            Self::DamageDealt { .. } => "DAMAGE_DEALT",
            Self::Healed { .. } => "HEALED",
            Self::StatModified { .. } => "STAT_MODIFIED",
            Self::Exhausted { .. } => "EXHAUSTED",
            Self::Readied { .. } => "READIED",
            Self::CardsDrawn { .. } => "CARDS_DRAWN",
            Self::EnergyGained { .. } => "ENERGY_GAINED",
        }
    }
}

/// Event tags in order. Handy for asserting timeline shape.
pub fn kinds(timeline: &[TimelineEvent]) -> Vec<&'static str> {
    timeline.iter().map(TimelineEvent::kind).collect()
}
