//! Trigger types.
//!
//! Every triggered ability listens for exactly one `TriggerType`. Trigger
//! types fall into three categories that decide where the matcher looks
//! for listeners:
//!
//! - **Self**: only the drone performing the action reacts
//!   (on-move, on-deploy, on-round-start, on-attack)
//! - **Controller**: drones anywhere on the board react to a player's
//!   actions (on-card-drawn, on-energy-gained, on-card-play)
//! - **Lane**: drones in the lane where the action happened react
//!   (lane movement in/out, lane deployment, lane attack)

use serde::{Deserialize, Serialize};

/// Where the matcher looks for listeners of a trigger type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerCategory {
    /// Fired only by the acting drone.
    Self_,
    /// Fired by a player's actions, heard board-wide.
    Controller,
    /// Fired by activity in the listener's own lane.
    Lane,
}

/// A game event that abilities can react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerType {
    // === Self ===
    OnMove,
    OnDeploy,
    OnRoundStart,
    OnAttack,

    // === Controller ===
    OnCardDrawn,
    OnEnergyGained,
    OnCardPlay,

    // === Lane ===
    OnLaneMovementIn,
    OnLaneMovementOut,
    OnLaneDeployment,
    OnLaneAttack,
}

impl TriggerType {
    /// Every trigger type.
    pub const ALL: [TriggerType; 11] = [
        Self::OnMove,
        Self::OnDeploy,
        Self::OnRoundStart,
        Self::OnAttack,
        Self::OnCardDrawn,
        Self::OnEnergyGained,
        Self::OnCardPlay,
        Self::OnLaneMovementIn,
        Self::OnLaneMovementOut,
        Self::OnLaneDeployment,
        Self::OnLaneAttack,
    ];

    /// The category that decides who can hear this trigger.
    #[must_use]
    pub const fn category(self) -> TriggerCategory {
        match self {
            Self::OnMove | Self::OnDeploy | Self::OnRoundStart | Self::OnAttack => {
                TriggerCategory::Self_
            }
            Self::OnCardDrawn | Self::OnEnergyGained | Self::OnCardPlay => {
                TriggerCategory::Controller
            }
            Self::OnLaneMovementIn
            | Self::OnLaneMovementOut
            | Self::OnLaneDeployment
            | Self::OnLaneAttack => TriggerCategory::Lane,
        }
    }

    /// Wire name (`ON_MOVE`, `ON_LANE_MOVEMENT_IN`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnMove => "ON_MOVE",
            Self::OnDeploy => "ON_DEPLOY",
            Self::OnRoundStart => "ON_ROUND_START",
            Self::OnAttack => "ON_ATTACK",
            Self::OnCardDrawn => "ON_CARD_DRAWN",
            Self::OnEnergyGained => "ON_ENERGY_GAINED",
            Self::OnCardPlay => "ON_CARD_PLAY",
            Self::OnLaneMovementIn => "ON_LANE_MOVEMENT_IN",
            Self::OnLaneMovementOut => "ON_LANE_MOVEMENT_OUT",
            Self::OnLaneDeployment => "ON_LANE_DEPLOYMENT",
            Self::OnLaneAttack => "ON_LANE_ATTACK",
        }
    }
}

impl std::fmt::Display for TriggerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
