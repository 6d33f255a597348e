//! Board state: drones, lanes, ship sections and per-player resources.
//!
//! ## DroneInstance
//!
//! A drone on the board. Static data (base attack, speed, abilities)
//! lives in the catalog template named by `name`; the instance carries
//! only what changes during a match.
//!
//! ## PlayerState
//!
//! One side of the board:
//! - Three ordered lanes of drones (left to right = deployment order)
//! - Ship sections
//! - Energy, hand, deck and discard
//! - Deployment bookkeeping
//!
//! Lanes, cards and counters use `im` persistent data structures, so
//! cloning a `PlayerState` is O(1) and later writes copy-on-write. The
//! trigger engine relies on this for its state snapshots: a cloned state
//! can never observe mutations made to the original afterwards.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::DroneId;
use super::lane::{LaneId, LANE_COUNT};
use super::player::{PlayerId, PlayerMap};
use crate::catalog::CardInfo;

/// A drone statistic that modifiers and filters can refer to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatKind {
    Attack,
    Speed,
    Hull,
    Shields,
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StatKind::Attack => "attack",
            StatKind::Speed => "speed",
            StatKind::Hull => "hull",
            StatKind::Shields => "shields",
        };
        f.write_str(name)
    }
}

/// A stat modifier applied to a drone.
///
/// Temporary modifiers are cleared at end of round by the round code;
/// permanent ones last until the drone leaves the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatModifier {
    pub stat: StatKind,
    pub value: i64,
    pub permanent: bool,
}

/// A drone on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroneInstance {
    /// Unique (per board) identity.
    pub id: DroneId,

    /// Template name in the ability catalog.
    pub name: String,

    /// Owning player.
    pub owner: PlayerId,

    /// Current hull.
    pub hull: i64,

    /// Current shields.
    pub shields: i64,

    /// Shield cap after modifiers and lane auras.
    pub current_max_shields: i64,

    /// Has this drone acted this round?
    pub is_exhausted: bool,

    /// Active stat modifiers, oldest first.
    #[serde(default)]
    pub modifiers: SmallVec<[StatModifier; 2]>,
}

impl DroneInstance {
    /// Create a fresh, ready drone.
    #[must_use]
    pub fn new(
        id: DroneId,
        name: impl Into<String>,
        owner: PlayerId,
        hull: i64,
        shields: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            owner,
            hull,
            shields,
            current_max_shields: shields,
            is_exhausted: false,
            modifiers: SmallVec::new(),
        }
    }

    /// Mark exhausted (builder pattern).
    #[must_use]
    pub fn exhausted(mut self) -> Self {
        self.is_exhausted = true;
        self
    }

    /// Add a modifier (builder pattern).
    #[must_use]
    pub fn with_modifier(mut self, stat: StatKind, value: i64, permanent: bool) -> Self {
        self.modifiers.push(StatModifier { stat, value, permanent });
        self
    }

    /// Sum of all modifiers for a stat.
    #[must_use]
    pub fn modifier_total(&self, stat: StatKind) -> i64 {
        self.modifiers
            .iter()
            .filter(|m| m.stat == stat)
            .map(|m| m.value)
            .sum()
    }

    /// Drop all temporary modifiers.
    pub fn clear_temporary_modifiers(&mut self) {
        self.modifiers.retain(|m| m.permanent);
    }

    /// Take flat damage: shields absorb first, the rest goes to hull.
    ///
    /// Returns `(shield_damage, hull_damage)`. Reported hull damage never
    /// exceeds the hull the drone had; overkill still drives hull negative.
    pub fn absorb_damage(&mut self, amount: i64) -> (i64, i64) {
        let amount = amount.max(0);
        let shield_damage = amount.min(self.shields.max(0));
        let hull_damage = amount - shield_damage;
        let hull_before = self.hull;
        self.shields -= shield_damage;
        self.hull -= hull_damage;
        (shield_damage, hull_damage.min(hull_before.max(0)))
    }

    /// Check if hull has run out.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.hull <= 0
    }
}

/// A ship section. Carried as data; the engine never does ship arithmetic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipSection {
    pub name: String,
    pub hull: i64,
    pub max_hull: i64,
    pub shields: i64,
    pub allocated_shields: i64,
}

impl ShipSection {
    /// Create an undamaged section with no shields allocated.
    pub fn new(name: impl Into<String>, max_hull: i64, shields: i64) -> Self {
        Self {
            name: name.into(),
            hull: max_hull,
            max_hull,
            shields,
            allocated_shields: 0,
        }
    }
}

/// The three lanes of one board, left to right.
pub type Lanes = [Vector<DroneInstance>; LANE_COUNT];

/// One player's side of the board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Display name.
    pub name: String,

    /// Current energy.
    pub energy: i64,

    /// Cards in hand.
    pub hand: Vector<CardInfo>,

    /// Draw pile; the front is the top.
    pub deck: Vector<CardInfo>,

    /// Discard pile.
    pub discard: Vector<CardInfo>,

    /// Drones per lane.
    pub lanes: Lanes,

    /// Ship sections by name.
    pub ship_sections: OrdMap<String, ShipSection>,

    /// Drones currently deployed, per template name.
    pub deployed_counts: OrdMap<String, u32>,

    /// Drones this player has lost this match.
    pub drones_destroyed: u32,
}

impl PlayerState {
    /// Create an empty board.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    // === Lanes ===

    /// Drones in a lane, in deployment order.
    #[must_use]
    pub fn lane(&self, lane: LaneId) -> &Vector<DroneInstance> {
        &self.lanes[lane.index()]
    }

    /// Mutable access to a lane.
    pub fn lane_mut(&mut self, lane: LaneId) -> &mut Vector<DroneInstance> {
        &mut self.lanes[lane.index()]
    }

    /// Iterate every drone with its lane, lanes left to right.
    pub fn drones(&self) -> impl Iterator<Item = (LaneId, &DroneInstance)> {
        LaneId::ALL
            .into_iter()
            .flat_map(move |lane| self.lane(lane).iter().map(move |d| (lane, d)))
    }

    /// Number of drones on the board.
    #[must_use]
    pub fn drone_count(&self) -> usize {
        self.lanes.iter().map(Vector::len).sum()
    }

    /// Append a drone to the end of a lane and count it as deployed.
    pub fn deploy(&mut self, lane: LaneId, drone: DroneInstance) {
        *self.deployed_counts.entry(drone.name.clone()).or_insert(0) += 1;
        self.lane_mut(lane).push_back(drone);
    }

    /// Append a drone to the end of a lane without touching bookkeeping.
    pub fn place(&mut self, lane: LaneId, drone: DroneInstance) {
        self.lane_mut(lane).push_back(drone);
    }

    // === Drone lookup ===

    /// Locate a drone: its lane and index within the lane.
    #[must_use]
    pub fn locate(&self, id: DroneId) -> Option<(LaneId, usize)> {
        LaneId::ALL.into_iter().find_map(|lane| {
            self.lane(lane)
                .iter()
                .position(|d| d.id == id)
                .map(|index| (lane, index))
        })
    }

    /// Get a drone by id.
    #[must_use]
    pub fn drone(&self, id: DroneId) -> Option<&DroneInstance> {
        let (lane, index) = self.locate(id)?;
        self.lane(lane).get(index)
    }

    /// Get a mutable drone by id.
    pub fn drone_mut(&mut self, id: DroneId) -> Option<&mut DroneInstance> {
        let (lane, index) = self.locate(id)?;
        self.lane_mut(lane).get_mut(index)
    }

    /// Check that a drone is in a specific lane.
    #[must_use]
    pub fn is_in_lane(&self, id: DroneId, lane: LaneId) -> bool {
        self.lane(lane).iter().any(|d| d.id == id)
    }

    /// Remove a drone from whichever lane holds it.
    ///
    /// Returns the lane it was in and the removed instance.
    pub fn remove_drone(&mut self, id: DroneId) -> Option<(LaneId, DroneInstance)> {
        let (lane, index) = self.locate(id)?;
        let drone = self.lane_mut(lane).remove(index);
        Some((lane, drone))
    }

    /// Move a drone to the end of another lane.
    ///
    /// Returns the origin lane, or `None` if the drone is not on this board.
    pub fn move_drone(&mut self, id: DroneId, to: LaneId) -> Option<LaneId> {
        let (from, drone) = self.remove_drone(id)?;
        self.place(to, drone);
        Some(from)
    }

    // === Cards ===

    /// Move up to `count` cards from the top of the deck to the hand.
    ///
    /// Returns the number of cards actually drawn.
    pub fn draw(&mut self, count: u32) -> u32 {
        let mut drawn = 0;
        while drawn < count {
            let Some(card) = self.deck.pop_front() else {
                break;
            };
            self.hand.push_back(card);
            drawn += 1;
        }
        drawn
    }
}

/// A partial update returned by bookkeeping hooks.
///
/// `None` fields leave the player state untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerStateUpdate {
    pub deployed_counts: Option<OrdMap<String, u32>>,
    pub drones_destroyed: Option<u32>,
}

impl PlayerStateUpdate {
    /// Apply the update.
    pub fn apply(self, state: &mut PlayerState) {
        if let Some(counts) = self.deployed_counts {
            state.deployed_counts = counts;
        }
        if let Some(destroyed) = self.drones_destroyed {
            state.drones_destroyed = destroyed;
        }
    }
}

/// Both boards.
pub type PlayerStates = PlayerMap<PlayerState>;

/// Ship sections placed by each player, in lane order.
pub type PlacedSections = PlayerMap<Vec<String>>;
