//! Trigger context and the cascade loop guard.
//!
//! A `TriggerContext` is built by the caller for one game event and
//! consumed by `TriggerEngine::fire_trigger`. Inside the engine it is split
//! into an immutable `TriggerEvent` (what happened) and the mutable parts
//! that are threaded through the cascade: player states, the pair set and
//! the log sink.
//!
//! ## Pair guard
//!
//! Every execution is keyed by `(reactor, source)`: the drone holding the
//! ability and the drone that caused the event, or `System` when no drone
//! did. A key fires at most once per outermost call, including every
//! nested cascade, which breaks two-drone ping-pong loops. Longer cycles
//! are stopped by the depth ceiling.
//!
//! ```
//! use drone_ccg::core::DroneId;
//! use drone_ccg::engine::{PairKey, PairSet, SourceId};
//!
//! let mut pairs = PairSet::new();
//! assert!(pairs.insert(PairKey::new(DroneId(1), SourceId::System)));
//! assert!(!pairs.insert(PairKey::new(DroneId(1), SourceId::System)));
//! assert_eq!(pairs.keys(), vec!["drone_1:system".to_string()]);
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::abilities::TriggerType;
use crate::catalog::CardInfo;
use crate::core::{
    DroneId, DroneInstance, LaneId, LogSink, PlacedSections, PlayerId, PlayerStates,
};

// === Pair Guard ===

/// What caused a trigger, for loop-guard purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceId {
    Drone(DroneId),
    /// Round start and controller events with no acting drone.
    System,
}

impl From<Option<&DroneInstance>> for SourceId {
    fn from(drone: Option<&DroneInstance>) -> Self {
        drone.map_or(Self::System, |d| Self::Drone(d.id))
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Drone(id) => write!(f, "{id}"),
            Self::System => f.write_str("system"),
        }
    }
}

/// A `(reactor, source)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairKey {
    pub reactor: DroneId,
    pub source: SourceId,
}

impl PairKey {
    /// Create a key.
    #[must_use]
    pub const fn new(reactor: DroneId, source: SourceId) -> Self {
        Self { reactor, source }
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.reactor, self.source)
    }
}

/// Pairs that already fired, in firing order.
#[derive(Clone, Debug, Default)]
pub struct PairSet {
    seen: FxHashSet<PairKey>,
    order: Vec<PairKey>,
}

impl PairSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pair. Returns `false` if it had already fired.
    pub fn insert(&mut self, key: PairKey) -> bool {
        if self.seen.insert(key) {
            self.order.push(key);
            true
        } else {
            false
        }
    }

    /// Check if a pair has fired.
    #[must_use]
    pub fn contains(&self, key: &PairKey) -> bool {
        self.seen.contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Pairs in firing order.
    pub fn iter(&self) -> impl Iterator<Item = &PairKey> {
        self.order.iter()
    }

    /// Pairs rendered as `"<reactor>:<source>"`, in firing order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.order.iter().map(PairKey::to_string).collect()
    }
}

// === Event ===

/// The immutable half of a trigger context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggerEvent {
    pub trigger_type: TriggerType,
    pub lane: Option<LaneId>,
    pub triggering_drone: Option<DroneInstance>,
    pub triggering_player: PlayerId,
    pub acting_player: PlayerId,
    pub card: Option<CardInfo>,
    pub scaling_amount: Option<i64>,
    pub depth: u32,
}

impl TriggerEvent {
    /// Loop-guard source of this event.
    #[must_use]
    pub fn source(&self) -> SourceId {
        SourceId::from(self.triggering_drone.as_ref())
    }
}

// === Context ===

/// Everything a caller supplies for one game event.
///
/// ```
/// use drone_ccg::core::{GameLog, LaneId, PlayerId, PlayerMap, PlayerState};
/// use drone_ccg::engine::TriggerContext;
///
/// let states = PlayerMap::new(|p| PlayerState::new(p.to_string()));
/// let mut log = GameLog::new();
///
/// let ctx = TriggerContext::new(PlayerId::ONE, states, &mut log)
///     .with_lane(LaneId::LANE2)
///     .with_scaling_amount(3);
///
/// assert_eq!(ctx.acting_player, PlayerId::ONE);
/// assert_eq!(ctx.chain_depth, 0);
/// ```
pub struct TriggerContext<'l> {
    /// Event lane. `None` for board-wide controller events.
    pub lane: Option<LaneId>,

    /// Drone whose action caused the event.
    pub triggering_drone: Option<DroneInstance>,

    /// Player who caused the event.
    pub triggering_player: PlayerId,

    /// Player who took the original action.
    pub acting_player: PlayerId,

    pub player_states: PlayerStates,

    pub placed_sections: PlacedSections,

    pub log: &'l mut dyn LogSink,

    /// Card being played (on-card-play).
    pub card: Option<CardInfo>,

    /// Quantity that scaling abilities divide into a repeat count.
    pub scaling_amount: Option<i64>,

    /// Pairs that already fired in this cascade.
    pub pair_set: PairSet,

    /// Nesting depth; 0 for the outermost call.
    pub chain_depth: u32,
}

impl<'l> TriggerContext<'l> {
    /// Create a context for an event caused and acted by `player`.
    pub fn new(player: PlayerId, player_states: PlayerStates, log: &'l mut dyn LogSink) -> Self {
        Self {
            lane: None,
            triggering_drone: None,
            triggering_player: player,
            acting_player: player,
            player_states,
            placed_sections: PlacedSections::default(),
            log,
            card: None,
            scaling_amount: None,
            pair_set: PairSet::new(),
            chain_depth: 0,
        }
    }

    /// Set the event lane (builder pattern).
    #[must_use]
    pub fn with_lane(mut self, lane: LaneId) -> Self {
        self.lane = Some(lane);
        self
    }

    /// Set the triggering drone (builder pattern).
    #[must_use]
    pub fn with_triggering_drone(mut self, drone: DroneInstance) -> Self {
        self.triggering_drone = Some(drone);
        self
    }

    /// Set the triggering player (builder pattern).
    #[must_use]
    pub fn triggered_by(mut self, player: PlayerId) -> Self {
        self.triggering_player = player;
        self
    }

    /// Set the acting player (builder pattern).
    #[must_use]
    pub fn acted_by(mut self, player: PlayerId) -> Self {
        self.acting_player = player;
        self
    }

    /// Set placed ship sections (builder pattern).
    #[must_use]
    pub fn with_placed_sections(mut self, placed: PlacedSections) -> Self {
        self.placed_sections = placed;
        self
    }

    /// Set the played card (builder pattern).
    #[must_use]
    pub fn with_card(mut self, card: CardInfo) -> Self {
        self.card = Some(card);
        self
    }

    /// Set the scaling amount (builder pattern).
    #[must_use]
    pub fn with_scaling_amount(mut self, amount: i64) -> Self {
        self.scaling_amount = Some(amount);
        self
    }

    /// Continue an existing cascade's pair set (builder pattern).
    #[must_use]
    pub fn with_pair_set(mut self, pair_set: PairSet) -> Self {
        self.pair_set = pair_set;
        self
    }

    /// Start at a nesting depth (builder pattern).
    #[must_use]
    pub fn at_depth(mut self, depth: u32) -> Self {
        self.chain_depth = depth;
        self
    }

    /// Split off the event description.
    pub(crate) fn event(&self, trigger_type: TriggerType) -> TriggerEvent {
        TriggerEvent {
            trigger_type,
            lane: self.lane,
            triggering_drone: self.triggering_drone.clone(),
            triggering_player: self.triggering_player,
            acting_player: self.acting_player,
            card: self.card.clone(),
            scaling_amount: self.scaling_amount,
            depth: self.chain_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NullLog, PlayerMap, PlayerState};

    #[test]
    fn test_pair_key_display() {
        assert_eq!(
            PairKey::new(DroneId(3), SourceId::Drone(DroneId(9))).to_string(),
            "drone_3:drone_9"
        );
        assert_eq!(PairKey::new(DroneId(3), SourceId::System).to_string(), "drone_3:system");
    }

    #[test]
    fn test_pair_set_keeps_firing_order() {
        let mut pairs = PairSet::new();
        pairs.insert(PairKey::new(DroneId(5), SourceId::System));
        pairs.insert(PairKey::new(DroneId(2), SourceId::Drone(DroneId(1))));
        pairs.insert(PairKey::new(DroneId(5), SourceId::System));

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs.keys(), vec!["drone_5:system", "drone_2:drone_1"]);
        assert!(pairs.contains(&PairKey::new(DroneId(2), SourceId::Drone(DroneId(1)))));
    }

    #[test]
    fn test_source_from_drone() {
        let drone = DroneInstance::new(DroneId(4), "Scout", PlayerId::ONE, 1, 0);
        assert_eq!(SourceId::from(Some(&drone)), SourceId::Drone(DroneId(4)));
        assert_eq!(SourceId::from(None::<&DroneInstance>), SourceId::System);
    }

    #[test]
    fn test_context_event() {
        let states = PlayerMap::new(|p| PlayerState::new(p.to_string()));
        let mut log = NullLog;
        let drone = DroneInstance::new(DroneId(4), "Scout", PlayerId::TWO, 1, 0);
        let ctx = TriggerContext::new(PlayerId::TWO, states, &mut log)
            .with_triggering_drone(drone)
            .acted_by(PlayerId::ONE)
            .at_depth(2);

        let event = ctx.event(TriggerType::OnMove);
        assert_eq!(event.triggering_player, PlayerId::TWO);
        assert_eq!(event.acting_player, PlayerId::ONE);
        assert_eq!(event.depth, 2);
        assert_eq!(event.source(), SourceId::Drone(DroneId(4)));
    }
}
