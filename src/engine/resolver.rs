//! Cascade resolution.
//!
//! `TriggerEngine::fire_trigger` is the engine's entry point. For one
//! event it asks the matcher for candidates and runs each in order:
//!
//! 1. liveness: the holder must still sit in its recorded lane
//! 2. pair guard: `(holder, source)` must not have fired yet
//! 3. execute the ability against the current state
//! 4. append its timeline fragment, then a snapshot of the new state
//!
//! Effects that produce further events recurse back into `resolve` one
//! level deeper, sharing the same pair set. A call at the depth ceiling
//! fires nothing.
//!
//! ## Example
//!
//! ```
//! use drone_ccg::abilities::{Ability, OwnerRule, TriggerType};
//! use drone_ccg::catalog::{AbilityCatalog, DroneTemplate};
//! use drone_ccg::core::{DroneId, GameLog, LaneId, PlayerId, PlayerMap, PlayerState};
//! use drone_ccg::effects::{BasicInterpreter, DefaultBoardHooks, Effect};
//! use drone_ccg::engine::{TriggerContext, TriggerEngine};
//!
//! let mut catalog = AbilityCatalog::new();
//! catalog.register(DroneTemplate::new("Scout").with_stats(2, 0, 1, 3)).unwrap();
//! catalog.register(
//!     DroneTemplate::new("Mine").with_stats(1, 0, 0, 0).with_ability(
//!         Ability::triggered("Detonate", TriggerType::OnLaneMovementIn)
//!             .with_owner_rule(OwnerRule::LaneEnemy)
//!             .with_effect(Effect::damage_triggering(3))
//!             .destroy_after_trigger(),
//!     ),
//! ).unwrap();
//!
//! let hooks = DefaultBoardHooks::new(&catalog);
//! let interpreter = BasicInterpreter::new(&catalog, &hooks);
//! let engine = TriggerEngine::new(&catalog, &interpreter, &hooks);
//!
//! let mut states = PlayerMap::new(|p| PlayerState::new(p.to_string()));
//! states[PlayerId::TWO].deploy(LaneId::LANE1, catalog.template_for("Mine").unwrap().spawn(DroneId(9), PlayerId::TWO));
//! let scout = catalog.template_for("Scout").unwrap().spawn(DroneId(1), PlayerId::ONE);
//! states[PlayerId::ONE].deploy(LaneId::LANE1, scout.clone());
//!
//! let mut log = GameLog::new();
//! let ctx = TriggerContext::new(PlayerId::ONE, states, &mut log)
//!     .with_lane(LaneId::LANE1)
//!     .with_triggering_drone(scout);
//! let result = engine.fire_trigger(TriggerType::OnLaneMovementIn, ctx);
//!
//! assert!(result.triggered);
//! assert!(result.player_states[PlayerId::ONE].drone(DroneId(1)).is_none());
//! assert!(result.player_states[PlayerId::TWO].drone(DroneId(9)).is_none());
//! ```

use tracing::{debug, trace, warn};

use crate::abilities::{MatchQuery, TriggerMatcher, TriggerType};
use crate::catalog::AbilityCatalog;
use crate::core::{EngineConfig, LogSink, PlacedSections, PlayerStates};
use crate::effects::{BoardHooks, EffectInterpreter};

use super::context::{PairKey, PairSet, TriggerContext, TriggerEvent};
use super::timeline::{Timeline, TimelineEvent};

/// Aggregate outcome of resolving one or more events.
#[derive(Clone, Debug)]
pub struct Resolution {
    /// At least one ability executed.
    pub triggered: bool,
    pub player_states: PlayerStates,
    pub timeline: Timeline,
    pub extra_action_granted: bool,
}

impl Resolution {
    /// Nothing fired; state passes through.
    #[must_use]
    pub fn idle(player_states: PlayerStates) -> Self {
        Self {
            triggered: false,
            player_states,
            timeline: Vec::new(),
            extra_action_granted: false,
        }
    }
}

/// Result of `fire_trigger`.
#[derive(Clone, Debug)]
pub struct CascadeResult {
    pub triggered: bool,
    pub player_states: PlayerStates,
    pub timeline: Timeline,
    pub extra_action_granted: bool,
    /// Pairs that fired during the cascade, in order.
    pub pair_set: PairSet,
}

impl CascadeResult {
    fn new(resolution: Resolution, pair_set: PairSet) -> Self {
        Self {
            triggered: resolution.triggered,
            player_states: resolution.player_states,
            timeline: resolution.timeline,
            extra_action_granted: resolution.extra_action_granted,
            pair_set,
        }
    }
}

/// The trigger-resolution engine.
///
/// Holds only borrowed collaborators and configuration; every call owns
/// its own state, so one engine can serve any number of games.
#[derive(Clone)]
pub struct TriggerEngine<'a> {
    pub(super) catalog: &'a AbilityCatalog,
    pub(super) interpreter: &'a dyn EffectInterpreter,
    pub(super) hooks: &'a dyn BoardHooks,
    pub(super) config: EngineConfig,
}

impl<'a> TriggerEngine<'a> {
    /// Create an engine with the default configuration.
    pub fn new(
        catalog: &'a AbilityCatalog,
        interpreter: &'a dyn EffectInterpreter,
        hooks: &'a dyn BoardHooks,
    ) -> Self {
        Self {
            catalog,
            interpreter,
            hooks,
            config: EngineConfig::default(),
        }
    }

    /// Replace the configuration (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The catalog abilities are read from.
    #[must_use]
    pub fn catalog(&self) -> &'a AbilityCatalog {
        self.catalog
    }

    /// Resolve every ability reacting to one event.
    pub fn fire_trigger(&self, trigger_type: TriggerType, ctx: TriggerContext<'_>) -> CascadeResult {
        let event = ctx.event(trigger_type);
        let TriggerContext {
            player_states,
            placed_sections,
            log,
            mut pair_set,
            ..
        } = ctx;

        let resolution = self.resolve(&event, player_states, &placed_sections, &mut pair_set, log);
        CascadeResult::new(resolution, pair_set)
    }

    /// Resolve one event at `event.depth`, sharing `pairs` with any
    /// enclosing cascade.
    pub(super) fn resolve(
        &self,
        event: &TriggerEvent,
        player_states: PlayerStates,
        placed_sections: &PlacedSections,
        pairs: &mut PairSet,
        log: &mut dyn LogSink,
    ) -> Resolution {
        if event.depth >= self.config.max_chain_depth {
            warn!(
                trigger = %event.trigger_type,
                depth = event.depth,
                "chain depth ceiling reached; trigger ignored"
            );
            return Resolution::idle(player_states);
        }

        let candidates = {
            let query = MatchQuery {
                trigger_type: event.trigger_type,
                lane: event.lane,
                triggering_drone: event.triggering_drone.as_ref(),
                triggering_player: event.triggering_player,
                acting_player: event.acting_player,
                player_states: &player_states,
                card: event.card.as_ref(),
            };
            TriggerMatcher::find_matches(self.catalog, &query)
        };

        if candidates.is_empty() {
            trace!(trigger = %event.trigger_type, "no listeners");
            return Resolution::idle(player_states);
        }

        let source = event.source();
        let mut out = Resolution::idle(player_states);

        for candidate in &candidates {
            let holder = &candidate.holder;

            if !out.player_states[candidate.holder_player].is_in_lane(holder.id, candidate.holder_lane) {
                debug!(holder = %holder.id, ability = %candidate.ability.name, "holder gone; skipped");
                continue;
            }

            let key = PairKey::new(holder.id, source);
            if !pairs.insert(key) {
                debug!(pair = %key, "pair already fired; skipped");
                continue;
            }

            let states = std::mem::take(&mut out.player_states);
            let executed = self.execute_ability(candidate, event, states, placed_sections, pairs, log);
            out.player_states = executed.player_states;

            if !executed.triggered {
                continue;
            }

            out.triggered = true;
            out.extra_action_granted |= executed.extra_action_granted;
            out.timeline.extend(executed.timeline);
            out.timeline.push(TimelineEvent::snapshot(&out.player_states));
        }

        out
    }
}
