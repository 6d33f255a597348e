//! Effect interpreter interface.
//!
//! The trigger engine hands every effect it does not special-case to an
//! `EffectInterpreter`. The interpreter owns effect semantics; the engine
//! only relies on two things:
//!
//! - `route` is a pure function of its inputs (apart from the log sink)
//! - any further trigger activity is reported back, either as a
//!   `follow_up` event for the engine to resolve, or as an already
//!   resolved `nested_timeline` with the `pre_cascade_state` it started
//!   from
//!
//! Closures with the right signature are interpreters too, which keeps
//! test doubles short.

use crate::abilities::TriggerType;
use crate::core::{DroneId, LaneId, LogSink, PlacedSections, PlayerId, PlayerStates};
use crate::engine::{Timeline, TimelineEvent};

use super::Effect;

/// The drone an effect resolves against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EffectTarget {
    pub drone_id: DroneId,
    pub owner: PlayerId,
    pub lane: LaneId,
}

/// Inputs for routing one effect.
pub struct RouteContext<'a> {
    /// Resolved target.
    pub target: EffectTarget,
    /// Holder of the ability that produced the effect.
    pub source: DroneId,
    /// Player who caused the original action.
    pub acting_player: PlayerId,
    pub player_states: &'a PlayerStates,
    pub placed_sections: &'a PlacedSections,
    pub log: &'a mut dyn LogSink,
}

/// A trigger event an effect produced, for the engine to resolve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FollowUpEvent {
    pub trigger_type: TriggerType,
    /// Player whose action it was.
    pub player: PlayerId,
    pub lane: Option<LaneId>,
    pub scaling_amount: Option<i64>,
}

/// Outcome of routing one effect.
#[derive(Clone, Debug)]
pub struct RouteResult {
    /// Both boards after the effect.
    pub player_states: PlayerStates,

    /// Events the effect produced.
    pub timeline: Timeline,

    /// Event for the engine to fire as a nested cascade.
    pub follow_up: Option<FollowUpEvent>,

    /// A cascade the interpreter already resolved itself.
    pub nested_timeline: Timeline,

    /// State just before `nested_timeline` started.
    pub pre_cascade_state: Option<PlayerStates>,
}

impl RouteResult {
    /// A result that changes nothing.
    #[must_use]
    pub fn unchanged(player_states: &PlayerStates) -> Self {
        Self::new(player_states.clone())
    }

    /// A result carrying new states and no events.
    #[must_use]
    pub fn new(player_states: PlayerStates) -> Self {
        Self {
            player_states,
            timeline: Vec::new(),
            follow_up: None,
            nested_timeline: Vec::new(),
            pre_cascade_state: None,
        }
    }

    /// Add an event (builder pattern).
    #[must_use]
    pub fn with_event(mut self, event: TimelineEvent) -> Self {
        self.timeline.push(event);
        self
    }

    /// Request a follow-up cascade (builder pattern).
    #[must_use]
    pub fn with_follow_up(mut self, follow_up: FollowUpEvent) -> Self {
        self.follow_up = Some(follow_up);
        self
    }

    /// Attach a cascade resolved by the interpreter (builder pattern).
    #[must_use]
    pub fn with_nested(mut self, pre_cascade_state: Option<PlayerStates>, nested: Timeline) -> Self {
        self.pre_cascade_state = pre_cascade_state;
        self.nested_timeline = nested;
        self
    }
}

/// Turns effect descriptors into state changes.
pub trait EffectInterpreter {
    /// Apply one effect.
    fn route(&self, effect: &Effect, ctx: RouteContext<'_>) -> RouteResult;
}

impl<F> EffectInterpreter for F
where
    F: Fn(&Effect, RouteContext<'_>) -> RouteResult,
{
    fn route(&self, effect: &Effect, ctx: RouteContext<'_>) -> RouteResult {
        self(effect, ctx)
    }
}
