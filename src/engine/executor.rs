//! Ability execution.
//!
//! Runs one matched ability: computes how many times it repeats, emits its
//! `AbilityFired` marker, then walks its effects in order. Three shapes
//! are handled here:
//!
//! - `Damage` on the triggering drone is applied inline, shields first
//! - other triggering-drone effects go to the interpreter aimed at that drone
//! - `GoAgain` raises the extra-action flag and is never delegated
//!
//! Everything else goes to the interpreter aimed at the holder. When the
//! interpreter reports a follow-up event the executor resolves it as a
//! nested cascade, one level deeper, and splices the result in behind a
//! snapshot of the state it started from.

use tracing::debug;

use crate::abilities::TriggerMatch;
use crate::core::{LogEntry, LogSink, PlacedSections, PlayerStates};
use crate::effects::{destroy_drone, Effect, EffectScope, EffectTarget, RouteContext, RouteResult};

use super::context::{PairSet, TriggerEvent};
use super::resolver::{Resolution, TriggerEngine};
use super::timeline::{Timeline, TimelineEvent};

impl TriggerEngine<'_> {
    /// Execute one matched ability against `player_states`.
    ///
    /// Returns `triggered: false` with the state untouched when a scaling
    /// amount divides down to zero repeats.
    pub fn execute_ability(
        &self,
        matched: &TriggerMatch<'_>,
        event: &TriggerEvent,
        player_states: PlayerStates,
        placed_sections: &PlacedSections,
        pairs: &mut PairSet,
        log: &mut dyn LogSink,
    ) -> Resolution {
        let ability = matched.ability;
        let holder = &matched.holder;

        let repeats = match event.scaling_amount {
            Some(amount) if amount > 0 => amount / ability.divisor(),
            _ => 1,
        };
        if repeats <= 0 {
            debug!(
                holder = %holder.id,
                ability = %ability.name,
                scaling = ?event.scaling_amount,
                "scaling amount below divisor; not fired"
            );
            return Resolution::idle(player_states);
        }

        log.log(
            LogEntry::new("TRIGGER")
                .with_player(matched.holder_player)
                .with_source(holder.name.clone())
                .with_target(ability.name.clone())
                .with_outcome(format!("{} x{repeats}", event.trigger_type)),
        );

        let mut out = Resolution::idle(player_states);
        out.triggered = true;
        out.timeline.push(TimelineEvent::AbilityFired {
            holder_id: holder.id,
            holder_name: holder.name.clone(),
            holder_owner: matched.holder_player,
            holder_lane: matched.holder_lane,
            ability_name: ability.name.clone(),
            trigger_type: event.trigger_type,
            depth: event.depth,
            key: TimelineEvent::fired_key(holder.id, &ability.name, event.depth),
        });

        for _ in 0..repeats {
            for effect in &ability.effects {
                match (effect, effect.scope()) {
                    (Effect::GoAgain, _) => {
                        out.extra_action_granted = true;
                        out.timeline.push(TimelineEvent::ExtraActionGranted {
                            player: event.acting_player,
                        });
                        log.log(
                            LogEntry::new("GO_AGAIN")
                                .with_player(event.acting_player)
                                .with_source(holder.name.clone())
                                .with_outcome("extra action granted"),
                        );
                    }

                    (Effect::Damage { amount, .. }, EffectScope::TriggeringDrone) => {
                        self.strike_triggering_drone(*amount, event, &mut out, placed_sections, log);
                    }

                    (_, EffectScope::TriggeringDrone) => {
                        let Some(target) = Self::triggering_target(event, &out.player_states) else {
                            debug!(effect = effect.kind(), "triggering drone gone; effect skipped");
                            continue;
                        };
                        self.delegate(effect, target, matched, event, &mut out, placed_sections, pairs, log);
                    }

                    (_, EffectScope::Holder) => {
                        let lane = out.player_states[matched.holder_player]
                            .locate(holder.id)
                            .map_or(matched.holder_lane, |(lane, _)| lane);
                        let target = EffectTarget {
                            drone_id: holder.id,
                            owner: matched.holder_player,
                            lane,
                        };
                        self.delegate(effect, target, matched, event, &mut out, placed_sections, pairs, log);
                    }
                }
            }
        }

        if ability.destroy_after_trigger {
            if let Some((lane, drone)) = destroy_drone(
                &mut out.player_states,
                matched.holder_player,
                holder.id,
                self.hooks,
                placed_sections,
            ) {
                log.log(
                    LogEntry::new("DESTROYED")
                        .with_player(matched.holder_player)
                        .with_source(ability.name.clone())
                        .with_target(drone.name.clone())
                        .with_outcome("destroyed after trigger"),
                );
                out.timeline.push(TimelineEvent::DroneDestroyed {
                    drone_id: drone.id,
                    drone_name: drone.name,
                    owner: matched.holder_player,
                    lane,
                });
            }
        }

        out
    }

    /// Flat damage straight onto the live triggering drone.
    fn strike_triggering_drone(
        &self,
        amount: i64,
        event: &TriggerEvent,
        out: &mut Resolution,
        placed_sections: &PlacedSections,
        log: &mut dyn LogSink,
    ) {
        let Some(triggering) = event.triggering_drone.as_ref() else {
            debug!("damage aimed at triggering drone, but there is none");
            return;
        };
        let owner = triggering.owner;

        let Some(target) = out.player_states[owner].drone_mut(triggering.id) else {
            debug!(drone = %triggering.id, "triggering drone already gone; damage skipped");
            return;
        };

        let (shield_damage, hull_damage) = target.absorb_damage(amount);
        let destroyed = target.is_destroyed();
        out.timeline.push(TimelineEvent::DamageDealt {
            drone_id: triggering.id,
            owner,
            shield_damage,
            hull_damage,
        });

        if !destroyed {
            return;
        }

        if let Some((lane, drone)) =
            destroy_drone(&mut out.player_states, owner, triggering.id, self.hooks, placed_sections)
        {
            log.log(
                LogEntry::new("DESTROYED")
                    .with_player(owner)
                    .with_target(drone.name.clone())
                    .with_outcome(format!("{shield_damage} shield / {hull_damage} hull damage")),
            );
            out.timeline.push(TimelineEvent::DroneDestroyed {
                drone_id: drone.id,
                drone_name: drone.name,
                owner,
                lane,
            });
        }
    }

    /// Hand an effect to the interpreter and fold its result into `out`.
    #[allow(clippy::too_many_arguments)]
    fn delegate(
        &self,
        effect: &Effect,
        target: EffectTarget,
        matched: &TriggerMatch<'_>,
        event: &TriggerEvent,
        out: &mut Resolution,
        placed_sections: &PlacedSections,
        pairs: &mut PairSet,
        log: &mut dyn LogSink,
    ) {
        let routed = self.interpreter.route(
            effect,
            RouteContext {
                target,
                source: matched.holder.id,
                acting_player: event.acting_player,
                player_states: &out.player_states,
                placed_sections,
                log: &mut *log,
            },
        );

        let RouteResult {
            player_states,
            timeline,
            follow_up,
            nested_timeline,
            pre_cascade_state,
        } = routed;

        out.player_states = player_states;
        out.timeline.extend(timeline);
        splice_nested(&mut out.timeline, pre_cascade_state.as_ref(), nested_timeline);

        let Some(follow_up) = follow_up else {
            return;
        };

        let nested_event = TriggerEvent {
            trigger_type: follow_up.trigger_type,
            lane: follow_up.lane,
            triggering_drone: None,
            triggering_player: follow_up.player,
            acting_player: event.acting_player,
            card: None,
            scaling_amount: follow_up.scaling_amount,
            depth: event.depth + 1,
        };

        let pre_cascade = out.player_states.clone();
        let states = std::mem::take(&mut out.player_states);
        let nested = self.resolve(&nested_event, states, placed_sections, pairs, log);

        out.player_states = nested.player_states;
        out.extra_action_granted |= nested.extra_action_granted;
        if nested.triggered {
            splice_nested(&mut out.timeline, Some(&pre_cascade), nested.timeline);
        }
    }

    fn triggering_target(event: &TriggerEvent, states: &PlayerStates) -> Option<EffectTarget> {
        let drone = event.triggering_drone.as_ref()?;
        let (lane, _) = states[drone.owner].locate(drone.id)?;
        Some(EffectTarget {
            drone_id: drone.id,
            owner: drone.owner,
            lane,
        })
    }
}

/// Append a nested cascade, preceded by the state it started from.
fn splice_nested(timeline: &mut Timeline, pre_cascade: Option<&PlayerStates>, nested: Timeline) {
    if let Some(states) = pre_cascade {
        timeline.push(TimelineEvent::snapshot(states));
    }
    timeline.extend(nested);
}
