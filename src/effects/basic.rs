//! Reference effect interpreter.
//!
//! `BasicInterpreter` implements the standard drone effects. Games with
//! richer effect semantics plug in their own `EffectInterpreter`; the
//! trigger engine does not change.

use tracing::debug;

use crate::abilities::TriggerType;
use crate::catalog::AbilityCatalog;
use crate::core::{LogEntry, PlayerStates, StatModifier};
use crate::engine::TimelineEvent;

use super::hooks::{destroy_drone, refresh_auras, BoardHooks};
use super::interpreter::{EffectInterpreter, FollowUpEvent, RouteContext, RouteResult};
use super::Effect;

/// Interpreter for the built-in effect set.
#[derive(Clone, Copy)]
pub struct BasicInterpreter<'a> {
    catalog: &'a AbilityCatalog,
    hooks: &'a dyn BoardHooks,
}

impl<'a> BasicInterpreter<'a> {
    /// Create an interpreter.
    pub fn new(catalog: &'a AbilityCatalog, hooks: &'a dyn BoardHooks) -> Self {
        Self { catalog, hooks }
    }
}

impl EffectInterpreter for BasicInterpreter<'_> {
    fn route(&self, effect: &Effect, ctx: RouteContext<'_>) -> RouteResult {
        let target = ctx.target;
        let mut states: PlayerStates = ctx.player_states.clone();
        let mut events = Vec::new();
        let mut follow_up = None;

        match effect {
            Effect::Draw { count } => {
                let drawn = states[target.owner].draw(*count);
                events.push(TimelineEvent::CardsDrawn {
                    player: target.owner,
                    count: drawn,
                });
                if drawn > 0 {
                    follow_up = Some(FollowUpEvent {
                        trigger_type: TriggerType::OnCardDrawn,
                        player: target.owner,
                        lane: None,
                        scaling_amount: Some(i64::from(drawn)),
                    });
                }
            }

            Effect::GainEnergy { amount } => {
                states[target.owner].energy += amount;
                events.push(TimelineEvent::EnergyGained {
                    player: target.owner,
                    amount: *amount,
                });
                if *amount > 0 {
                    follow_up = Some(FollowUpEvent {
                        trigger_type: TriggerType::OnEnergyGained,
                        player: target.owner,
                        lane: None,
                        scaling_amount: Some(*amount),
                    });
                }
            }

            Effect::Destroy { .. } => {
                if let Some((lane, drone)) = destroy_drone(
                    &mut states,
                    target.owner,
                    target.drone_id,
                    self.hooks,
                    ctx.placed_sections,
                ) {
                    ctx.log.log(
                        LogEntry::new("DESTROYED")
                            .with_player(target.owner)
                            .with_source(ctx.source.to_string())
                            .with_target(drone.name.clone()),
                    );
                    events.push(TimelineEvent::DroneDestroyed {
                        drone_id: drone.id,
                        drone_name: drone.name,
                        owner: target.owner,
                        lane,
                    });
                }
            }

            Effect::GoAgain => {}

            drone_effect => {
                let Some(drone) = states[target.owner].drone_mut(target.drone_id) else {
                    debug!(drone = %target.drone_id, effect = drone_effect.kind(), "effect target missing");
                    return RouteResult::unchanged(ctx.player_states);
                };

                match drone_effect {
                    Effect::Damage { amount, .. } => {
                        let (shield_damage, hull_damage) = drone.absorb_damage(*amount);
                        let destroyed = drone.is_destroyed();
                        events.push(TimelineEvent::DamageDealt {
                            drone_id: target.drone_id,
                            owner: target.owner,
                            shield_damage,
                            hull_damage,
                        });
                        if destroyed {
                            if let Some((lane, drone)) = destroy_drone(
                                &mut states,
                                target.owner,
                                target.drone_id,
                                self.hooks,
                                ctx.placed_sections,
                            ) {
                                events.push(TimelineEvent::DroneDestroyed {
                                    drone_id: drone.id,
                                    drone_name: drone.name,
                                    owner: target.owner,
                                    lane,
                                });
                            }
                        }
                    }

                    Effect::Heal { amount, .. } => {
                        let cap = self
                            .catalog
                            .template_for(&drone.name)
                            .map_or(drone.hull, |t| t.hull);
                        let before = drone.hull;
                        drone.hull = (before + (*amount).max(0)).min(cap.max(before));
                        events.push(TimelineEvent::Healed {
                            drone_id: target.drone_id,
                            owner: target.owner,
                            amount: drone.hull - before,
                        });
                    }

                    Effect::ModifyStat {
                        stat,
                        value,
                        permanent,
                        ..
                    } => {
                        drone.modifiers.push(StatModifier {
                            stat: *stat,
                            value: *value,
                            permanent: *permanent,
                        });
                        events.push(TimelineEvent::StatModified {
                            drone_id: target.drone_id,
                            owner: target.owner,
                            stat: *stat,
                            value: *value,
                            permanent: *permanent,
                        });
                        refresh_auras(&mut states, target.owner, self.hooks, ctx.placed_sections);
                    }

                    Effect::Exhaust { .. } => {
                        drone.is_exhausted = true;
                        events.push(TimelineEvent::Exhausted {
                            drone_id: target.drone_id,
                            owner: target.owner,
                        });
                    }

                    Effect::Ready { .. } => {
                        drone.is_exhausted = false;
                        events.push(TimelineEvent::Readied {
                            drone_id: target.drone_id,
                            owner: target.owner,
                        });
                    }

                    Effect::Draw { .. }
                    | Effect::GainEnergy { .. }
                    | Effect::Destroy { .. }
                    | Effect::GoAgain => {}
                }
            }
        }

        let mut result = RouteResult::new(states);
        result.timeline = events;
        result.follow_up = follow_up;
        result
    }
}
