//! Event dispatch for game actions.
//!
//! Most game actions raise more than one trigger event. These helpers
//! apply the action to the board, then fire its events in rule order
//! through `fire_trigger`. Each event starts a fresh cascade (new pair
//! set, depth 0); state is threaded from one event to the next and the
//! timelines are concatenated.
//!
//! | Action     | Events                                       |
//! |------------|----------------------------------------------|
//! | Movement   | lane-out (origin), on-move, lane-in (dest.)  |
//! | Deployment | on-deploy, lane-deployment                   |
//! | Attack     | on-attack, lane-attack                       |
//! | Card play  | on-card-play                                 |
//! | Round start| on-round-start per drone, opponent first     |
//!
//! A drone destroyed by an earlier event raises no further events.

use tracing::debug;

use crate::abilities::TriggerType;
use crate::catalog::CardInfo;
use crate::core::{
    DroneId, DroneInstance, LaneId, LogSink, PlacedSections, PlayerId, PlayerStates,
};

use super::context::TriggerContext;
use super::resolver::{Resolution, TriggerEngine};

/// One event in a dispatch sequence.
struct Step<'s> {
    trigger_type: TriggerType,
    lane: Option<LaneId>,
    drone: Option<DroneInstance>,
    triggering_player: PlayerId,
    acting_player: PlayerId,
    card: Option<&'s CardInfo>,
}

impl TriggerEngine<'_> {
    /// Move a drone to another lane and resolve the movement triggers.
    ///
    /// Returns an idle resolution if the drone is not on `owner`'s board.
    pub fn resolve_movement(
        &self,
        owner: PlayerId,
        drone: DroneId,
        to: LaneId,
        mut player_states: PlayerStates,
        placed_sections: &PlacedSections,
        log: &mut dyn LogSink,
    ) -> Resolution {
        let Some(from) = player_states[owner].move_drone(drone, to) else {
            debug!(drone = %drone, player = %owner, "moving drone not on board");
            return Resolution::idle(player_states);
        };

        let sequence = [
            (TriggerType::OnLaneMovementOut, from),
            (TriggerType::OnMove, to),
            (TriggerType::OnLaneMovementIn, to),
        ];
        self.run_for_drone(owner, drone, &sequence, player_states, placed_sections, log)
    }

    /// Deploy a drone at the end of a lane and resolve deployment triggers.
    pub fn resolve_deployment(
        &self,
        lane: LaneId,
        drone: DroneInstance,
        mut player_states: PlayerStates,
        placed_sections: &PlacedSections,
        log: &mut dyn LogSink,
    ) -> Resolution {
        let (owner, id) = (drone.owner, drone.id);
        player_states[owner].deploy(lane, drone);

        let sequence = [
            (TriggerType::OnDeploy, lane),
            (TriggerType::OnLaneDeployment, lane),
        ];
        self.run_for_drone(owner, id, &sequence, player_states, placed_sections, log)
    }

    /// Resolve the triggers of a declared attack. Combat itself is not
    /// resolved here.
    pub fn resolve_attack(
        &self,
        owner: PlayerId,
        attacker: DroneId,
        player_states: PlayerStates,
        placed_sections: &PlacedSections,
        log: &mut dyn LogSink,
    ) -> Resolution {
        let Some((lane, _)) = player_states[owner].locate(attacker) else {
            debug!(drone = %attacker, player = %owner, "attacker not on board");
            return Resolution::idle(player_states);
        };

        let sequence = [
            (TriggerType::OnAttack, lane),
            (TriggerType::OnLaneAttack, lane),
        ];
        self.run_for_drone(owner, attacker, &sequence, player_states, placed_sections, log)
    }

    /// Resolve on-card-play triggers for a card `player` just played.
    ///
    /// `lane` is the lane the card targeted, if any.
    pub fn resolve_card_play(
        &self,
        player: PlayerId,
        card: &CardInfo,
        lane: Option<LaneId>,
        player_states: PlayerStates,
        placed_sections: &PlacedSections,
        log: &mut dyn LogSink,
    ) -> Resolution {
        let step = Step {
            trigger_type: TriggerType::OnCardPlay,
            lane,
            drone: None,
            triggering_player: player,
            acting_player: player,
            card: Some(card),
        };
        let mut out = Resolution::idle(player_states);
        self.run_step(step, &mut out, placed_sections, log);
        out
    }

    /// Fire on-round-start once for every drone on the board.
    ///
    /// The opponent's board goes first, then `acting_player`'s, each
    /// scanned lanes left to right. Drones destroyed by an earlier
    /// trigger are skipped.
    pub fn resolve_round_start(
        &self,
        acting_player: PlayerId,
        player_states: PlayerStates,
        placed_sections: &PlacedSections,
        log: &mut dyn LogSink,
    ) -> Resolution {
        let roster: Vec<(PlayerId, DroneId)> = [acting_player.opponent(), acting_player]
            .into_iter()
            .flat_map(|player| {
                player_states[player]
                    .drones()
                    .map(move |(_, d)| (player, d.id))
                    .collect::<Vec<_>>()
            })
            .collect();

        let mut out = Resolution::idle(player_states);
        for (owner, id) in roster {
            let Some((lane, index)) = out.player_states[owner].locate(id) else {
                debug!(drone = %id, "drone gone before its round start");
                continue;
            };
            let drone = out.player_states[owner].lane(lane)[index].clone();
            let step = Step {
                trigger_type: TriggerType::OnRoundStart,
                lane: Some(lane),
                drone: Some(drone),
                triggering_player: owner,
                acting_player,
                card: None,
            };
            self.run_step(step, &mut out, placed_sections, log);
        }
        out
    }

    /// Fire a sequence of events caused by one drone, stopping once the
    /// drone has left the board.
    fn run_for_drone(
        &self,
        owner: PlayerId,
        drone: DroneId,
        sequence: &[(TriggerType, LaneId)],
        player_states: PlayerStates,
        placed_sections: &PlacedSections,
        log: &mut dyn LogSink,
    ) -> Resolution {
        let mut out = Resolution::idle(player_states);

        for &(trigger_type, lane) in sequence {
            let Some(current) = out.player_states[owner].drone(drone).cloned() else {
                debug!(drone = %drone, trigger = %trigger_type, "drone gone; remaining events dropped");
                break;
            };
            let step = Step {
                trigger_type,
                lane: Some(lane),
                drone: Some(current),
                triggering_player: owner,
                acting_player: owner,
                card: None,
            };
            self.run_step(step, &mut out, placed_sections, log);
        }

        out
    }

    /// Fire one event as a fresh cascade and fold it into `out`.
    fn run_step(
        &self,
        step: Step<'_>,
        out: &mut Resolution,
        placed_sections: &PlacedSections,
        log: &mut dyn LogSink,
    ) {
        let states = std::mem::take(&mut out.player_states);
        let mut ctx = TriggerContext::new(step.triggering_player, states, log)
            .acted_by(step.acting_player)
            .with_placed_sections(placed_sections.clone());
        ctx.lane = step.lane;
        ctx.triggering_drone = step.drone;
        ctx.card = step.card.cloned();

        let result = self.fire_trigger(step.trigger_type, ctx);
        out.player_states = result.player_states;
        out.triggered |= result.triggered;
        out.extra_action_granted |= result.extra_action_granted;
        out.timeline.extend(result.timeline);
    }
}
