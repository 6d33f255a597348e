//! Board bookkeeping hooks.
//!
//! Removing a drone is never just a lane edit: deployment counters must be
//! updated and lane auras recomputed, since the destroyed drone may have
//! been granting a bonus to its neighbours. `BoardHooks` lets the game
//! own those rules; `destroy_drone` is the single place that applies them.

use tracing::debug;

use crate::catalog::AbilityCatalog;
use crate::core::{
    DroneId, DroneInstance, LaneId, Lanes, PlacedSections, PlayerId, PlayerState,
    PlayerStateUpdate, PlayerStates, StatKind,
};

/// Game rules that run whenever the board changes shape.
pub trait BoardHooks {
    /// Bookkeeping for a drone that just left `player`'s board.
    fn on_drone_destroyed(&self, player: &PlayerState, drone: &DroneInstance) -> PlayerStateUpdate;

    /// Recompute aura-dependent stats for every drone on `player`'s board.
    fn recompute_auras(
        &self,
        player: &PlayerState,
        opponent: &PlayerState,
        placed_sections: &[String],
    ) -> Lanes;
}

/// Deployment counters and passive shield auras.
///
/// A drone's shield cap is its template shields plus shield modifiers plus
/// the `Shields` auras of every other friendly drone in its lane. Current
/// shields are clamped to the cap.
#[derive(Clone, Copy)]
pub struct DefaultBoardHooks<'a> {
    catalog: &'a AbilityCatalog,
}

impl<'a> DefaultBoardHooks<'a> {
    /// Create hooks reading auras from `catalog`.
    pub fn new(catalog: &'a AbilityCatalog) -> Self {
        Self { catalog }
    }

    fn lane_aura(&self, lane: &im::Vector<DroneInstance>, except: DroneId) -> i64 {
        lane.iter()
            .filter(|d| d.id != except)
            .filter_map(|d| self.catalog.template_for(&d.name))
            .flat_map(|t| t.auras())
            .filter(|aura| aura.stat == StatKind::Shields)
            .map(|aura| aura.value)
            .sum()
    }
}

impl BoardHooks for DefaultBoardHooks<'_> {
    fn on_drone_destroyed(&self, player: &PlayerState, drone: &DroneInstance) -> PlayerStateUpdate {
        let mut counts = player.deployed_counts.clone();
        match counts.get(&drone.name).copied() {
            Some(n) if n > 1 => {
                counts.insert(drone.name.clone(), n - 1);
            }
            Some(_) => {
                counts.remove(&drone.name);
            }
            None => {}
        }

        PlayerStateUpdate {
            deployed_counts: Some(counts),
            drones_destroyed: Some(player.drones_destroyed + 1),
        }
    }

    fn recompute_auras(
        &self,
        player: &PlayerState,
        _opponent: &PlayerState,
        _placed_sections: &[String],
    ) -> Lanes {
        let mut lanes = player.lanes.clone();
        for lane in &mut lanes {
            let snapshot = lane.clone();
            for drone in lane.iter_mut() {
                let Some(template) = self.catalog.template_for(&drone.name) else {
                    continue;
                };
                let cap = template.shields
                    + drone.modifier_total(StatKind::Shields)
                    + self.lane_aura(&snapshot, drone.id);
                drone.current_max_shields = cap.max(0);
                drone.shields = drone.shields.min(drone.current_max_shields);
            }
        }
        lanes
    }
}

/// Recompute auras on `player`'s board in place.
pub fn refresh_auras(
    states: &mut PlayerStates,
    player: PlayerId,
    hooks: &dyn BoardHooks,
    placed_sections: &PlacedSections,
) {
    let (own, opponent) = states.with_opponent(player);
    let lanes = hooks.recompute_auras(own, opponent, &placed_sections[player]);
    states[player].lanes = lanes;
}

/// Remove a drone from `owner`'s board and run destruction bookkeeping.
///
/// Returns the lane it was in and the removed instance, or `None` if the
/// drone was already gone.
pub fn destroy_drone(
    states: &mut PlayerStates,
    owner: PlayerId,
    id: DroneId,
    hooks: &dyn BoardHooks,
    placed_sections: &PlacedSections,
) -> Option<(LaneId, DroneInstance)> {
    let Some((lane, drone)) = states[owner].remove_drone(id) else {
        debug!(drone = %id, player = %owner, "destroy target already gone");
        return None;
    };

    hooks
        .on_drone_destroyed(&states[owner], &drone)
        .apply(&mut states[owner]);
    refresh_auras(states, owner, hooks, placed_sections);

    Some((lane, drone))
}
