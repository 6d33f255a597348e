//! Ability execution integration tests.
//!
//! Scaling repeats, damage to the triggering drone, self-destruction and
//! effects aimed at drones that are already gone.

use drone_ccg::abilities::{Ability, OwnerRule, TriggerType};
use drone_ccg::catalog::{AbilityCatalog, DroneTemplate};
use drone_ccg::core::{
    DroneId, DroneInstance, GameLog, LaneId, NullLog, PlayerId, PlayerMap, PlayerState,
    PlayerStates, StatKind,
};
use drone_ccg::effects::{BasicInterpreter, DefaultBoardHooks, Effect};
use drone_ccg::engine::{kinds, CascadeResult, TimelineEvent, TriggerContext, TriggerEngine};
use proptest::prelude::*;

// === Fixtures ===

fn catalog() -> AbilityCatalog {
    let mut catalog = AbilityCatalog::new();
    catalog
        .register(DroneTemplate::new("Scout").with_stats(2, 0, 1, 3))
        .unwrap();
    catalog
        .register(DroneTemplate::new("Frigate").with_stats(5, 1, 2, 1))
        .unwrap();
    catalog
        .register(DroneTemplate::new("Bastion").with_stats(5, 5, 1, 0))
        .unwrap();
    catalog
        .register(
            DroneTemplate::new("Mine").with_stats(1, 0, 0, 0).with_ability(
                Ability::triggered("Detonate", TriggerType::OnLaneMovementIn)
                    .with_owner_rule(OwnerRule::LaneEnemy)
                    .with_effect(Effect::damage_triggering(3))
                    .destroy_after_trigger(),
            ),
        )
        .unwrap();
    catalog
        .register(
            DroneTemplate::new("Snare").with_stats(2, 0, 0, 0).with_ability(
                Ability::triggered("Entangle", TriggerType::OnLaneMovementIn)
                    .with_owner_rule(OwnerRule::LaneEnemy)
                    .with_effect(Effect::exhaust_triggering()),
            ),
        )
        .unwrap();
    catalog
        .register(
            DroneTemplate::new("Harvester").with_stats(3, 0, 1, 1).with_ability(
                Ability::triggered("Reap", TriggerType::OnEnergyGained)
                    .with_scaling_divisor(2)
                    .with_effect(Effect::modify_stat(StatKind::Attack, 1)),
            ),
        )
        .unwrap();
    catalog
        .register(
            DroneTemplate::new("Martyr").with_stats(1, 0, 0, 2).with_ability(
                Ability::triggered("Last Stand", TriggerType::OnMove)
                    .with_effect(Effect::destroy_self())
                    .destroy_after_trigger(),
            ),
        )
        .unwrap();
    catalog
        .register(
            DroneTemplate::new("Medic").with_stats(4, 0, 0, 2).with_ability(
                Ability::triggered("Patch Up", TriggerType::OnMove).with_effect(Effect::heal(3)),
            ),
        )
        .unwrap();
    catalog
}

fn empty_states() -> PlayerStates {
    PlayerMap::new(|p| PlayerState::new(p.to_string()))
}

fn spawn(catalog: &AbilityCatalog, name: &str, id: u32, owner: PlayerId) -> DroneInstance {
    catalog.template_for(name).unwrap().spawn(DroneId(id), owner)
}

/// Player two's mine waits in lane one; `mover` (player one) enters it.
fn enter_minefield(catalog: &AbilityCatalog, mover: &str) -> CascadeResult {
    let hooks = DefaultBoardHooks::new(catalog);
    let interpreter = BasicInterpreter::new(catalog, &hooks);
    let engine = TriggerEngine::new(catalog, &interpreter, &hooks);

    let mut states = empty_states();
    states[PlayerId::TWO].deploy(LaneId::LANE1, spawn(catalog, "Mine", 20, PlayerId::TWO));
    let drone = spawn(catalog, mover, 1, PlayerId::ONE);
    states[PlayerId::ONE].deploy(LaneId::LANE1, drone.clone());

    let mut log = NullLog;
    let ctx = TriggerContext::new(PlayerId::ONE, states, &mut log)
        .with_lane(LaneId::LANE1)
        .with_triggering_drone(drone);
    engine.fire_trigger(TriggerType::OnLaneMovementIn, ctx)
}

fn harvest(catalog: &AbilityCatalog, scaling: Option<i64>) -> CascadeResult {
    let hooks = DefaultBoardHooks::new(catalog);
    let interpreter = BasicInterpreter::new(catalog, &hooks);
    let engine = TriggerEngine::new(catalog, &interpreter, &hooks);

    let mut states = empty_states();
    states[PlayerId::ONE].deploy(LaneId::LANE2, spawn(catalog, "Harvester", 3, PlayerId::ONE));

    let mut log = NullLog;
    let mut ctx = TriggerContext::new(PlayerId::ONE, states, &mut log);
    ctx.scaling_amount = scaling;
    engine.fire_trigger(TriggerType::OnEnergyGained, ctx)
}

fn damage_dealt(result: &CascadeResult) -> (i64, i64) {
    result
        .timeline
        .iter()
        .find_map(|e| match e {
            TimelineEvent::DamageDealt {
                shield_damage,
                hull_damage,
                ..
            } => Some((*shield_damage, *hull_damage)),
            _ => None,
        })
        .unwrap()
}

fn destroyed_count(result: &CascadeResult) -> usize {
    result
        .timeline
        .iter()
        .filter(|e| matches!(e, TimelineEvent::DroneDestroyed { .. }))
        .count()
}

// === Scaling ===

#[test]
fn test_scaling_repeats_effects() {
    let catalog = catalog();
    let result = harvest(&catalog, Some(5));

    assert!(result.triggered);
    assert_eq!(
        kinds(&result.timeline),
        vec!["ABILITY_FIRED", "STAT_MODIFIED", "STAT_MODIFIED", "STATE_SNAPSHOT"]
    );
    let harvester = result.player_states[PlayerId::ONE].drone(DroneId(3)).unwrap();
    assert_eq!(harvester.modifier_total(StatKind::Attack), 2);
}

#[test]
fn test_scaling_below_divisor_does_not_fire() {
    let catalog = catalog();
    let result = harvest(&catalog, Some(1));

    assert!(!result.triggered);
    assert!(result.timeline.is_empty());
    // The pair is spent even though nothing happened.
    assert_eq!(result.pair_set.keys(), vec!["drone_3:system"]);
    let harvester = result.player_states[PlayerId::ONE].drone(DroneId(3)).unwrap();
    assert_eq!(harvester.modifier_total(StatKind::Attack), 0);
}

#[test]
fn test_missing_scaling_amount_fires_once() {
    let catalog = catalog();
    let result = harvest(&catalog, None);

    assert!(result.triggered);
    let harvester = result.player_states[PlayerId::ONE].drone(DroneId(3)).unwrap();
    assert_eq!(harvester.modifier_total(StatKind::Attack), 1);
}

proptest! {
    #[test]
    fn prop_repeats_are_amount_over_divisor(amount in 1i64..60, divisor in 1u32..6) {
        let mut catalog = AbilityCatalog::new();
        catalog
            .register(
                DroneTemplate::new("Accumulator").with_stats(3, 0, 0, 1).with_ability(
                    Ability::triggered("Charge", TriggerType::OnCardDrawn)
                        .with_scaling_divisor(divisor)
                        .with_effect(Effect::modify_stat_permanent(StatKind::Speed, 1)),
                ),
            )
            .unwrap();
        let hooks = DefaultBoardHooks::new(&catalog);
        let interpreter = BasicInterpreter::new(&catalog, &hooks);
        let engine = TriggerEngine::new(&catalog, &interpreter, &hooks);

        let mut states = empty_states();
        states[PlayerId::TWO].deploy(LaneId::LANE1, spawn(&catalog, "Accumulator", 8, PlayerId::TWO));

        let mut log = NullLog;
        let ctx = TriggerContext::new(PlayerId::TWO, states, &mut log).with_scaling_amount(amount);
        let result = engine.fire_trigger(TriggerType::OnCardDrawn, ctx);

        let expected = amount / i64::from(divisor);
        let modified = result
            .timeline
            .iter()
            .filter(|e| matches!(e, TimelineEvent::StatModified { .. }))
            .count();
        prop_assert_eq!(i64::try_from(modified).unwrap(), expected);
        prop_assert_eq!(result.triggered, expected > 0);

        let drone = result.player_states[PlayerId::TWO].drone(DroneId(8)).unwrap();
        prop_assert_eq!(drone.modifier_total(StatKind::Speed), expected);
    }
}

// === Damage to the Triggering Drone ===

#[test]
fn test_mine_strips_shield_then_hull() {
    let catalog = catalog();
    let result = enter_minefield(&catalog, "Frigate");

    assert_eq!(damage_dealt(&result), (1, 2));
    let frigate = result.player_states[PlayerId::ONE].drone(DroneId(1)).unwrap();
    assert_eq!((frigate.shields, frigate.hull), (0, 3));

    assert_eq!(
        kinds(&result.timeline),
        vec!["ABILITY_FIRED", "DAMAGE_DEALT", "DRONE_DESTROYED", "STATE_SNAPSHOT"]
    );
    assert!(result.timeline[2].destroys(DroneId(20)));
}

#[test]
fn test_shields_absorb_everything() {
    let catalog = catalog();
    let result = enter_minefield(&catalog, "Bastion");

    assert_eq!(damage_dealt(&result), (3, 0));
    let bastion = result.player_states[PlayerId::ONE].drone(DroneId(1)).unwrap();
    assert_eq!((bastion.shields, bastion.hull), (2, 5));
}

#[test]
fn test_mine_destroys_weak_mover() {
    let catalog = catalog();
    let result = enter_minefield(&catalog, "Scout");

    assert_eq!(damage_dealt(&result), (0, 2));
    assert_eq!(
        kinds(&result.timeline),
        vec![
            "ABILITY_FIRED",
            "DAMAGE_DEALT",
            "DRONE_DESTROYED",
            "DRONE_DESTROYED",
            "STATE_SNAPSHOT",
        ]
    );
    assert!(result.timeline[2].destroys(DroneId(1)));
    assert!(result.timeline[3].destroys(DroneId(20)));

    let one = &result.player_states[PlayerId::ONE];
    let two = &result.player_states[PlayerId::TWO];
    assert!(one.drone(DroneId(1)).is_none());
    assert!(two.drone(DroneId(20)).is_none());
    assert_eq!(one.drones_destroyed, 1);
    assert_eq!(two.drones_destroyed, 1);
    assert!(one.deployed_counts.get("Scout").is_none());
    assert!(two.deployed_counts.get("Mine").is_none());
}

#[test]
fn test_effect_on_destroyed_triggering_drone_is_skipped() {
    let catalog = catalog();
    let hooks = DefaultBoardHooks::new(&catalog);
    let interpreter = BasicInterpreter::new(&catalog, &hooks);
    let engine = TriggerEngine::new(&catalog, &interpreter, &hooks);

    let mut states = empty_states();
    states[PlayerId::TWO].deploy(LaneId::LANE1, spawn(&catalog, "Mine", 20, PlayerId::TWO));
    states[PlayerId::TWO].deploy(LaneId::LANE1, spawn(&catalog, "Snare", 21, PlayerId::TWO));
    let scout = spawn(&catalog, "Scout", 1, PlayerId::ONE);
    states[PlayerId::ONE].deploy(LaneId::LANE1, scout.clone());

    let mut log = NullLog;
    let ctx = TriggerContext::new(PlayerId::ONE, states, &mut log)
        .with_lane(LaneId::LANE1)
        .with_triggering_drone(scout);
    let result = engine.fire_trigger(TriggerType::OnLaneMovementIn, ctx);

    assert_eq!(
        kinds(&result.timeline),
        vec![
            "ABILITY_FIRED",
            "DAMAGE_DEALT",
            "DRONE_DESTROYED",
            "DRONE_DESTROYED",
            "STATE_SNAPSHOT",
            "ABILITY_FIRED",
            "STATE_SNAPSHOT",
        ]
    );
    assert!(result.player_states[PlayerId::TWO].drone(DroneId(21)).is_some());
}

#[test]
fn test_triggering_drone_effect_goes_to_interpreter() {
    let catalog = catalog();
    let hooks = DefaultBoardHooks::new(&catalog);
    let interpreter = BasicInterpreter::new(&catalog, &hooks);
    let engine = TriggerEngine::new(&catalog, &interpreter, &hooks);

    let mut states = empty_states();
    states[PlayerId::TWO].deploy(LaneId::LANE3, spawn(&catalog, "Snare", 21, PlayerId::TWO));
    let frigate = spawn(&catalog, "Frigate", 1, PlayerId::ONE);
    states[PlayerId::ONE].deploy(LaneId::LANE3, frigate.clone());

    let mut log = NullLog;
    let ctx = TriggerContext::new(PlayerId::ONE, states, &mut log)
        .with_lane(LaneId::LANE3)
        .with_triggering_drone(frigate);
    let result = engine.fire_trigger(TriggerType::OnLaneMovementIn, ctx);

    assert_eq!(
        kinds(&result.timeline),
        vec!["ABILITY_FIRED", "EXHAUSTED", "STATE_SNAPSHOT"]
    );
    assert!(result.player_states[PlayerId::ONE].drone(DroneId(1)).unwrap().is_exhausted);
}

// === Holder Effects ===

#[test]
fn test_self_destruction_reported_once() {
    let catalog = catalog();
    let hooks = DefaultBoardHooks::new(&catalog);
    let interpreter = BasicInterpreter::new(&catalog, &hooks);
    let engine = TriggerEngine::new(&catalog, &interpreter, &hooks);

    let mut states = empty_states();
    let martyr = spawn(&catalog, "Martyr", 6, PlayerId::TWO);
    states[PlayerId::TWO].deploy(LaneId::LANE2, martyr.clone());

    let mut log = GameLog::new();
    let ctx = TriggerContext::new(PlayerId::TWO, states, &mut log)
        .with_lane(LaneId::LANE2)
        .with_triggering_drone(martyr);
    let result = engine.fire_trigger(TriggerType::OnMove, ctx);

    assert!(result.triggered);
    assert_eq!(destroyed_count(&result), 1);
    assert!(result.player_states[PlayerId::TWO].drone(DroneId(6)).is_none());
    assert_eq!(result.player_states[PlayerId::TWO].drones_destroyed, 1);
    assert_eq!(log.entries_of("DESTROYED").count(), 1);
}

#[test]
fn test_heal_capped_at_template_hull() {
    let catalog = catalog();
    let hooks = DefaultBoardHooks::new(&catalog);
    let interpreter = BasicInterpreter::new(&catalog, &hooks);
    let engine = TriggerEngine::new(&catalog, &interpreter, &hooks);

    let mut states = empty_states();
    let mut medic = spawn(&catalog, "Medic", 2, PlayerId::ONE);
    medic.hull = 2;
    states[PlayerId::ONE].deploy(LaneId::LANE1, medic.clone());

    let mut log = NullLog;
    let ctx = TriggerContext::new(PlayerId::ONE, states, &mut log)
        .with_lane(LaneId::LANE1)
        .with_triggering_drone(medic);
    let result = engine.fire_trigger(TriggerType::OnMove, ctx);

    assert!(result
        .timeline
        .iter()
        .any(|e| matches!(e, TimelineEvent::Healed { amount: 2, .. })));
    assert_eq!(result.player_states[PlayerId::ONE].drone(DroneId(2)).unwrap().hull, 4);
}
