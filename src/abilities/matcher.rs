//! Trigger matching.
//!
//! Given an event, the matcher scans the board and returns every triggered
//! ability that reacts to it, in resolution order. Matching has no side
//! effects; the result is a pure function of the query.
//!
//! ## Ordering
//!
//! Matches are bucketed into tiers and stable-sorted by tier only:
//!
//! 1. `SelfTrigger`: abilities on the drone performing the action. For
//!    lane triggers this is the drone entering, leaving, deploying into or
//!    attacking from the lane; board scans skip it.
//! 2. `ActingPlayer`: abilities on the acting player's board
//! 3. `Opponent`: abilities on the opponent's board
//!
//! Within a tier, board order is preserved (lanes left to right, then
//! position within the lane).
//!
//! ## Example
//!
//! ```
//! use drone_ccg::abilities::{Ability, MatchQuery, MatchTier, TriggerMatcher, TriggerType};
//! use drone_ccg::catalog::{AbilityCatalog, DroneTemplate};
//! use drone_ccg::core::{DroneId, LaneId, PlayerId, PlayerMap, PlayerState};
//! use drone_ccg::effects::Effect;
//!
//! let mut catalog = AbilityCatalog::new();
//! catalog.register(
//!     DroneTemplate::new("Beacon")
//!         .with_stats(2, 0, 0, 1)
//!         .with_ability(
//!             Ability::triggered("Signal", TriggerType::OnLaneDeployment)
//!                 .with_effect(Effect::gain_energy(1)),
//!         ),
//! ).unwrap();
//!
//! let mut states = PlayerMap::new(|p| PlayerState::new(p.to_string()));
//! let beacon = catalog.template_for("Beacon").unwrap().spawn(DroneId(1), PlayerId::ONE);
//! states[PlayerId::ONE].deploy(LaneId::LANE2, beacon);
//!
//! let query = MatchQuery::new(TriggerType::OnLaneDeployment, PlayerId::ONE, &states)
//!     .in_lane(LaneId::LANE2);
//! let matches = TriggerMatcher::find_matches(&catalog, &query);
//!
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].tier, MatchTier::ActingPlayer);
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::catalog::{AbilityCatalog, CardInfo};
use crate::core::{DroneInstance, LaneId, PlayerId, PlayerStates};

use super::ability::{Ability, TriggerScope};
use super::filter::{FilterContext, FilterEvaluator};
use super::trigger::{TriggerCategory, TriggerType};

/// Priority bucket of a match. Lower tiers resolve first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchTier {
    SelfTrigger = 0,
    ActingPlayer = 1,
    Opponent = 2,
}

/// Event description handed to the matcher.
#[derive(Clone, Copy)]
pub struct MatchQuery<'a> {
    pub trigger_type: TriggerType,
    pub lane: Option<LaneId>,
    pub triggering_drone: Option<&'a DroneInstance>,
    pub triggering_player: PlayerId,
    pub acting_player: PlayerId,
    pub player_states: &'a PlayerStates,
    pub card: Option<&'a CardInfo>,
}

impl<'a> MatchQuery<'a> {
    /// Create a query for an event caused and acted by `player`.
    pub fn new(trigger_type: TriggerType, player: PlayerId, player_states: &'a PlayerStates) -> Self {
        Self {
            trigger_type,
            lane: None,
            triggering_drone: None,
            triggering_player: player,
            acting_player: player,
            player_states,
            card: None,
        }
    }

    /// Set the event lane (builder pattern).
    #[must_use]
    pub fn in_lane(mut self, lane: LaneId) -> Self {
        self.lane = Some(lane);
        self
    }

    /// Set the triggering drone (builder pattern).
    #[must_use]
    pub fn by_drone(mut self, drone: &'a DroneInstance) -> Self {
        self.triggering_drone = Some(drone);
        self
    }

    /// Set the acting player when it differs from the triggering player.
    #[must_use]
    pub fn acted_by(mut self, player: PlayerId) -> Self {
        self.acting_player = player;
        self
    }

    /// Set the played card (builder pattern).
    #[must_use]
    pub fn with_card(mut self, card: &'a CardInfo) -> Self {
        self.card = Some(card);
        self
    }
}

/// One ability selected to react to an event.
#[derive(Clone, Debug)]
pub struct TriggerMatch<'c> {
    /// The drone holding the ability, as it was when matched.
    pub holder: DroneInstance,
    pub ability: &'c Ability,
    pub holder_player: PlayerId,
    pub holder_lane: LaneId,
    pub tier: MatchTier,
}

/// Stateless trigger matcher.
pub struct TriggerMatcher;

impl TriggerMatcher {
    /// Find every ability reacting to the queried event, in resolution order.
    pub fn find_matches<'c>(catalog: &'c AbilityCatalog, query: &MatchQuery<'_>) -> Vec<TriggerMatch<'c>> {
        let mut matches = Vec::new();

        match query.trigger_type.category() {
            TriggerCategory::Self_ => Self::collect_self(catalog, query, &mut matches),
            TriggerCategory::Lane => {
                Self::collect_self(catalog, query, &mut matches);
                Self::collect_lane(catalog, query, &mut matches);
            }
            TriggerCategory::Controller => Self::collect_controller(catalog, query, &mut matches),
        }

        // Stable: board order survives within a tier.
        matches.sort_by_key(|m| m.tier);
        matches
    }

    fn collect_self<'c>(
        catalog: &'c AbilityCatalog,
        query: &MatchQuery<'_>,
        out: &mut Vec<TriggerMatch<'c>>,
    ) {
        let Some(drone) = query.triggering_drone else {
            return;
        };
        let Some(template) = catalog.template_for(&drone.name) else {
            trace!(drone = %drone.name, "no template for triggering drone");
            return;
        };

        let board_lane = query.player_states[drone.owner]
            .locate(drone.id)
            .map(|(lane, _)| lane);
        let Some(holder_lane) = board_lane.or(query.lane) else {
            trace!(drone = %drone.id, "self trigger holder has no lane");
            return;
        };

        for ability in template.abilities_for(query.trigger_type) {
            if Self::accepts(catalog, query, ability, drone.owner, holder_lane) {
                out.push(TriggerMatch {
                    holder: drone.clone(),
                    ability,
                    holder_player: drone.owner,
                    holder_lane,
                    tier: MatchTier::SelfTrigger,
                });
            }
        }
    }

    fn collect_lane<'c>(
        catalog: &'c AbilityCatalog,
        query: &MatchQuery<'_>,
        out: &mut Vec<TriggerMatch<'c>>,
    ) {
        let Some(lane) = query.lane else {
            return;
        };

        for player in Self::scan_order(query.acting_player) {
            for holder in query.player_states[player].lane(lane) {
                if Self::is_triggering_drone(query, holder, player) {
                    continue;
                }
                Self::collect_holder(catalog, query, holder, player, lane, out);
            }
        }
    }

    fn collect_controller<'c>(
        catalog: &'c AbilityCatalog,
        query: &MatchQuery<'_>,
        out: &mut Vec<TriggerMatch<'c>>,
    ) {
        for player in Self::scan_order(query.acting_player) {
            for (lane, holder) in query.player_states[player].drones() {
                Self::collect_holder(catalog, query, holder, player, lane, out);
            }
        }
    }

    fn collect_holder<'c>(
        catalog: &'c AbilityCatalog,
        query: &MatchQuery<'_>,
        holder: &DroneInstance,
        holder_player: PlayerId,
        holder_lane: LaneId,
        out: &mut Vec<TriggerMatch<'c>>,
    ) {
        let Some(template) = catalog.template_for(&holder.name) else {
            trace!(drone = %holder.name, "no template for holder");
            return;
        };

        let tier = if holder_player == query.acting_player {
            MatchTier::ActingPlayer
        } else {
            MatchTier::Opponent
        };

        for ability in template.abilities_for(query.trigger_type) {
            if Self::accepts(catalog, query, ability, holder_player, holder_lane) {
                out.push(TriggerMatch {
                    holder: holder.clone(),
                    ability,
                    holder_player,
                    holder_lane,
                    tier,
                });
            }
        }
    }

    /// Ownership, scope and filter checks.
    fn accepts(
        catalog: &AbilityCatalog,
        query: &MatchQuery<'_>,
        ability: &Ability,
        holder_player: PlayerId,
        holder_lane: LaneId,
    ) -> bool {
        if !ability
            .effective_owner_rule()
            .admits(holder_player, query.triggering_player)
        {
            return false;
        }

        if query.trigger_type.category() == TriggerCategory::Controller
            && ability.scope == TriggerScope::SameLane
            && query.lane != Some(holder_lane)
        {
            return false;
        }

        ability.filter.as_ref().is_none_or(|filter| {
            let ctx = FilterContext {
                card: query.card,
                triggering_drone: query.triggering_drone,
                catalog,
            };
            FilterEvaluator::evaluate(filter, &ctx)
        })
    }

    fn is_triggering_drone(query: &MatchQuery<'_>, drone: &DroneInstance, owner: PlayerId) -> bool {
        query
            .triggering_drone
            .is_some_and(|t| t.id == drone.id && t.owner == owner)
    }

    fn scan_order(acting: PlayerId) -> [PlayerId; 2] {
        [acting, acting.opponent()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::{OwnerRule, TriggerFilter};
    use crate::catalog::{CardType, DroneTemplate};
    use crate::core::{DroneId, PlayerMap, PlayerState};
    use crate::effects::Effect;

    fn catalog() -> AbilityCatalog {
        let mut catalog = AbilityCatalog::new();
        catalog
            .register(DroneTemplate::new("Scout").with_stats(2, 0, 1, 3))
            .unwrap();
        catalog
            .register(
                DroneTemplate::new("Runner")
                    .with_stats(2, 0, 1, 3)
                    .with_ability(
                        Ability::triggered("Momentum", TriggerType::OnMove)
                            .with_effect(Effect::modify_stat(crate::core::StatKind::Attack, 1)),
                    )
                    .with_ability(
                        Ability::triggered("Escort", TriggerType::OnLaneMovementIn)
                            .with_effect(Effect::go_again()),
                    ),
            )
            .unwrap();
        catalog
            .register(
                DroneTemplate::new("Mine")
                    .with_stats(1, 0, 0, 0)
                    .with_ability(
                        Ability::triggered("Detonate", TriggerType::OnLaneMovementIn)
                            .with_owner_rule(OwnerRule::LaneEnemy)
                            .with_effect(Effect::damage_triggering(3))
                            .destroy_after_trigger(),
                    ),
            )
            .unwrap();
        catalog
            .register(
                DroneTemplate::new("Archivist")
                    .with_stats(2, 0, 1, 1)
                    .with_ability(
                        Ability::triggered("Catalogue", TriggerType::OnCardPlay)
                            .with_filter(TriggerFilter::card_type(CardType::Tactic))
                            .with_effect(Effect::draw(1)),
                    ),
            )
            .unwrap();
        catalog
            .register(
                DroneTemplate::new("Picket")
                    .with_stats(2, 0, 1, 1)
                    .with_ability(
                        Ability::triggered("Local Alert", TriggerType::OnCardPlay)
                            .with_scope(TriggerScope::SameLane)
                            .with_effect(Effect::gain_energy(1)),
                    ),
            )
            .unwrap();
        catalog
    }

    fn states() -> PlayerStates {
        PlayerMap::new(|p| PlayerState::new(p.to_string()))
    }

    fn spawn(catalog: &AbilityCatalog, name: &str, id: u32, owner: PlayerId) -> DroneInstance {
        catalog.template_for(name).unwrap().spawn(DroneId(id), owner)
    }

    #[test]
    fn test_no_listeners() {
        let catalog = catalog();
        let states = states();
        let query = MatchQuery::new(TriggerType::OnAttack, PlayerId::ONE, &states);
        assert!(TriggerMatcher::find_matches(&catalog, &query).is_empty());
    }

    #[test]
    fn test_tier_order() {
        let catalog = catalog();
        let mut states = states();
        let mover = spawn(&catalog, "Runner", 1, PlayerId::ONE);
        states[PlayerId::TWO].deploy(LaneId::LANE2, spawn(&catalog, "Mine", 20, PlayerId::TWO));
        states[PlayerId::ONE].deploy(LaneId::LANE2, spawn(&catalog, "Runner", 2, PlayerId::ONE));
        states[PlayerId::ONE].deploy(LaneId::LANE2, mover.clone());

        let query = MatchQuery::new(TriggerType::OnLaneMovementIn, PlayerId::ONE, &states)
            .in_lane(LaneId::LANE2)
            .by_drone(&mover);
        let matches = TriggerMatcher::find_matches(&catalog, &query);

        let order: Vec<_> = matches.iter().map(|m| (m.holder.id.raw(), m.tier)).collect();
        assert_eq!(
            order,
            vec![
                (1, MatchTier::SelfTrigger),
                (2, MatchTier::ActingPlayer),
                (20, MatchTier::Opponent)
            ]
        );
    }

    #[test]
    fn test_self_trigger_uses_current_lane() {
        let catalog = catalog();
        let mut states = states();
        let runner = spawn(&catalog, "Runner", 1, PlayerId::ONE);
        states[PlayerId::ONE].deploy(LaneId::LANE3, runner.clone());

        let query = MatchQuery::new(TriggerType::OnMove, PlayerId::ONE, &states)
            .in_lane(LaneId::LANE1)
            .by_drone(&runner);
        let matches = TriggerMatcher::find_matches(&catalog, &query);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].tier, MatchTier::SelfTrigger);
        assert_eq!(matches[0].holder_lane, LaneId::LANE3);
        assert_eq!(matches[0].ability.name, "Momentum");
    }

    #[test]
    fn test_lane_enemy_rule() {
        let catalog = catalog();
        let mut states = states();
        states[PlayerId::TWO].deploy(LaneId::LANE1, spawn(&catalog, "Mine", 10, PlayerId::TWO));
        let friendly = spawn(&catalog, "Scout", 11, PlayerId::TWO);
        let enemy = spawn(&catalog, "Scout", 1, PlayerId::ONE);

        let query = MatchQuery::new(TriggerType::OnLaneMovementIn, PlayerId::TWO, &states)
            .in_lane(LaneId::LANE1)
            .by_drone(&friendly);
        assert!(TriggerMatcher::find_matches(&catalog, &query).is_empty());

        let query = MatchQuery::new(TriggerType::OnLaneMovementIn, PlayerId::ONE, &states)
            .in_lane(LaneId::LANE1)
            .by_drone(&enemy);
        let matches = TriggerMatcher::find_matches(&catalog, &query);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].holder.id, DroneId(10));
    }

    #[test]
    fn test_lane_trigger_requires_lane() {
        let catalog = catalog();
        let mut states = states();
        states[PlayerId::TWO].deploy(LaneId::LANE1, spawn(&catalog, "Mine", 10, PlayerId::TWO));

        let query = MatchQuery::new(TriggerType::OnLaneMovementIn, PlayerId::ONE, &states);
        assert!(TriggerMatcher::find_matches(&catalog, &query).is_empty());
    }

    #[test]
    fn test_controller_filter_and_owner() {
        let catalog = catalog();
        let mut states = states();
        states[PlayerId::ONE].deploy(LaneId::LANE1, spawn(&catalog, "Archivist", 1, PlayerId::ONE));
        states[PlayerId::TWO].deploy(LaneId::LANE1, spawn(&catalog, "Archivist", 2, PlayerId::TWO));

        let tactic = CardInfo::new("Evasive Maneuvers", CardType::Tactic);
        let ordnance = CardInfo::new("Laser Blast", CardType::Ordnance);

        let query = MatchQuery::new(TriggerType::OnCardPlay, PlayerId::ONE, &states).with_card(&tactic);
        let matches = TriggerMatcher::find_matches(&catalog, &query);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].holder_player, PlayerId::ONE);

        let query = MatchQuery::new(TriggerType::OnCardPlay, PlayerId::ONE, &states).with_card(&ordnance);
        assert!(TriggerMatcher::find_matches(&catalog, &query).is_empty());
    }

    #[test]
    fn test_same_lane_scope() {
        let catalog = catalog();
        let mut states = states();
        states[PlayerId::ONE].deploy(LaneId::LANE2, spawn(&catalog, "Picket", 1, PlayerId::ONE));
        let card = CardInfo::new("Rally", CardType::Support);

        let elsewhere = MatchQuery::new(TriggerType::OnCardPlay, PlayerId::ONE, &states)
            .with_card(&card)
            .in_lane(LaneId::LANE1);
        assert!(TriggerMatcher::find_matches(&catalog, &elsewhere).is_empty());

        let no_lane = MatchQuery::new(TriggerType::OnCardPlay, PlayerId::ONE, &states).with_card(&card);
        assert!(TriggerMatcher::find_matches(&catalog, &no_lane).is_empty());

        let here = elsewhere.in_lane(LaneId::LANE2);
        assert_eq!(TriggerMatcher::find_matches(&catalog, &here).len(), 1);
    }

    #[test]
    fn test_acting_player_scanned_first() {
        let catalog = catalog();
        let mut states = states();
        let tactic = CardInfo::new("Feint", CardType::Tactic);
        states[PlayerId::ONE].deploy(LaneId::LANE3, spawn(&catalog, "Picket", 1, PlayerId::ONE));
        states[PlayerId::TWO].deploy(LaneId::LANE1, spawn(&catalog, "Archivist", 2, PlayerId::TWO));
        states[PlayerId::TWO].deploy(LaneId::LANE3, spawn(&catalog, "Archivist", 3, PlayerId::TWO));

        // Player one's picket only hears its own controller.
        let query = MatchQuery::new(TriggerType::OnCardPlay, PlayerId::TWO, &states)
            .with_card(&tactic)
            .acted_by(PlayerId::TWO);
        let ids: Vec<_> = TriggerMatcher::find_matches(&catalog, &query)
            .iter()
            .map(|m| m.holder.id.raw())
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
