//! Drone templates.
//!
//! A template is the static half of a drone: base stats and the ability
//! list. Instances on the board refer to their template by name.

use serde::{Deserialize, Serialize};

use crate::abilities::{Ability, LaneAura, TriggerType};
use crate::core::{DroneId, DroneInstance, PlayerId, StatKind};

/// Static definition of a drone type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DroneTemplate {
    /// Unique template name.
    pub name: String,

    /// Maximum hull.
    pub hull: i64,

    /// Base shields.
    pub shields: i64,

    /// Base attack.
    pub attack: i64,

    /// Base speed.
    pub speed: i64,

    /// Abilities, in declaration order.
    pub abilities: Vec<Ability>,
}

impl DroneTemplate {
    /// Create a template with zeroed stats and no abilities.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set base stats (builder pattern).
    #[must_use]
    pub fn with_stats(mut self, hull: i64, shields: i64, attack: i64, speed: i64) -> Self {
        self.hull = hull;
        self.shields = shields;
        self.attack = attack;
        self.speed = speed;
        self
    }

    /// Add an ability (builder pattern).
    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    /// Base value of a stat.
    #[must_use]
    pub fn base_stat(&self, stat: StatKind) -> i64 {
        match stat {
            StatKind::Attack => self.attack,
            StatKind::Speed => self.speed,
            StatKind::Hull => self.hull,
            StatKind::Shields => self.shields,
        }
    }

    /// Triggered abilities listening for `trigger`, in declaration order.
    pub fn abilities_for(&self, trigger: TriggerType) -> impl Iterator<Item = &Ability> {
        self.abilities.iter().filter(move |a| a.listens_to(trigger))
    }

    /// Lane auras granted by this template's passive abilities.
    pub fn auras(&self) -> impl Iterator<Item = LaneAura> + '_ {
        self.abilities.iter().filter_map(|a| a.aura)
    }

    /// Create a fresh instance of this template.
    #[must_use]
    pub fn spawn(&self, id: DroneId, owner: PlayerId) -> DroneInstance {
        DroneInstance::new(id, self.name.clone(), owner, self.hull, self.shields)
    }
}
