//! Ability catalog.
//!
//! The `AbilityCatalog` stores every drone template for a match and is
//! the engine's only source of ability data. It is built once, before play
//! starts, and then only read.

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::template::DroneTemplate;
use crate::core::{DroneInstance, StatKind};

/// Errors raised while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("drone template `{0}` is already registered")]
    DuplicateTemplate(String),

    #[error("ability `{ability}` on `{template}` has a scaling divisor of 0")]
    InvalidScalingDivisor { template: String, ability: String },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Registry of drone templates.
///
/// ## Example
///
/// ```
/// use drone_ccg::catalog::{AbilityCatalog, DroneTemplate};
///
/// let mut catalog = AbilityCatalog::new();
/// catalog.register(DroneTemplate::new("Scout").with_stats(2, 1, 1, 5)).unwrap();
///
/// let scout = catalog.template_for("Scout").unwrap();
/// assert_eq!(scout.speed, 5);
/// assert!(catalog.template_for("Dreadnought").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct AbilityCatalog {
    templates: FxHashMap<String, DroneTemplate>,
}

impl AbilityCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a JSON array of templates.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let templates: Vec<DroneTemplate> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for template in templates {
            catalog.register(template)?;
        }
        Ok(catalog)
    }

    /// Register a template.
    ///
    /// Rejects duplicate names and zero scaling divisors.
    pub fn register(&mut self, template: DroneTemplate) -> Result<(), CatalogError> {
        if self.templates.contains_key(&template.name) {
            return Err(CatalogError::DuplicateTemplate(template.name));
        }
        if let Some(ability) = template
            .abilities
            .iter()
            .find(|a| a.scaling_divisor == Some(0))
        {
            return Err(CatalogError::InvalidScalingDivisor {
                template: template.name.clone(),
                ability: ability.name.clone(),
            });
        }
        self.templates.insert(template.name.clone(), template);
        Ok(())
    }

    /// Look up a template by drone name.
    #[must_use]
    pub fn template_for(&self, name: &str) -> Option<&DroneTemplate> {
        self.templates.get(name)
    }

    /// Check if a template is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over all templates (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &DroneTemplate> {
        self.templates.values()
    }

    /// A drone's stat: template base plus modifiers.
    ///
    /// Hull and shields are live values and are read from the instance.
    /// Drones with no template count as zero base.
    #[must_use]
    pub fn effective_stat(&self, drone: &DroneInstance, stat: StatKind) -> i64 {
        match stat {
            StatKind::Hull => drone.hull,
            StatKind::Shields => drone.shields,
            StatKind::Attack | StatKind::Speed => {
                let base = self
                    .template_for(&drone.name)
                    .map_or(0, |t| t.base_stat(stat));
                base + drone.modifier_total(stat)
            }
        }
    }
}
