//! Played-card descriptions.
//!
//! The trigger engine never resolves cards itself; it only needs enough of
//! a card to evaluate on-card-play filters (type and subtype) and to move
//! cards between deck, hand and discard.

use serde::{Deserialize, Serialize};

/// Card type. Filters on card-play triggers match against it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Ordnance,
    Tactic,
    Support,
    Upgrade,
}

/// A card as seen by the engine.
///
/// ## Example
///
/// ```
/// use drone_ccg::catalog::{CardInfo, CardType};
///
/// let card = CardInfo::new("Missile Barrage", CardType::Ordnance).with_subtype("Missile");
///
/// assert!(card.is_type(CardType::Ordnance));
/// assert!(card.has_subtype("Missile"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInfo {
    /// Card name (for display/debugging).
    pub name: String,

    /// Card type.
    pub card_type: CardType,

    /// Optional subtype (e.g. "Mine", "Missile").
    #[serde(default)]
    pub subtype: Option<String>,
}

impl CardInfo {
    /// Create a card with no subtype.
    pub fn new(name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            name: name.into(),
            card_type,
            subtype: None,
        }
    }

    /// Set the subtype (builder pattern).
    #[must_use]
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    /// Check the card type.
    #[must_use]
    pub fn is_type(&self, card_type: CardType) -> bool {
        self.card_type == card_type
    }

    /// Check the subtype (exact match).
    #[must_use]
    pub fn has_subtype(&self, subtype: &str) -> bool {
        self.subtype.as_deref() == Some(subtype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_without_subtype() {
        let card = CardInfo::new("Reroute Power", CardType::Tactic);
        assert!(card.is_type(CardType::Tactic));
        assert!(!card.is_type(CardType::Ordnance));
        assert!(!card.has_subtype("Missile"));
    }

    #[test]
    fn test_card_serialization() {
        let card = CardInfo::new("Proximity Mine", CardType::Support).with_subtype("Mine");
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"SUPPORT\""));

        let deserialized: CardInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
