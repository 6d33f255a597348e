//! Static game data: cards, drone templates and the ability catalog.

pub mod card;
pub mod registry;
pub mod template;

pub use card::{CardInfo, CardType};
pub use registry::{AbilityCatalog, CatalogError};
pub use template::DroneTemplate;
