//! Core engine types: drones, players, lanes, board state, logging and
//! configuration.
//!
//! Everything here is plain data. Rules live in `abilities`, `effects`
//! and `engine`.

pub mod config;
pub mod entity;
pub mod lane;
pub mod log;
pub mod player;
pub mod state;

pub use config::{ConfigError, EngineConfig};
pub use entity::DroneId;
pub use lane::{LaneId, LANE_COUNT};
pub use log::{GameLog, LogEntry, LogSink, NullLog};
pub use player::{InvalidPlayerId, PlayerId, PlayerMap};
pub use state::{
    DroneInstance, Lanes, PlacedSections, PlayerState, PlayerStateUpdate, PlayerStates,
    ShipSection, StatKind, StatModifier,
};
