//! # drone-ccg
//!
//! Trigger-resolution engine for a two-player, lane-based drone combat
//! card game.
//!
//! Each player has three lanes of drones. Drones carry abilities that
//! react to game events: movement, deployment, attacks, card play, card
//! draw, energy gain and round start. Given one event, the engine finds
//! every reacting ability, orders the reactions, executes each exactly
//! once (including reactions to reactions), and returns the new board
//! together with a timeline a viewer can replay.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: identical input yields identical state and
//!    timeline. The engine consumes no randomness.
//!
//! 2. **Always terminates**: a `(reactor, source)` pair guard and a
//!    recursion ceiling bound every cascade.
//!
//! 3. **Pluggable effects**: effect semantics live behind
//!    `EffectInterpreter` and `BoardHooks`; the engine special-cases only
//!    damage to the triggering drone and the go-again signal.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: board state uses `im-rs`, so state
//!   snapshots in the timeline are O(1) and never observe later writes.
//!
//! - **Explicit cascade state**: the pair set and depth are threaded
//!   through the call, never global.
//!
//! ## Modules
//!
//! - `core`: ids, players, lanes, board state, logging, configuration
//! - `catalog`: cards, drone templates and the ability catalog
//! - `abilities`: trigger types, ability data, filters, matching
//! - `effects`: effect descriptors, interpreters, board hooks
//! - `engine`: `TriggerEngine`, cascade resolution and dispatch

pub mod abilities;
pub mod catalog;
pub mod core;
pub mod effects;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    DroneId, DroneInstance, EngineConfig, GameLog, LaneId, LogEntry, LogSink, NullLog,
    PlacedSections, PlayerId, PlayerMap, PlayerState, PlayerStates, StatKind,
};

pub use crate::catalog::{AbilityCatalog, CardInfo, CardType, CatalogError, DroneTemplate};

pub use crate::abilities::{Ability, OwnerRule, TriggerFilter, TriggerScope, TriggerType};

pub use crate::effects::{
    BasicInterpreter, BoardHooks, DefaultBoardHooks, Effect, EffectInterpreter, EffectScope,
};

pub use crate::engine::{CascadeResult, Resolution, TriggerContext, TriggerEngine, TimelineEvent};
