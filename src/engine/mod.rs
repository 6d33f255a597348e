//! The trigger-resolution engine.
//!
//! - `context`: caller-supplied event context and the pair guard
//! - `resolver`: `TriggerEngine` and the `fire_trigger` entry point
//! - `executor`: runs a single matched ability
//! - `dispatch`: multi-event helpers for movement, deployment, attacks,
//!   card play and round start
//! - `timeline`: replayable cascade output
//!
//! ## Guarantees
//!
//! - Deterministic: same input, same output. No randomness, no hashing
//!   influences order.
//! - Terminating: the pair guard stops two-drone loops, the depth ceiling
//!   stops everything else.
//! - Infallible: missing targets and exhausted depth degrade to no-ops.

pub mod context;
pub mod dispatch;
pub mod executor;
pub mod resolver;
pub mod timeline;

pub use context::{PairKey, PairSet, SourceId, TriggerContext, TriggerEvent};
pub use resolver::{CascadeResult, Resolution, TriggerEngine};
pub use timeline::{kinds, Timeline, TimelineEvent};
