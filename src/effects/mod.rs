//! Effects and the collaborators that apply them.
//!
//! - `Effect`: closed set of effect descriptors carried by abilities
//! - `EffectInterpreter`: turns one effect into a state change
//! - `BasicInterpreter`: reference interpreter for the built-in effects
//! - `BoardHooks`: destruction bookkeeping and lane-aura rules
//!
//! ## Design Philosophy
//!
//! The trigger engine recognises only three effect shapes (damage to the
//! triggering drone, self-destroy, go-again). Everything else goes
//! through the interpreter, so adding an effect means touching this
//! module and nothing in `engine`.

mod basic;
mod effect;
mod hooks;
mod interpreter;

pub use basic::BasicInterpreter;
pub use effect::{Effect, EffectScope};
pub use hooks::{destroy_drone, refresh_auras, BoardHooks, DefaultBoardHooks};
pub use interpreter::{EffectInterpreter, EffectTarget, FollowUpEvent, RouteContext, RouteResult};
