//! Core types for Taleforge: the player state, the closed set of state
//! operations, and the reducer that applies them.
//!
//! Everything in this crate is pure. A [`PlayerState`] is never mutated in
//! place by the engine: [`Reducer::apply`] takes a state by reference and
//! returns a new one, so a reader holding the previous value never observes
//! a half-applied change.

/// Error types used throughout the crate.
pub mod error;
/// The closed set of named state operations.
pub mod operation;
/// The mutation reducer and its notification side channel.
pub mod reducer;
/// Tunable constants for levelling and scoring.
pub mod rules;
/// The player-state aggregate and its invariants.
pub mod state;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the operation enum.
pub use operation::Operation;
/// Re-export reducer types.
pub use reducer::{Applied, Notification, Reducer, apply};
/// Re-export rules.
pub use rules::Rules;
/// Re-export state types.
pub use state::{PlayerState, START_SCENE};
