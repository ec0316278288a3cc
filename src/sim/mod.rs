//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One state transition per animation tick
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, rects_overlap};
pub use state::{Direction, GamePhase, GameState, Player, Rgb, Rock};
pub use tick::tick;
