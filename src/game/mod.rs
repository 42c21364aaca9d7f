//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Ticks, turn requests and collision checks operate on an explicit [`GameState`],
//! so whole games can be replayed deterministically in tests.

pub mod action;
pub mod bot;
pub mod config;
pub mod engine;
pub mod interpolation;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Player};
pub use config::GameConfig;
pub use engine::{Collision, GameEngine, TickInfo};
pub use interpolation::HeadTween;
pub use state::{CollisionType, Experience, GameMode, GameState, Outcome, Position, Snake};
