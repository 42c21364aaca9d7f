//! Duel Snake - terminal Snake for one or two players
//!
//! This library provides:
//! - Core game logic: ticks, turns, collisions, bot, interpolation (game module)
//! - Menu/pause/game-over flow without I/O (session module)
//! - TUI rendering and key mapping (render, input modules)
//! - The interactive terminal loop (modes module)
//! - Single character classification used by the `charclass` tool

pub mod charclass;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;
