//! **maze_backtracker** generates perfect mazes with the recursive backtracker algorithm and
//! renders them as text or in an SDL window.

pub mod cells;
pub mod config;
pub mod cursor;
pub mod generators;
pub mod grid;
pub mod renderers;
pub mod units;
#[cfg(feature = "window")]
mod sdl;
