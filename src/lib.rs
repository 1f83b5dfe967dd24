//! Aliens vs Humans: a side-scrolling shooter driven by a frame-stepped
//! actor scheduler.
//!
//! The library holds the whole simulation and never touches the terminal;
//! the `aliens` binary feeds it key state and a clock and draws the result.

pub mod actor;
pub mod assets;
pub mod audio;
pub mod collision;
pub mod config;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod game;
pub mod input;
pub mod level;
pub mod projectile;
pub mod scenery;
pub mod scheduler;
pub mod ship;
