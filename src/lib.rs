//! Core simulation for a terminal alien-invasion shooter.
//!
//! `entities` holds the pure data model, `compute` the pure per-tick
//! simulation functions, and `display` the crossterm rendering layer.
//! The binary in `main.rs` wires them to a real terminal.

pub mod compute;
pub mod display;
pub mod entities;
