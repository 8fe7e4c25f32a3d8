//! Plane Snake - a fixed-timestep snake state machine on a bounded plane
//!
//! This library provides:
//! - Core game logic (game module): board bounds, random food placement,
//!   snake state, collision classification, and the fixed-timestep game loop
//! - Host collaborators (input, render, metrics, modes modules) that play the
//!   role of the external engine: they drive the loop with frame deltas,
//!   report contacts, and materialize state on screen

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
