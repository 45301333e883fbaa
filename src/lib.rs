//! Flux Intersection Simulation Library
//!
//! Simulates traffic through a single four-way signalized intersection,
//! comparing a fixed-timer light policy against an adaptive one with
//! emergency-vehicle preemption. Can run independently or with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
