//! Duelyard - Headless Two-Fighter Arena Duel Simulation

pub mod ai;
pub mod attack;
pub mod clock;
pub mod core;
pub mod fighter;
pub mod input;
pub mod round;
pub mod world;
