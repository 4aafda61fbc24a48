//! Per-tick systems operating on the world: perception, action, selection
//! and statistics.

pub mod action;
pub mod perception;
pub mod selection;
pub mod stats;
