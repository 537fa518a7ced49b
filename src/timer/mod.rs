//! Timer module for the focus timer.
//!
//! This module contains the countdown core:
//! - `engine`: state machine with mode transitions and completion handling
//! - `scheduler`: the single live one-second tick callback
//! - `controller`: keeps the scheduler in step with the engine

pub mod controller;
pub mod engine;
pub mod scheduler;

pub use controller::TimerController;
pub use engine::{TimerEngine, TimerEvent};
pub use scheduler::{TickFired, TickScheduler};
