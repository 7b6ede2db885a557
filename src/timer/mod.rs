//! Countdown engine for the timer.
//!
//! This module contains the countdown machinery:
//! - `controller`: state transitions wired to scheduling and audio effects
//! - `ticker`: the cancelable once-per-second decrement source

pub mod controller;
pub mod ticker;

pub use controller::{TimerController, TimerEvent, TICK_PERIOD};
pub use ticker::{TickEvent, TickerHandle};
