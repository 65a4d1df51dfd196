//! Engine module for the online timer.
//!
//! - `countdown`: countdown state machine and one-second run loop

pub mod countdown;

pub use countdown::{Countdown, CountdownEvent};
