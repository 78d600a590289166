//! Timed action flags for polling-based event detection
//!
//! Mode state machines never block. Waiting is expressed by arming an
//! [`Action`] with a delay and polling it on later ticks; the scheduler
//! expires flags nobody consumed so that stale events are not acted on.
//!
//! # Example
//!
//! ```rust
//! use strato_rats_core::scheduler::{Action, ActionScheduler};
//!
//! let mut scheduler = ActionScheduler::new();
//! scheduler.arm(Action::GpsWaitMsg, 2);
//!
//! scheduler.tick();
//! assert!(!scheduler.poll(Action::GpsWaitMsg));
//! scheduler.tick();
//! assert!(scheduler.poll(Action::GpsWaitMsg));
//! assert!(!scheduler.poll(Action::GpsWaitMsg));
//! ```

pub mod action;
pub mod flags;

pub use action::{Action, NUM_ACTIONS};
pub use flags::{ActionFlag, ActionScheduler, FLAG_STALE_TICKS};
