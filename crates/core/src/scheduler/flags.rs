//! Action flag table
//!
//! One [`ActionFlag`] per [`Action`], stored in a fixed array. A flag moves
//! through three states:
//!
//! - idle: neither armed nor pending
//! - armed: counting down ticks until it becomes pending
//! - pending: waiting to be consumed by exactly one `poll`
//!
//! Pending flags age once per tick and are cleared unconsumed once they are
//! older than [`FLAG_STALE_TICKS`].

use super::action::{Action, NUM_ACTIONS};

/// Ticks a flag may stay pending before it is cleared unconsumed
pub const FLAG_STALE_TICKS: u8 = 3;

/// State of a single action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionFlag {
    /// Ready to be consumed by `poll`
    pub pending: bool,
    /// Ticks spent pending
    pub age_ticks: u8,
    /// Ticks left until the flag becomes pending
    pub countdown: Option<u32>,
}

impl ActionFlag {
    const IDLE: ActionFlag = ActionFlag {
        pending: false,
        age_ticks: 0,
        countdown: None,
    };
}

/// Fixed-size registry of timed action flags
#[derive(Debug, Clone)]
pub struct ActionScheduler {
    flags: [ActionFlag; NUM_ACTIONS],
    expired_count: u32,
}

impl ActionScheduler {
    /// Create a scheduler with every flag idle (const fn for static initialization).
    pub const fn new() -> Self {
        Self {
            flags: [ActionFlag::IDLE; NUM_ACTIONS],
            expired_count: 0,
        }
    }

    /// Arm `action` to become pending after `delay_ticks` ticks.
    ///
    /// A delay of 0 makes the flag pending immediately. Re-arming clears any
    /// pending state and restarts the timer, so one arm yields at most one
    /// successful poll.
    pub fn arm(&mut self, action: Action, delay_ticks: u32) {
        let flag = &mut self.flags[action.index()];
        flag.age_ticks = 0;
        if delay_ticks == 0 {
            flag.pending = true;
            flag.countdown = None;
        } else {
            flag.pending = false;
            flag.countdown = Some(delay_ticks);
        }
    }

    /// Consume the pending state of `action`.
    ///
    /// Returns `true` exactly once per firing.
    pub fn poll(&mut self, action: Action) -> bool {
        let flag = &mut self.flags[action.index()];
        if flag.pending {
            flag.pending = false;
            flag.age_ticks = 0;
            true
        } else {
            false
        }
    }

    /// Disarm `action`, dropping both countdown and pending state.
    pub fn cancel(&mut self, action: Action) {
        self.flags[action.index()] = ActionFlag::IDLE;
    }

    /// Check whether `action` is pending without consuming it
    pub fn is_pending(&self, action: Action) -> bool {
        self.flags[action.index()].pending
    }

    /// Check whether `action` is counting down
    pub fn is_armed(&self, action: Action) -> bool {
        self.flags[action.index()].countdown.is_some()
    }

    /// Inspect the raw flag state
    pub fn flag(&self, action: Action) -> ActionFlag {
        self.flags[action.index()]
    }

    /// Number of flags cleared unconsumed since start
    pub fn expired_count(&self) -> u32 {
        self.expired_count
    }

    /// Advance every flag by one tick.
    ///
    /// Called once per loop before any mode logic runs. Pending flags age
    /// first and expire when stale; countdowns then advance, and a countdown
    /// that reaches zero makes its flag pending with age 0.
    pub fn tick(&mut self) {
        for flag in self.flags.iter_mut() {
            if flag.pending {
                flag.age_ticks = flag.age_ticks.saturating_add(1);
                if flag.age_ticks > FLAG_STALE_TICKS {
                    flag.pending = false;
                    flag.age_ticks = 0;
                    self.expired_count = self.expired_count.saturating_add(1);
                }
            }

            if let Some(remaining) = flag.countdown {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    flag.countdown = None;
                    flag.pending = true;
                    flag.age_ticks = 0;
                } else {
                    flag.countdown = Some(remaining);
                }
            }
        }
    }
}

impl Default for ActionScheduler {
    fn default() -> Self {
        Self::new()
    }
}
