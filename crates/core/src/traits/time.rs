//! Time abstraction for elapsed-time checks.
//!
//! Motion safety timeouts and the RATS report period are measured against a
//! monotonic clock. The `TimeSource` trait keeps that clock injectable so the
//! same logic runs against the flight clock and against `MockTime` in tests.

use core::cell::Cell;

/// Monotonic time source.
///
/// # Example
///
/// ```
/// use strato_rats_core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// let start = time.now_ms();
/// time.advance_secs(3);
/// assert_eq!(time.elapsed_since(start), 3_000);
/// ```
pub trait TimeSource {
    /// Milliseconds since system start.
    fn now_ms(&self) -> u64;

    /// Whole seconds since system start.
    fn now_s(&self) -> u64 {
        self.now_ms() / 1000
    }

    /// Milliseconds elapsed since `reference_ms`, saturating at zero.
    fn elapsed_since(&self, reference_ms: u64) -> u64 {
        self.now_ms().saturating_sub(reference_ms)
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Controllable time source for deterministic tests.
#[derive(Debug, Clone, Default)]
pub struct MockTime {
    current_ms: Cell<u64>,
}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub fn new() -> Self {
        Self {
            current_ms: Cell::new(0),
        }
    }

    /// Creates a new `MockTime` starting at the given millisecond count.
    pub fn with_initial(ms: u64) -> Self {
        Self {
            current_ms: Cell::new(ms),
        }
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, ms: u64) {
        self.current_ms.set(ms);
    }

    /// Advances the current time by `ms` milliseconds.
    pub fn advance(&self, ms: u64) {
        self.current_ms.set(self.current_ms.get() + ms);
    }

    /// Advances the current time by whole seconds.
    pub fn advance_secs(&self, secs: u64) {
        self.advance(secs * 1000);
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u64 {
        self.current_ms.get()
    }
}
