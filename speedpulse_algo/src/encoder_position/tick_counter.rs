use core::sync::atomic::{AtomicI32, Ordering};

/// Signed tick counter shared between the edge interrupt and the control loop.
///
/// Lives in a `static`; the decoder gets the only writing handle, everybody else reads snapshots.
pub struct TickCounter {
    ticks: AtomicI32,
}

impl TickCounter {
    pub const fn new() -> Self {
        Self {
            ticks: AtomicI32::new(0),
        }
    }

    /// Applies one decoded step (+1 or -1). Wraps on overflow.
    #[inline(always)]
    pub(crate) fn step(&self, step: i32) {
        self.ticks.fetch_add(step, Ordering::Relaxed);
    }

    /// Atomic snapshot of the current count.
    #[inline(always)]
    pub fn snapshot(&self) -> i32 {
        self.ticks.load(Ordering::Relaxed)
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl TickCounter {
    pub(crate) fn preset(&self, ticks: i32) {
        self.ticks.store(ticks, Ordering::Relaxed);
    }
}
