//! Soft drop latch for terminals without key release events.
//!
//! Holding a key makes the terminal resend the press at its repeat rate. The
//! latch stays engaged while presses keep arriving and lets go once none has
//! been seen for the grace period.

use crate::types::SOFT_DROP_GRACE_MS;

#[derive(Debug, Clone)]
pub struct SoftDropLatch {
    engaged: bool,
    last_press_ms: u64,
    grace_ms: u64,
}

impl SoftDropLatch {
    pub fn new() -> Self {
        Self::with_grace_ms(SOFT_DROP_GRACE_MS as u64)
    }

    pub fn with_grace_ms(grace_ms: u64) -> Self {
        Self {
            engaged: false,
            last_press_ms: 0,
            grace_ms,
        }
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Record a press; returns true when this press engages the latch.
    pub fn press(&mut self, now_ms: u64) -> bool {
        self.last_press_ms = now_ms;
        let newly = !self.engaged;
        self.engaged = true;
        newly
    }

    /// Explicit release; returns true if the latch was engaged.
    pub fn release(&mut self) -> bool {
        std::mem::replace(&mut self.engaged, false)
    }

    /// Returns true when the grace period just ran out.
    pub fn update(&mut self, now_ms: u64) -> bool {
        if self.engaged && now_ms.saturating_sub(self.last_press_ms) > self.grace_ms {
            self.engaged = false;
            return true;
        }
        false
    }
}

impl Default for SoftDropLatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_engages_once() {
        let mut latch = SoftDropLatch::with_grace_ms(100);
        assert!(latch.press(0));
        assert!(!latch.press(30));
        assert!(latch.is_engaged());
    }

    #[test]
    fn test_repeated_presses_keep_latch() {
        let mut latch = SoftDropLatch::with_grace_ms(100);
        latch.press(0);
        for t in (30..600).step_by(30) {
            latch.press(t);
            assert!(!latch.update(t + 10));
        }
        assert!(latch.is_engaged());
    }

    #[test]
    fn test_expires_after_grace() {
        let mut latch = SoftDropLatch::with_grace_ms(100);
        latch.press(1_000);
        assert!(!latch.update(1_100));
        assert!(latch.update(1_101));
        assert!(!latch.is_engaged());
        // Only reported once
        assert!(!latch.update(2_000));
    }

    #[test]
    fn test_release() {
        let mut latch = SoftDropLatch::new();
        assert!(!latch.release());
        latch.press(0);
        assert!(latch.release());
        assert!(!latch.update(10_000));
    }
}
