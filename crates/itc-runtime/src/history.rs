//! Circular input history used to feed delayed rates into the response dynamics

/// Early and late input rates of the most recent steps.
///
/// Both channels share one write cursor. After [`RateHistory::record`] the
/// cursor slot holds the newest sample; delayed reads index backwards from it.
/// Delays of `len - 1` or more saturate to the oldest retained sample, which
/// is the slot the cursor overwrites next.
#[derive(Debug, Clone, PartialEq)]
pub struct RateHistory {
    early: Vec<f64>,
    late: Vec<f64>,
    cursor: usize,
}

impl RateHistory {
    /// Create a zeroed history of `len` slots (at least one)
    pub fn new(len: usize) -> Self {
        let len = len.max(1);
        Self {
            early: vec![0.0; len],
            late: vec![0.0; len],
            cursor: 0,
        }
    }

    /// Slots needed to cover `max_latency` at step `dt` plus the late-phase extra delay
    pub fn capacity_for(max_latency: f64, dt: f64, late_extra_delay_steps: usize) -> usize {
        (max_latency / dt).ceil().max(0.0) as usize + 1 + late_extra_delay_steps
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.early.len()
    }

    /// Always false; a history holds at least one slot
    pub fn is_empty(&self) -> bool {
        self.early.is_empty()
    }

    /// Current write position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Store the rates of the current step at the cursor
    pub fn record(&mut self, early: f64, late: f64) {
        self.early[self.cursor] = early;
        self.late[self.cursor] = late;
    }

    /// Longest delay that still resolves to a distinct sample
    pub fn max_delay(&self) -> usize {
        self.len() - 1
    }

    /// Slot index `delay` steps before the cursor, saturating at the oldest sample
    #[inline]
    pub fn index_for(&self, delay: usize) -> usize {
        let len = self.len();
        (self.cursor + len - delay.min(self.max_delay())) % len
    }

    /// Early-channel sample recorded `delay` steps ago
    pub fn early_delayed(&self, delay: usize) -> f64 {
        self.early[self.index_for(delay)]
    }

    /// Late-channel sample recorded `delay` steps ago
    pub fn late_delayed(&self, delay: usize) -> f64 {
        self.late[self.index_for(delay)]
    }

    /// Move the cursor to the next slot
    pub fn advance(&mut self) {
        self.cursor += 1;
        if self.cursor == self.len() {
            self.cursor = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity() {
        assert_eq!(RateHistory::capacity_for(0.25, 0.005, 10), 61);
        assert_eq!(RateHistory::capacity_for(0.0, 0.005, 0), 1);
        assert_eq!(RateHistory::new(0).len(), 1);
    }

    #[test]
    fn test_round_trip() {
        let mut history = RateHistory::new(8);
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];

        for (i, &v) in values.iter().enumerate() {
            history.record(v, -v);
            // Zero delay reads the sample just written
            assert_eq!(history.early_delayed(0), v);
            for k in 1..=i {
                assert_eq!(history.early_delayed(k), values[i - k]);
                assert_eq!(history.late_delayed(k), -values[i - k]);
            }
            history.advance();
        }
    }

    #[test]
    fn test_saturation_returns_oldest_slot() {
        let mut history = RateHistory::new(4);
        for v in 1..=6 {
            history.record(v as f64, 0.0);
            history.advance();
        }
        // Buffer now holds [5, 6, 3, 4], cursor at slot 2
        history.record(7.0, 0.0);
        let len = history.len();
        let next_write = (history.cursor() + 1) % len;

        assert_eq!(history.index_for(len), next_write);
        assert_eq!(history.index_for(len + 50), next_write);
        assert_eq!(history.early_delayed(100), 4.0);
        assert_eq!(history.early_delayed(len - 1), 4.0);
        assert_eq!(history.early_delayed(len - 2), 5.0);
        assert_eq!(history.early_delayed(1), 6.0);

        history.advance();
        assert_eq!(history.cursor(), next_write);
    }

    #[test]
    fn test_cursor_wraps() {
        let mut history = RateHistory::new(3);
        for expected in [1, 2, 0, 1] {
            history.advance();
            assert_eq!(history.cursor(), expected);
        }
    }
}
