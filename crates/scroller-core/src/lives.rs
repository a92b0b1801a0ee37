/// Fixed-capacity life counter.
///
/// Slots `0..current` are active, `current..max` are lost. The boundary moves
/// one slot per `decrease`/`increase` and never leaves `0..=max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivesTracker {
    max: u32,
    current: u32,
}

impl LivesTracker {
    pub fn new(max: u32) -> Self {
        Self { max, current: max }
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn has_lives(&self) -> bool {
        self.current > 0
    }

    pub fn is_full(&self) -> bool {
        self.current == self.max
    }

    /// Lose one life. No-op at zero.
    pub fn decrease(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Gain one life. No-op at max.
    pub fn increase(&mut self) {
        if self.current < self.max {
            self.current += 1;
        }
    }

    pub fn restore(&mut self) {
        self.current = self.max;
    }

    /// Active flag per slot, in display order.
    pub fn slots(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.max).map(|i| i < self.current)
    }
}
