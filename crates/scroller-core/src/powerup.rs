use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Trait for game-specific power-up kind enums. How long an effect runs is
/// game configuration, not a property of the kind.
pub trait PowerUpKind: Clone + Copy + PartialEq + Serialize + DeserializeOwned {}

/// A running power-up effect, counted down once per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ActivePowerUp<K: PowerUpKind> {
    pub kind: K,
    pub remaining: u32,
}

impl<K: PowerUpKind> ActivePowerUp<K> {
    pub fn new(kind: K, frames: u32) -> Self {
        Self {
            kind,
            remaining: frames,
        }
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Remaining time in whole seconds at `fps`, rounded up.
    pub fn seconds_left(&self, fps: u32) -> u32 {
        self.remaining.div_ceil(fps.max(1))
    }
}
