use serde::{Deserialize, Serialize};

use scroller_core::geometry::{HasBounds, Pt, Rect};
use scroller_core::powerup;

/// Half extent of a pickup's square hit box.
const HALF_SIZE: i32 = 8;

/// Platformer power-up effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Aliens are worth double and the shooter holds fire.
    DoubleScore,
}

impl powerup::PowerUpKind for PowerUpKind {}

/// Running effect, owned by the game rather than the pickup.
pub type ActivePowerUp = powerup::ActivePowerUp<PowerUpKind>;

/// Pickup lying in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pos: Pt,
    kind: PowerUpKind,
    collected: bool,
    frames_remaining: u32,
}

impl PowerUp {
    pub fn new(pos: Pt) -> Self {
        Self {
            pos,
            kind: PowerUpKind::DoubleScore,
            collected: false,
            frames_remaining: 0,
        }
    }

    pub fn pos(&self) -> Pt {
        self.pos
    }

    pub fn kind(&self) -> PowerUpKind {
        self.kind
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    pub fn frames_remaining(&self) -> u32 {
        self.frames_remaining
    }

    /// Mark collected and hand back the effect it grants for `frames`.
    pub fn collect(&mut self, frames: u32) -> ActivePowerUp {
        self.collected = true;
        self.frames_remaining = frames;
        ActivePowerUp::new(self.kind, frames)
    }
}

impl HasBounds for PowerUp {
    fn rect(&self) -> Rect {
        Rect::centered(self.pos, HALF_SIZE, HALF_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;

    #[test]
    fn double_score_expires_after_configured_frames() {
        let frames = RulesConfig::default().double_score_frames;
        let mut pu = PowerUp::new(Pt::new(0, 0));
        let mut active = pu.collect(frames);
        assert_eq!(active.kind, PowerUpKind::DoubleScore);
        for _ in 0..frames - 1 {
            active.tick();
        }
        assert!(!active.is_expired());
        assert_eq!(active.seconds_left(60), 1);
        active.tick();
        assert!(active.is_expired());
    }

    #[test]
    fn collect_records_granted_frames() {
        let mut pu = PowerUp::new(Pt::new(0, 0));
        assert!(!pu.is_collected());
        assert_eq!(pu.frames_remaining(), 0);

        let active = pu.collect(90);
        assert!(pu.is_collected());
        assert_eq!(pu.frames_remaining(), 90);
        assert_eq!(active.remaining, 90);
    }

    #[test]
    fn hit_box_is_square() {
        let pu = PowerUp::new(Pt::new(10, 20));
        assert_eq!(pu.rect(), Rect::new(2, 12, 18, 28));
    }
}
