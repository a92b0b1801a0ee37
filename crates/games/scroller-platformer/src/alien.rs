use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use scroller_core::geometry::{HasBounds, Pt, Rect};

/// Peak distance from the spawn point, in pixels.
pub const AMPLITUDE: f64 = 20.0;
/// Larger is slower.
const PHASE_DIVISOR: f64 = 7.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementPattern {
    #[default]
    Stationary,
    Horizontal,
    Vertical,
}

impl MovementPattern {
    pub const ALL: [MovementPattern; 3] = [Self::Stationary, Self::Horizontal, Self::Vertical];
}

/// Sine offset shared by every moving alien at `frame`.
pub fn oscillation(frame: u64) -> f64 {
    AMPLITUDE * ((frame as f64 / PI) / PHASE_DIVISOR).sin()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alien {
    pos: Pt,
    center: Pt,
    pattern: MovementPattern,
}

impl Alien {
    pub fn new(center: Pt, pattern: MovementPattern) -> Self {
        Self {
            pos: center,
            center,
            pattern,
        }
    }

    pub fn pos(&self) -> Pt {
        self.pos
    }

    pub fn center(&self) -> Pt {
        self.center
    }

    pub fn pattern(&self) -> MovementPattern {
        self.pattern
    }

    /// Position for the canvas frame counter `frame`. Only the patterned axis
    /// moves; the fractional part is truncated.
    pub fn update(&mut self, frame: u64) {
        let offset = oscillation(frame);
        match self.pattern {
            MovementPattern::Stationary => {},
            MovementPattern::Horizontal => {
                self.pos.x = (self.center.x as f64 + offset) as i32;
            },
            MovementPattern::Vertical => {
                self.pos.y = (self.center.y as f64 + offset) as i32;
            },
        }
    }
}

impl HasBounds for Alien {
    fn rect(&self) -> Rect {
        Rect::new(self.pos.x - 6, self.pos.y - 5, self.pos.x + 4, self.pos.y + 3)
    }
}
