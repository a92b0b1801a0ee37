use serde::{Deserialize, Serialize};

use scroller_core::geometry::{HasBounds, Pt, Rect};

const HALF_SIZE: i32 = 5;

/// Refills every life when picked up with at least one missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medkit {
    pos: Pt,
    active: bool,
}

impl Medkit {
    pub fn new(pos: Pt) -> Self {
        Self { pos, active: true }
    }

    pub fn pos(&self) -> Pt {
        self.pos
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn collect(&mut self) {
        self.active = false;
    }
}

impl HasBounds for Medkit {
    fn rect(&self) -> Rect {
        Rect::centered(self.pos, HALF_SIZE, HALF_SIZE)
    }
}
