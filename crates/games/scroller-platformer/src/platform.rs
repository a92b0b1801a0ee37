use serde::{Deserialize, Serialize};

use scroller_core::geometry::{HasBounds, Pt, Rect};

/// A horizontal ledge. Stationary until first stood on, then it bobs
/// vertically around its original top forever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    left: i32,
    right: i32,
    top: i32,
    bottom: i32,
    moving: bool,
    speed: i32,
    /// 1 moves down, -1 moves up.
    direction: i32,
    range: i32,
    initial_top: i32,
}

impl Platform {
    pub const DEFAULT_SPEED: i32 = 1;
    pub const DEFAULT_RANGE: i32 = 50;

    pub fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self::with_motion(left, right, top, bottom, Self::DEFAULT_SPEED, Self::DEFAULT_RANGE)
    }

    pub fn with_motion(left: i32, right: i32, top: i32, bottom: i32, speed: i32, range: i32) -> Self {
        debug_assert!(left <= right && top <= bottom);
        Self {
            left,
            right,
            top,
            bottom,
            moving: false,
            speed,
            direction: 1,
            range,
            initial_top: top,
        }
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn initial_top(&self) -> i32 {
        self.initial_top
    }

    pub fn range(&self) -> i32 {
        self.range
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Vertical step the next `update` applies; a rider is carried by it
    /// so it stays on the surface once the platform has moved.
    pub fn frame_displacement(&self) -> i32 {
        if self.moving {
            self.speed * self.direction
        } else {
            0
        }
    }

    pub fn start_moving(&mut self) {
        self.moving = true;
    }

    /// True if the segment `prev → curr` went through the top surface from
    /// above, with both endpoints inside the platform's horizontal span.
    pub fn has_crossed_floor_downwards(&self, prev: Pt, curr: Pt) -> bool {
        let within = |x: i32| self.left <= x && x <= self.right;
        within(prev.x) && within(curr.x) && prev.y <= self.top && curr.y >= self.top
    }

    /// Advance one frame of oscillation.
    pub fn update(&mut self) {
        if !self.moving {
            return;
        }
        let step = self.speed * self.direction;
        let low = self.initial_top - self.range;
        let high = self.initial_top + self.range;
        let new_top = (self.top + step).clamp(low, high);

        let dy = new_top - self.top;
        self.top += dy;
        self.bottom += dy;

        if (self.top - self.initial_top).abs() >= self.range {
            self.direction = -self.direction;
        }
    }
}

impl HasBounds for Platform {
    fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom)
    }
}
