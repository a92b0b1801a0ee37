use serde::{Deserialize, Serialize};

/// Integer pixel coordinate in world space. `y` grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pt {
    pub x: i32,
    pub y: i32,
}

impl Pt {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Pt {
    type Output = Pt;

    fn add(self, rhs: Pt) -> Pt {
        Pt::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Axis-aligned rectangle with inclusive integer bounds.
///
/// Callers must keep `left <= right` and `top <= bottom`; this is only
/// checked in debug builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        debug_assert!(
            left <= right && top <= bottom,
            "malformed rect: ({left}, {top}, {right}, {bottom})"
        );
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle spanning `half_w`/`half_h` on each side of `center`.
    pub fn centered(center: Pt, half_w: i32, half_h: i32) -> Self {
        Self::new(
            center.x - half_w,
            center.y - half_h,
            center.x + half_w,
            center.y + half_h,
        )
    }

    /// Closed-interval overlap on both axes. Touching edges intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left <= other.right
            && self.right >= other.left
            && self.top <= other.bottom
            && self.bottom >= other.top
    }

    pub fn contains(&self, p: Pt) -> bool {
        self.left <= p.x && p.x <= self.right && self.top <= p.y && p.y <= self.bottom
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn top_left(&self) -> Pt {
        Pt::new(self.left, self.top)
    }
}

/// Anything that occupies an axis-aligned area of the world.
pub trait HasBounds {
    fn rect(&self) -> Rect;
}
