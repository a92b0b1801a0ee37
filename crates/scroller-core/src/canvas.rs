//! The window/canvas contract the simulation is driven through, plus an
//! in-memory implementation for headless hosts and tests.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::geometry::{Pt, Rect};

/// 0xRRGGBB.
pub type Color = u32;

pub mod colors {
    use super::Color;

    pub const BLACK: Color = 0x000000;
    pub const WHITE: Color = 0xffffff;
    pub const RED: Color = 0xff0000;
    pub const GREEN: Color = 0x00ff00;
    pub const BLUE: Color = 0x0000ff;
    pub const YELLOW: Color = 0xffff00;
    pub const GREY: Color = 0x808080;
    pub const SKY_BLUE: Color = 0x5c94fc;
    pub const SALMON: Color = 0xffa07a;
}

/// Keyboard keys the games bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Space,
    Left,
    Right,
    Up,
    Down,
    Escape,
    Enter,
    /// Letter or digit. Letters are always upper case.
    Char(char),
}

impl Key {
    /// Letter key, case-insensitive.
    pub fn letter(c: char) -> Self {
        Key::Char(c.to_ascii_uppercase())
    }
}

/// Camera viewport, input state and pixel sink for one display window.
///
/// All coordinates are world coordinates; implementations translate by the
/// camera's top-left corner when writing pixels.
pub trait Canvas {
    /// World position of the viewport's top-left corner.
    fn topleft(&self) -> Pt;

    fn width(&self) -> i32;

    fn height(&self) -> i32;

    fn camera_center(&self) -> Pt {
        let tl = self.topleft();
        Pt::new(tl.x + self.width() / 2, tl.y + self.height() / 2)
    }

    /// The visible rectangle in world coordinates.
    fn camera_rect(&self) -> Rect {
        let tl = self.topleft();
        Rect::new(tl.x, tl.y, tl.x + self.width(), tl.y + self.height())
    }

    fn move_camera(&mut self, delta: Pt);

    /// Monotonic tick counter, advanced once per displayed frame.
    fn frame_count(&self) -> u64;

    /// Level-triggered: true while the key is held.
    fn is_key_down(&self, key: Key) -> bool;

    /// Edge-triggered: true only during the frame the key went down.
    fn was_key_pressed(&self, key: Key) -> bool;

    fn set_pixel(&mut self, p: Pt, color: Color);

    fn clear(&mut self, color: Color);
}

/// Framebuffer-backed canvas with scriptable keyboard state.
#[derive(Debug, Clone)]
pub struct MemoryCanvas {
    width: i32,
    height: i32,
    topleft: Pt,
    frame: u64,
    pixels: Vec<Color>,
    down: HashSet<Key>,
    pressed: HashSet<Key>,
}

impl MemoryCanvas {
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "canvas size must be positive");
        Self {
            width,
            height,
            topleft: Pt::default(),
            frame: 0,
            pixels: vec![colors::BLACK; (width * height) as usize],
            down: HashSet::new(),
            pressed: HashSet::new(),
        }
    }

    /// Key goes down: held from now on and reported pressed this frame.
    pub fn press(&mut self, key: Key) {
        if self.down.insert(key) {
            self.pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.down.remove(&key);
    }

    /// Press-and-release within one frame.
    pub fn tap(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    /// Advance the frame counter and forget this frame's key edges.
    pub fn next_frame(&mut self) {
        self.frame += 1;
        self.pressed.clear();
    }

    pub fn set_topleft(&mut self, topleft: Pt) {
        self.topleft = topleft;
    }

    /// Pixel at viewport-relative `(x, y)`.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
}

impl Canvas for MemoryCanvas {
    fn topleft(&self) -> Pt {
        self.topleft
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn move_camera(&mut self, delta: Pt) {
        self.topleft = self.topleft + delta;
    }

    fn frame_count(&self) -> u64 {
        self.frame
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    fn was_key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn set_pixel(&mut self, p: Pt, color: Color) {
        let x = p.x - self.topleft.x;
        let y = p.y - self.topleft.y;
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        self.pixels[(y * self.width + x) as usize] = color;
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }
}
