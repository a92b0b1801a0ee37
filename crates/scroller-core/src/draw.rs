//! Pixel drawing helpers on top of [`Canvas::set_pixel`].

use crate::canvas::{Canvas, Color};
use crate::geometry::{Pt, Rect};

/// Char-grid image. Each char is looked up in `palette`; chars without an
/// entry (conventionally `.`) are transparent.
#[derive(Debug, Clone, Copy)]
pub struct Sprite<'a> {
    pub rows: &'a [&'a str],
    pub palette: &'a [(char, Color)],
}

impl Sprite<'_> {
    pub fn width(&self) -> i32 {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0) as i32
    }

    pub fn height(&self) -> i32 {
        self.rows.len() as i32
    }

    fn color_of(&self, c: char) -> Option<Color> {
        self.palette.iter().find(|(k, _)| *k == c).map(|(_, col)| *col)
    }
}

pub fn paint_hline(canvas: &mut dyn Canvas, x0: i32, x1: i32, y: i32, color: Color) {
    for x in x0..=x1 {
        canvas.set_pixel(Pt::new(x, y), color);
    }
}

pub fn paint_vline(canvas: &mut dyn Canvas, x: i32, y0: i32, y1: i32, color: Color) {
    for y in y0..=y1 {
        canvas.set_pixel(Pt::new(x, y), color);
    }
}

/// Filled rectangle, bounds inclusive.
pub fn paint_rect(canvas: &mut dyn Canvas, rect: &Rect, color: Color) {
    for y in rect.top..=rect.bottom {
        paint_hline(canvas, rect.left, rect.right, y, color);
    }
}

/// Rectangle outline `thickness` pixels wide, drawn inward.
pub fn paint_frame(canvas: &mut dyn Canvas, rect: &Rect, color: Color, thickness: i32) {
    for i in 0..thickness {
        paint_hline(canvas, rect.left, rect.right, rect.top + i, color);
        paint_hline(canvas, rect.left, rect.right, rect.bottom - i, color);
        paint_vline(canvas, rect.left + i, rect.top, rect.bottom, color);
        paint_vline(canvas, rect.right - i, rect.top, rect.bottom, color);
    }
}

/// Draw `sprite` with its top-left corner at `origin`, optionally flipped
/// horizontally.
pub fn paint_sprite(canvas: &mut dyn Canvas, origin: Pt, sprite: &Sprite<'_>, mirror: bool) {
    let width = sprite.width();
    for (dy, row) in sprite.rows.iter().enumerate() {
        for (dx, c) in row.chars().enumerate() {
            let Some(color) = sprite.color_of(c) else {
                continue;
            };
            let dx = if mirror { width - 1 - dx as i32 } else { dx as i32 };
            canvas.set_pixel(Pt::new(origin.x + dx, origin.y + dy as i32), color);
        }
    }
}

/// Like [`paint_sprite`], each source pixel becoming a `scale`×`scale` block.
pub fn paint_scaled_sprite(canvas: &mut dyn Canvas, origin: Pt, sprite: &Sprite<'_>, scale: i32) {
    for (dy, row) in sprite.rows.iter().enumerate() {
        for (dx, c) in row.chars().enumerate() {
            let Some(color) = sprite.color_of(c) else {
                continue;
            };
            let x = origin.x + dx as i32 * scale;
            let y = origin.y + dy as i32 * scale;
            paint_rect(canvas, &Rect::new(x, y, x + scale - 1, y + scale - 1), color);
        }
    }
}

const DIGIT_W: i32 = 3;

const DIGITS: [[&str; 5]; 10] = [
    ["###", "#.#", "#.#", "#.#", "###"],
    [".#.", "##.", ".#.", ".#.", "###"],
    ["###", "..#", "###", "#..", "###"],
    ["###", "..#", "###", "..#", "###"],
    ["#.#", "#.#", "###", "..#", "..#"],
    ["###", "#..", "###", "..#", "###"],
    ["###", "#..", "###", "#.#", "###"],
    ["###", "..#", "..#", ".#.", ".#."],
    ["###", "#.#", "###", "#.#", "###"],
    ["###", "#.#", "###", "..#", "###"],
];

/// Draw `n` in decimal with a 3x5 font. Returns the drawn width in pixels.
pub fn paint_number(canvas: &mut dyn Canvas, origin: Pt, n: u32, color: Color, scale: i32) -> i32 {
    let palette = [('#', color)];
    let text = n.to_string();
    let advance = (DIGIT_W + 1) * scale;
    for (i, ch) in text.bytes().enumerate() {
        let glyph = Sprite {
            rows: &DIGITS[(ch - b'0') as usize],
            palette: &palette,
        };
        let at = Pt::new(origin.x + i as i32 * advance, origin.y);
        paint_scaled_sprite(canvas, at, &glyph, scale);
    }
    text.len() as i32 * advance - scale
}
