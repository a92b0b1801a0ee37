//! Char-grid artwork and the per-entity paint routines that use it.

use scroller_core::canvas::{Canvas, Color, colors};
use scroller_core::draw::{Sprite, paint_hline, paint_rect, paint_scaled_sprite, paint_sprite};
use scroller_core::geometry::{Pt, Rect};

use crate::player::{self, SpriteVariant};

const SKIN: Color = 0xffcc99;
const BROWN: Color = 0x6b3a00;
const OVERALLS: Color = 0x2038ec;
const BRICK: Color = 0xc84c0c;
const MORTAR: Color = 0x000000;
const ALIEN_GREEN: Color = 0x208020;
const STAR: Color = 0xf8f800;

const PLAYER_STANDING: [&str; 16] = [
    "...ccccc....",
    "..ccccccccc.",
    "..kkksskss..",
    ".ksksssskss.",
    ".kskksssksss",
    ".kkssssskkk.",
    "...ssssssss.",
    "..ccoccc....",
    ".cccoccoccc.",
    "ccccooooccc.",
    "ssoyooyoss..",
    "sssoooooss..",
    "ssoooooooo..",
    "..ooo..ooo..",
    ".kkk....kkk.",
    "kkkk....kkkk",
];

const PLAYER_JUMPING: [&str; 16] = [
    "..........ss",
    "...ccccc..ss",
    "..cccccccccs",
    "..kkksskskk.",
    ".ksksssskss.",
    ".kskksssksss",
    ".kkssssskkk.",
    "...sssssss..",
    "..ccoccocc..",
    ".cccoccoccc.",
    "ccccooooccc.",
    "ssoyooyoss..",
    "sssooooooo..",
    "..ooooooooo.",
    ".kkk....kkk.",
    "kkk......kkk",
];

const ALIEN: [&str; 8] = [
    "..g.....g..",
    "...g...g...",
    "..ggggggg..",
    ".gg.ggg.gg.",
    "ggggggggggg",
    "g.ggggggg.g",
    "g.g.....g.g",
    "...gg.gg...",
];

const POWERUP: [&str; 8] = [
    "...yy...",
    "...yy...",
    "yyywwyyy",
    ".yywwyy.",
    "..yyyy..",
    ".yy..yy.",
    "yy....yy",
    "y......y",
];

const MEDKIT: [&str; 11] = [
    "kkkkkkkkkkk",
    "kwwwwwwwwwk",
    "kwwwrrrwwwk",
    "kwwwrrrwwwk",
    "kwrrrrrrrwk",
    "kwrrrrrrrwk",
    "kwrrrrrrrwk",
    "kwwwrrrwwwk",
    "kwwwrrrwwwk",
    "kwwwwwwwwwk",
    "kkkkkkkkkkk",
];

const ENEMY: [&str; 7] = [
    "...kkkkkkk..",
    ".kkkkkkkkkkk",
    "kkwkkkkkkkkk",
    "kkkkkkkkkkrr",
    "kkwkkkkkkkkk",
    ".kkkkkkkkkkk",
    "...kkkkkkk..",
];

const BULLET: [&str; 3] = ["rrrrr.", "rrrrry", "rrrrr."];

pub const HEART: [&str; 6] = [
    ".rr.rr.",
    "rrrrrrr",
    "rrrrrrr",
    ".rrrrr.",
    "..rrr..",
    "...r...",
];

fn cap_color(variant: SpriteVariant) -> Color {
    match variant {
        SpriteVariant::Red => colors::RED,
        SpriteVariant::Green => colors::GREEN,
    }
}

/// Draw a player whose hit box has its bottom-center at `pos`.
pub fn paint_player(
    canvas: &mut dyn Canvas,
    pos: Pt,
    variant: SpriteVariant,
    grounded: bool,
    facing_left: bool,
) {
    let palette = [
        ('c', cap_color(variant)),
        ('s', SKIN),
        ('k', BROWN),
        ('o', OVERALLS),
        ('y', colors::YELLOW),
    ];
    let rows: &[&str] = if grounded { &PLAYER_STANDING } else { &PLAYER_JUMPING };
    let sprite = Sprite {
        rows,
        palette: &palette,
    };
    let origin = Pt::new(pos.x - player::HALF_WIDTH, pos.y - player::HEIGHT);
    paint_sprite(canvas, origin, &sprite, facing_left);
}

/// Brick fill with a dark cap line.
pub fn paint_platform(canvas: &mut dyn Canvas, rect: &Rect) {
    paint_rect(canvas, rect, BRICK);
    paint_hline(canvas, rect.left, rect.right, rect.top, MORTAR);
    let mut y = rect.top + 4;
    while y < rect.bottom {
        paint_hline(canvas, rect.left, rect.right, y, MORTAR);
        y += 4;
    }
}

pub fn paint_alien(canvas: &mut dyn Canvas, pos: Pt) {
    let sprite = Sprite {
        rows: &ALIEN,
        palette: &[('g', ALIEN_GREEN)],
    };
    paint_sprite(canvas, Pt::new(pos.x - 6, pos.y - 5), &sprite, false);
}

pub fn paint_powerup(canvas: &mut dyn Canvas, pos: Pt) {
    let sprite = Sprite {
        rows: &POWERUP,
        palette: &[('y', STAR), ('w', colors::WHITE)],
    };
    paint_scaled_sprite(canvas, Pt::new(pos.x - 8, pos.y - 8), &sprite, 2);
}

pub fn paint_medkit(canvas: &mut dyn Canvas, pos: Pt) {
    let sprite = Sprite {
        rows: &MEDKIT,
        palette: &[('k', colors::BLACK), ('w', colors::WHITE), ('r', colors::RED)],
    };
    paint_sprite(canvas, Pt::new(pos.x - 5, pos.y - 5), &sprite, false);
}

pub fn paint_enemy(canvas: &mut dyn Canvas, pos: Pt) {
    let sprite = Sprite {
        rows: &ENEMY,
        palette: &[('k', colors::BLACK), ('w', colors::WHITE), ('r', colors::RED)],
    };
    paint_sprite(canvas, pos, &sprite, false);
}

pub fn paint_bullet(canvas: &mut dyn Canvas, pos: Pt) {
    let sprite = Sprite {
        rows: &BULLET,
        palette: &[('r', colors::RED), ('y', colors::YELLOW)],
    };
    paint_sprite(canvas, Pt::new(pos.x, pos.y - 1), &sprite, false);
}

/// One life slot; lost slots are drawn grey.
pub fn paint_heart(canvas: &mut dyn Canvas, origin: Pt, active: bool) {
    let color = if active { colors::RED } else { colors::GREY };
    let sprite = Sprite {
        rows: &HEART,
        palette: &[('r', color)],
    };
    paint_sprite(canvas, origin, &sprite, false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use scroller_core::canvas::MemoryCanvas;

    fn rows_are_uniform(rows: &[&str]) -> bool {
        rows.iter().all(|r| r.len() == rows[0].len())
    }

    #[test]
    fn grids_are_rectangular() {
        assert!(rows_are_uniform(&PLAYER_STANDING));
        assert!(rows_are_uniform(&PLAYER_JUMPING));
        assert!(rows_are_uniform(&ALIEN));
        assert!(rows_are_uniform(&POWERUP));
        assert!(rows_are_uniform(&MEDKIT));
        assert!(rows_are_uniform(&ENEMY));
        assert!(rows_are_uniform(&BULLET));
        assert!(rows_are_uniform(&HEART));
    }

    #[test]
    fn player_sprite_fills_hit_box_width() {
        assert_eq!(PLAYER_STANDING[0].len() as i32, 2 * player::HALF_WIDTH);
        assert_eq!(PLAYER_STANDING.len() as i32, player::HEIGHT + 1);
    }

    #[test]
    fn variant_changes_cap_color() {
        let mut red = MemoryCanvas::new(20, 20);
        paint_player(&mut red, Pt::new(10, 17), SpriteVariant::Red, true, false);
        let mut green = MemoryCanvas::new(20, 20);
        paint_player(&mut green, Pt::new(10, 17), SpriteVariant::Green, true, false);
        // First cap pixel of the standing sprite is at column 3 of row 0.
        assert_eq!(red.pixel(7, 2), Some(colors::RED));
        assert_eq!(green.pixel(7, 2), Some(colors::GREEN));
    }

    #[test]
    fn lost_hearts_are_grey() {
        let mut canvas = MemoryCanvas::new(10, 10);
        paint_heart(&mut canvas, Pt::new(0, 0), false);
        assert_eq!(canvas.pixel(1, 0), Some(colors::GREY));
    }
}
