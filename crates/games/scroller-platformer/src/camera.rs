//! Dead-zone camera: the view only scrolls once the target leaves the
//! central half of the screen, and then by exactly the overshoot.

use scroller_core::canvas::Canvas;
use scroller_core::geometry::{Pt, Rect};

/// Central region spanning a quarter of the viewport on each side of `center`.
pub fn dead_zone(center: Pt, width: i32, height: i32) -> Rect {
    Rect::centered(center, width / 4, height / 4)
}

/// Camera displacement that brings `target` back onto the dead-zone edge.
pub fn shift_for(center: Pt, width: i32, height: i32, target: Pt) -> Pt {
    let zone = dead_zone(center, width, height);
    let excess = |v: i32, lo: i32, hi: i32| {
        if v > hi {
            v - hi
        } else if v < lo {
            v - lo
        } else {
            0
        }
    };
    Pt::new(
        excess(target.x, zone.left, zone.right),
        excess(target.y, zone.top, zone.bottom),
    )
}

/// Move `canvas`'s camera so `target` is inside the dead zone.
pub fn follow(canvas: &mut dyn Canvas, target: Pt) {
    let delta = shift_for(canvas.camera_center(), canvas.width(), canvas.height(), target);
    if delta != Pt::default() {
        canvas.move_camera(delta);
    }
}
