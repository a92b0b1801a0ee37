use serde::{Deserialize, Serialize};

use scroller_core::canvas::{Canvas, Key};
use scroller_core::geometry::{HasBounds, Pt, Rect};
use scroller_core::store::{Handle, SpatialStore};

use crate::config::PhysicsConfig;
use crate::platform::Platform;

/// Half width of the player's hit box.
pub const HALF_WIDTH: i32 = 6;
/// Hit box height; `pos` is the bottom-center of the box.
pub const HEIGHT: i32 = 15;

/// Key bindings for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub jump: Key,
    pub left: Key,
    pub right: Key,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            jump: Key::Space,
            left: Key::Left,
            right: Key::Right,
        }
    }
}

/// Held keys sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub jump: bool,
    pub left: bool,
    pub right: bool,
}

impl PlayerInput {
    pub fn read(canvas: &dyn Canvas, controls: &Controls) -> Self {
        Self {
            jump: canvas.is_key_down(controls.jump),
            left: canvas.is_key_down(controls.left),
            right: canvas.is_key_down(controls.right),
        }
    }

    /// Horizontal direction. Left wins when both are held.
    fn direction(&self) -> i32 {
        if self.left {
            -1
        } else if self.right {
            1
        } else {
            0
        }
    }
}

/// Which character was picked on the start screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteVariant {
    #[default]
    Red,
    Green,
}

/// Last platform the player safely stood on, and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub platform: Handle<Platform>,
    pub x: i32,
}

#[derive(Debug, Clone)]
pub struct Player {
    pos: Pt,
    last_pos: Pt,
    speed: Pt,
    accel_y: i32,
    accel_frames: u32,
    grounded: bool,
    facing_left: bool,
    controls: Controls,
    score: u32,
    variant: SpriteVariant,
    anchor: Option<Anchor>,
    start: Pt,
    physics: PhysicsConfig,
}

impl Player {
    pub fn new(start: Pt, controls: Controls, physics: PhysicsConfig) -> Self {
        Self {
            pos: start,
            last_pos: start,
            speed: Pt::default(),
            accel_y: 0,
            accel_frames: 0,
            grounded: false,
            facing_left: false,
            controls,
            score: 0,
            variant: SpriteVariant::default(),
            anchor: None,
            start,
            physics,
        }
    }

    pub fn pos(&self) -> Pt {
        self.pos
    }

    pub fn last_pos(&self) -> Pt {
        self.last_pos
    }

    pub fn speed(&self) -> Pt {
        self.speed
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_facing_left(&self) -> bool {
        self.facing_left
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_points(&mut self, points: u32) {
        self.score += points;
    }

    pub fn variant(&self) -> SpriteVariant {
        self.variant
    }

    pub fn select_variant(&mut self, variant: SpriteVariant) {
        self.variant = variant;
    }

    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    /// Start the jump impulse. Ignored while airborne.
    pub fn jump(&mut self) {
        if self.grounded {
            self.accel_y = self.physics.jump_accel;
            self.accel_frames = self.physics.jump_frames;
            self.grounded = false;
        }
    }

    /// One frame of input, physics and landing against `platforms`.
    ///
    /// Only the platforms passed in are considered for landing; the caller
    /// hands over the visible subset.
    pub fn tick<'a>(
        &mut self,
        input: PlayerInput,
        platforms: impl IntoIterator<Item = (Handle<Platform>, &'a Platform)>,
    ) {
        self.last_pos = self.pos;
        if input.jump {
            self.jump();
        }

        self.speed.x = input.direction() * self.physics.move_speed;
        if self.speed.x != 0 {
            self.facing_left = self.speed.x < 0;
        }

        self.apply_physics();
        self.grounded = false;

        for (handle, platform) in platforms {
            if platform.has_crossed_floor_downwards(self.last_pos, self.pos) {
                self.land_on(handle, platform);
            }
        }
    }

    fn apply_physics(&mut self) {
        if self.grounded {
            self.speed.y = 0;
            self.accel_y = 0;
        }
        // Gravity always applies; landing snaps back onto the floor.
        self.speed.y += self.physics.gravity;
        if self.accel_frames > 0 {
            self.speed.y += self.accel_y;
            self.accel_frames -= 1;
        }
        self.pos = self.pos + self.speed;
    }

    fn land_on(&mut self, handle: Handle<Platform>, platform: &Platform) {
        self.grounded = true;
        self.speed.y = 0;
        self.pos.y = platform.top();
        self.anchor = Some(Anchor {
            platform: handle,
            x: self.pos.x,
        });
        if platform.is_moving() {
            self.pos.y += platform.frame_displacement();
        }
    }

    /// Put the player back above the anchor platform, or at the start
    /// position if it never landed. Motion is reset.
    pub fn restart_last_pos(&mut self, platforms: &SpatialStore<Platform>) {
        let anchored = self.anchor.and_then(|a| {
            platforms
                .get(a.platform)
                .map(|p| Pt::new(a.x, p.top() - self.physics.respawn_offset))
        });
        self.pos = anchored.unwrap_or(self.start);
        self.last_pos = self.pos;
        self.speed = Pt::default();
        self.accel_y = 0;
        self.accel_frames = 0;
        self.grounded = false;
    }
}

impl HasBounds for Player {
    fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x - HALF_WIDTH,
            self.pos.y - HEIGHT,
            self.pos.x + HALF_WIDTH,
            self.pos.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: i32, y: i32) -> Player {
        Player::new(Pt::new(x, y), Controls::default(), PhysicsConfig::default())
    }

    fn floor(store: &mut SpatialStore<Platform>, left: i32, right: i32, top: i32) -> Handle<Platform> {
        store.insert(Platform::new(left, right, top, top + 11))
    }

    fn tick_on(player: &mut Player, input: PlayerInput, store: &SpatialStore<Platform>) {
        player.tick(input, store.iter());
    }

    #[test]
    fn falls_with_gravity() {
        let store = SpatialStore::new();
        let mut p = player_at(100, 100);
        for _ in 0..3 {
            tick_on(&mut p, PlayerInput::default(), &store);
        }
        // 1 + 2 + 3
        assert_eq!(p.pos(), Pt::new(100, 106));
        assert_eq!(p.speed().y, 3);
        assert!(!p.is_grounded());
    }

    #[test]
    fn lands_and_records_anchor() {
        let mut store = SpatialStore::new();
        let h = floor(&mut store, 50, 150, 110);
        let mut p = player_at(100, 100);
        for _ in 0..10 {
            tick_on(&mut p, PlayerInput::default(), &store);
        }
        assert!(p.is_grounded());
        assert_eq!(p.pos().y, 110);
        assert_eq!(p.speed().y, 0);
        assert_eq!(p.anchor(), Some(Anchor { platform: h, x: 100 }));
    }

    #[test]
    fn stays_on_floor_while_standing() {
        let mut store = SpatialStore::new();
        floor(&mut store, 50, 150, 110);
        let mut p = player_at(100, 110);
        for _ in 0..30 {
            tick_on(&mut p, PlayerInput::default(), &store);
            assert_eq!(p.pos().y, 110);
            assert!(p.is_grounded());
        }
    }

    #[test]
    fn jump_only_from_ground() {
        let mut store = SpatialStore::new();
        floor(&mut store, 0, 300, 200);
        let mut p = player_at(100, 200);
        tick_on(&mut p, PlayerInput::default(), &store);
        assert!(p.is_grounded());

        let jump = PlayerInput {
            jump: true,
            ..Default::default()
        };
        tick_on(&mut p, jump, &store);
        // gravity 1 + impulse -6
        assert_eq!(p.speed().y, -5);
        assert_eq!(p.pos().y, 195);
        assert!(!p.is_grounded());

        // Holding jump in the air does not re-arm the impulse.
        tick_on(&mut p, jump, &store);
        assert_eq!(p.speed().y, -10);
        tick_on(&mut p, jump, &store);
        assert_eq!(p.speed().y, -9);
    }

    #[test]
    fn jump_arc_returns_to_floor() {
        let mut store = SpatialStore::new();
        floor(&mut store, 0, 300, 200);
        let mut p = player_at(100, 200);
        tick_on(&mut p, PlayerInput::default(), &store);
        tick_on(
            &mut p,
            PlayerInput {
                jump: true,
                ..Default::default()
            },
            &store,
        );
        let mut peak = p.pos().y;
        for _ in 0..40 {
            tick_on(&mut p, PlayerInput::default(), &store);
            peak = peak.min(p.pos().y);
        }
        assert!(peak < 200);
        assert!(p.is_grounded());
        assert_eq!(p.pos().y, 200);
    }

    #[test]
    fn left_wins_over_right() {
        let store = SpatialStore::new();
        let mut p = player_at(100, 100);
        tick_on(
            &mut p,
            PlayerInput {
                left: true,
                right: true,
                jump: false,
            },
            &store,
        );
        assert_eq!(p.pos().x, 96);
        assert!(p.is_facing_left());
    }

    #[test]
    fn facing_kept_when_idle() {
        let store = SpatialStore::new();
        let mut p = player_at(100, 100);
        tick_on(
            &mut p,
            PlayerInput {
                left: true,
                ..Default::default()
            },
            &store,
        );
        tick_on(&mut p, PlayerInput::default(), &store);
        assert!(p.is_facing_left());
        tick_on(
            &mut p,
            PlayerInput {
                right: true,
                ..Default::default()
            },
            &store,
        );
        assert!(!p.is_facing_left());
    }

    #[test]
    fn carried_by_moving_platform() {
        let mut store = SpatialStore::new();
        let h = floor(&mut store, 0, 300, 200);
        store.modify(h, |p| {
            p.start_moving();
            p.update();
        });
        // The platform is at 201 and keeps moving down by 1.
        let mut p = player_at(100, 200);
        tick_on(&mut p, PlayerInput::default(), &store);
        assert_eq!(p.pos().y, 202);
        assert!(p.is_grounded());
    }

    #[test]
    fn restart_uses_anchor_or_start() {
        let mut store = SpatialStore::new();
        let h = floor(&mut store, 50, 150, 110);
        let mut p = player_at(100, 100);
        p.restart_last_pos(&store);
        assert_eq!(p.pos(), Pt::new(100, 100));

        for _ in 0..10 {
            tick_on(&mut p, PlayerInput::default(), &store);
        }
        assert!(p.anchor().is_some());
        p.restart_last_pos(&store);
        assert_eq!(p.pos(), Pt::new(100, 80));
        assert_eq!(p.speed(), Pt::default());

        store.remove(h);
        p.restart_last_pos(&store);
        assert_eq!(p.pos(), Pt::new(100, 100));
    }

    #[test]
    fn rect_is_bottom_centered() {
        let p = player_at(100, 100);
        assert_eq!(p.rect(), Rect::new(94, 85, 106, 100));
    }

    #[test]
    fn input_reads_bound_keys() {
        use scroller_core::canvas::MemoryCanvas;
        let mut canvas = MemoryCanvas::new(10, 10);
        canvas.press(Key::Right);
        let input = PlayerInput::read(&canvas, &Controls::default());
        assert_eq!(
            input,
            PlayerInput {
                right: true,
                ..Default::default()
            }
        );
    }
}
