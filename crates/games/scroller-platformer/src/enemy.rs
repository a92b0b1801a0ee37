use scroller_core::geometry::{HasBounds, Pt, Rect};

use crate::config::EnemyConfig;

/// Shooter that hugs the right side of the view at the player's height.
#[derive(Debug, Clone)]
pub struct Enemy {
    pos: Pt,
    cooldown: i32,
    bullets: Vec<Pt>,
    config: EnemyConfig,
}

impl Enemy {
    pub fn new(viewport_width: i32, viewport_height: i32, config: EnemyConfig) -> Self {
        Self {
            pos: Pt::new(viewport_width - config.width, viewport_height / 2),
            cooldown: config.initial_cooldown,
            bullets: Vec::new(),
            config,
        }
    }

    pub fn pos(&self) -> Pt {
        self.pos
    }

    pub fn cooldown(&self) -> i32 {
        self.cooldown
    }

    pub fn bullets(&self) -> &[Pt] {
        &self.bullets
    }

    pub fn clear_bullets(&mut self) {
        self.bullets.clear();
    }

    /// Reposition, fire when the cooldown runs out, advance bullets.
    /// Returns true if a bullet was fired this frame.
    pub fn update(&mut self, view_topleft: Pt, view_width: i32, player_y: i32) -> bool {
        self.pos.x = view_topleft.x + view_width - self.config.edge_offset;
        self.pos.y = player_y + self.config.vertical_offset;
        // World x against a screen-space half width: with the view scrolled
        // left of the origin the shooter parks at the first screen's far edge.
        if self.pos.x < view_width / 2 {
            self.pos.x = view_width - self.config.width;
        }

        self.cooldown -= 1;
        let fired = self.cooldown <= 0;
        if fired {
            self.bullets
                .push(Pt::new(self.pos.x, self.pos.y + self.config.height / 2));
            self.cooldown = self.config.fire_interval;
        }

        let speed = self.config.bullet_speed;
        for bullet in &mut self.bullets {
            bullet.x -= speed;
        }
        self.bullets.retain(|b| b.x >= 0);
        fired
    }

    /// Hit box of a bullet, independent of how it is drawn.
    pub fn bullet_rect(&self, bullet: Pt) -> Rect {
        Rect::centered(
            bullet,
            self.config.bullet_half_width,
            self.config.bullet_half_height,
        )
    }

    /// True if any live bullet overlaps `target`.
    pub fn any_bullet_hits(&self, target: &Rect) -> bool {
        self.bullets
            .iter()
            .any(|b| self.bullet_rect(*b).intersects(target))
    }
}

impl HasBounds for Enemy {
    fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x,
            self.pos.y,
            self.pos.x + self.config.width,
            self.pos.y + self.config.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: i32 = 480;
    const H: i32 = 320;

    fn enemy() -> Enemy {
        Enemy::new(W, H, EnemyConfig::default())
    }

    #[test]
    fn starts_at_right_edge() {
        let e = enemy();
        assert_eq!(e.pos(), Pt::new(472, 160));
        assert_eq!(e.cooldown(), 30);
        assert!(e.bullets().is_empty());
    }

    #[test]
    fn tracks_view_and_player_height() {
        let mut e = enemy();
        e.update(Pt::new(1000, -40), W, 200);
        assert_eq!(e.pos(), Pt::new(1455, 185));
    }

    #[test]
    fn snaps_to_far_edge_when_view_scrolled_left() {
        let mut e = enemy();
        e.update(Pt::new(-300, 0), W, 100);
        assert_eq!(e.pos().x, 472);
    }

    #[test]
    fn fires_once_per_cooldown_period() {
        let mut e = enemy();
        let fired: Vec<usize> = (1..=30 + 60 * 3)
            .filter(|_| e.update(Pt::new(10_000, 0), W, 100))
            .collect();
        assert_eq!(fired, vec![30, 90, 150, 210]);
    }

    #[test]
    fn bullet_moves_fixed_speed_until_offscreen() {
        let mut e = enemy();
        let top_left = Pt::new(0, 0);
        while !e.update(top_left, W, 100) {}
        // Fired from x = 455 and already moved once.
        assert_eq!(e.bullets(), &[Pt::new(450, 87)]);

        let mut last_x = 450;
        let mut ticks = 0;
        while let Some(b) = e.bullets().first().copied() {
            if ticks > 0 {
                assert_eq!(b.x, last_x - 5);
            }
            last_x = b.x;
            assert!(b.x >= 0);
            // Keep the cooldown from firing a second bullet.
            e.cooldown = 1_000;
            e.update(top_left, W, 100);
            ticks += 1;
        }
        assert_eq!(last_x, 0);
        assert_eq!(ticks, 91);
    }

    #[test]
    fn bullet_hit_box_is_small() {
        let e = enemy();
        let r = e.bullet_rect(Pt::new(50, 50));
        assert_eq!(r, Rect::new(49, 48, 51, 52));
    }

    #[test]
    fn clear_bullets_empties_list() {
        let mut e = enemy();
        for _ in 0..100 {
            e.update(Pt::new(0, 0), W, 100);
        }
        assert!(!e.bullets().is_empty());
        e.clear_bullets();
        assert!(e.bullets().is_empty());
        assert!(!e.any_bullet_hits(&Rect::new(0, 0, 1000, 1000)));
    }
}
