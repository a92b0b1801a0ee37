pub mod alien;
pub mod camera;
pub mod config;
pub mod enemy;
pub mod medkit;
pub mod platform;
pub mod player;
pub mod powerup;
pub mod scoring;
pub mod sprites;
pub mod world_gen;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use scroller_core::canvas::{Canvas, Key, colors};
use scroller_core::draw::{paint_frame, paint_number};
use scroller_core::game_trait::FrameGame;
use scroller_core::geometry::{HasBounds, Pt, Rect};
use scroller_core::lives::LivesTracker;
use scroller_core::store::{Handle, SpatialStore};

use alien::Alien;
use config::PlatformerConfig;
use enemy::Enemy;
use medkit::Medkit;
use platform::Platform;
use player::{Controls, Player, PlayerInput, SpriteVariant};
use powerup::{ActivePowerUp, PowerUp};
use world_gen::{World, generate_world, resolve_seed};

/// Width of the black frame drawn around the viewport.
const BORDER: i32 = 4;

/// Where the session is. `GameOver` and `Winner` only leave via Escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Session {
    StartScreen,
    Playing,
    Paused,
    GameOver,
    Winner,
}

impl Session {
    pub fn is_terminal(self) -> bool {
        matches!(self, Session::GameOver | Session::Winner)
    }
}

/// Something the host may want to react to, reported by `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    AlienDefeated { points: u32 },
    PowerUpCollected,
    MedkitCollected,
    LifeLost { remaining: u32 },
    Respawned,
    GameOver,
    Winner,
    Exited,
}

/// Handles that overlapped the camera at the start of the frame.
#[derive(Debug, Clone, Default)]
struct Visible {
    platforms: BTreeSet<Handle<Platform>>,
    aliens: BTreeSet<Handle<Alien>>,
    powerups: BTreeSet<Handle<PowerUp>>,
    medkits: BTreeSet<Handle<Medkit>>,
}

/// The side-scrolling platformer.
pub struct PlatformerGame {
    config: PlatformerConfig,
    platforms: SpatialStore<Platform>,
    aliens: SpatialStore<Alien>,
    powerups: SpatialStore<PowerUp>,
    medkits: SpatialStore<Medkit>,
    visible: Visible,
    player: Player,
    enemy: Enemy,
    lives: LivesTracker,
    /// Running double-score window, if any.
    double_score: Option<ActivePowerUp>,
    session: Session,
    finished: bool,
}

impl PlatformerGame {
    /// Generate a world from `config` for a `width`×`height` viewport.
    pub fn new(config: PlatformerConfig, width: i32, height: i32) -> Self {
        let seed = resolve_seed(&config.world);
        let world = generate_world(&config.world, seed);
        Self::with_world(config, world, width, height)
    }

    /// Read the config file and generate a world.
    pub fn load(width: i32, height: i32) -> Self {
        Self::new(PlatformerConfig::load(), width, height)
    }

    /// Start a session on a prepared world.
    pub fn with_world(config: PlatformerConfig, world: World, width: i32, height: i32) -> Self {
        let cell_size = config.rules.grid_cell_size;
        let start = Pt::new(width / 2, config.physics.start_y);
        Self {
            platforms: indexed(world.platforms, cell_size),
            aliens: indexed(world.aliens, cell_size),
            powerups: indexed(world.powerups, cell_size),
            medkits: indexed(world.medkits, cell_size),
            visible: Visible::default(),
            player: Player::new(start, Controls::default(), config.physics.clone()),
            enemy: Enemy::new(width, height, config.enemy.clone()),
            lives: LivesTracker::new(config.rules.lives),
            double_score: None,
            session: Session::StartScreen,
            finished: false,
            config,
        }
    }

    pub fn config(&self) -> &PlatformerConfig {
        &self.config
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn lives(&self) -> &LivesTracker {
        &self.lives
    }

    pub fn platforms(&self) -> &SpatialStore<Platform> {
        &self.platforms
    }

    pub fn aliens(&self) -> &SpatialStore<Alien> {
        &self.aliens
    }

    pub fn powerups(&self) -> &SpatialStore<PowerUp> {
        &self.powerups
    }

    pub fn medkits(&self) -> &SpatialStore<Medkit> {
        &self.medkits
    }

    pub fn double_score(&self) -> Option<&ActivePowerUp> {
        self.double_score.as_ref()
    }

    fn set_session(&mut self, next: Session) {
        tracing::info!(from = ?self.session, to = ?next, "Session transition");
        self.session = next;
    }

    fn process_keys(&mut self, canvas: &dyn Canvas, events: &mut Vec<GameEvent>) {
        if canvas.is_key_down(Key::Escape) {
            tracing::info!(session = ?self.session, score = self.player.score(), "Session exited");
            self.finished = true;
            events.push(GameEvent::Exited);
            return;
        }

        let toggle_pause = canvas.was_key_pressed(Key::letter('p'));
        match self.session {
            Session::StartScreen => {
                let picked = if canvas.was_key_pressed(Key::letter('m')) {
                    Some(SpriteVariant::Red)
                } else if canvas.was_key_pressed(Key::letter('l')) {
                    Some(SpriteVariant::Green)
                } else {
                    None
                };
                if let Some(variant) = picked {
                    self.player.select_variant(variant);
                    self.set_session(Session::Playing);
                }
            },
            Session::Playing if toggle_pause => self.set_session(Session::Paused),
            Session::Paused if toggle_pause => self.set_session(Session::Playing),
            _ => {},
        }
    }

    /// One simulation step over the entities the camera can see.
    fn update_objects(&mut self, canvas: &dyn Canvas, events: &mut Vec<GameEvent>) {
        let view = canvas.camera_rect();
        self.visible = Visible {
            platforms: self.platforms.query(&view),
            aliens: self.aliens.query(&view),
            powerups: self.powerups.query(&view),
            medkits: self.medkits.query(&view),
        };
        tracing::trace!(
            platforms = self.visible.platforms.len(),
            aliens = self.visible.aliens.len(),
            powerups = self.visible.powerups.len(),
            medkits = self.visible.medkits.len(),
            "Visible entities"
        );

        self.update_platforms();
        self.update_powerups(events);
        self.update_medkits(events);
        self.update_aliens(canvas.frame_count(), events);
        if self.session != Session::Playing {
            return;
        }

        let input = PlayerInput::read(canvas, self.player.controls());
        let platforms = &self.platforms;
        self.player.tick(
            input,
            self.visible
                .platforms
                .iter()
                .filter_map(|&h| platforms.get(h).map(|p| (h, p))),
        );

        let shot = self.update_enemy(canvas.topleft(), canvas.width(), events);
        if !shot && self.session == Session::Playing {
            self.check_fall(&view, events);
        }
    }

    fn update_platforms(&mut self) {
        let (prev, curr) = (self.player.last_pos(), self.player.pos());
        let grounded = self.player.is_grounded();
        for &h in &self.visible.platforms {
            self.platforms.modify(h, |p| {
                p.update();
                if grounded && p.has_crossed_floor_downwards(prev, curr) {
                    p.start_moving();
                }
            });
        }
    }

    fn update_powerups(&mut self, events: &mut Vec<GameEvent>) {
        let frames = self.config.rules.double_score_frames;
        for h in self.powerups.query(&self.player.rect()) {
            if self.powerups.get(h).is_none_or(PowerUp::is_collected) {
                continue;
            }
            let Some(mut pickup) = self.powerups.remove(h) else {
                continue;
            };
            self.visible.powerups.remove(&h);
            self.double_score = Some(pickup.collect(frames));
            tracing::debug!(kind = ?pickup.kind(), frames, "Power-up collected");
            events.push(GameEvent::PowerUpCollected);
        }

        if let Some(active) = self.double_score.as_mut() {
            active.tick();
            if active.is_expired() {
                self.double_score = None;
            }
        }
    }

    fn update_medkits(&mut self, events: &mut Vec<GameEvent>) {
        if self.lives.is_full() {
            return;
        }
        for h in self.medkits.query(&self.player.rect()) {
            let Some(mut kit) = self.medkits.remove(h) else {
                continue;
            };
            kit.collect();
            self.visible.medkits.remove(&h);
            self.lives.restore();
            tracing::debug!(lives = self.lives.current(), "Medkit collected");
            events.push(GameEvent::MedkitCollected);
        }
    }

    fn update_aliens(&mut self, frame: u64, events: &mut Vec<GameEvent>) {
        let player_rect = self.player.rect();
        let handles: Vec<_> = self.visible.aliens.iter().copied().collect();
        for h in handles {
            let hit = self
                .aliens
                .modify(h, |a| {
                    a.update(frame);
                    a.rect().intersects(&player_rect)
                })
                .unwrap_or(false);
            if !hit {
                continue;
            }

            self.aliens.remove(h);
            self.visible.aliens.remove(&h);
            let points = scoring::alien_points(self.double_score.is_some());
            self.player.add_points(points);
            tracing::debug!(points, score = self.player.score(), "Alien defeated");
            events.push(GameEvent::AlienDefeated { points });

            if scoring::is_winner(self.player.score(), self.config.rules.winner_points) {
                self.set_session(Session::Winner);
                events.push(GameEvent::Winner);
                return;
            }
        }
    }

    /// Returns true if a bullet hit the player this frame.
    fn update_enemy(
        &mut self,
        view_topleft: Pt,
        view_width: i32,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        self.enemy
            .update(view_topleft, view_width, self.player.pos().y);
        if self.double_score.is_some() {
            self.enemy.clear_bullets();
            return false;
        }
        let hit = self.enemy.any_bullet_hits(&self.player.rect());
        if hit {
            self.enemy.clear_bullets();
            self.lose_life(events);
        }
        hit
    }

    /// Fell below the bottom edge of the view.
    fn check_fall(&mut self, view: &Rect, events: &mut Vec<GameEvent>) {
        if self.player.pos().y <= view.bottom {
            return;
        }
        self.lose_life(events);
        if self.session == Session::Playing {
            self.player.restart_last_pos(&self.platforms);
            self.enemy.clear_bullets();
            tracing::debug!(pos = ?self.player.pos(), "Respawned");
            events.push(GameEvent::Respawned);
        }
    }

    fn lose_life(&mut self, events: &mut Vec<GameEvent>) {
        self.lives.decrease();
        let remaining = self.lives.current();
        tracing::debug!(remaining, "Life lost");
        events.push(GameEvent::LifeLost { remaining });
        if !self.lives.has_lives() {
            self.set_session(Session::GameOver);
            events.push(GameEvent::GameOver);
        }
    }

    /// Start and winner screens: a floor strip with both characters on it.
    fn paint_title(&self, canvas: &mut dyn Canvas, floor_offset: i32) {
        canvas.clear(colors::SKY_BLUE);
        let tl = canvas.topleft();
        let center = canvas.camera_center();
        let floor_y = center.y + floor_offset;
        let floor = Rect::new(tl.x, floor_y, tl.x + canvas.width() - 1, floor_y + 20);
        sprites::paint_platform(canvas, &floor);
        for (dx, variant) in [(-12, SpriteVariant::Red), (12, SpriteVariant::Green)] {
            let pos = Pt::new(center.x + dx, floor_y);
            sprites::paint_player(canvas, pos, variant, true, dx > 0);
        }
    }

    fn paint_world(&self, canvas: &mut dyn Canvas) {
        let background = if self.double_score.is_some() {
            colors::SALMON
        } else {
            colors::SKY_BLUE
        };
        canvas.clear(background);

        for p in visible_in(&self.platforms, &self.visible.platforms) {
            sprites::paint_platform(canvas, &p.rect());
        }
        for pu in visible_in(&self.powerups, &self.visible.powerups) {
            sprites::paint_powerup(canvas, pu.pos());
        }
        for kit in visible_in(&self.medkits, &self.visible.medkits) {
            sprites::paint_medkit(canvas, kit.pos());
        }
        for a in visible_in(&self.aliens, &self.visible.aliens) {
            sprites::paint_alien(canvas, a.pos());
        }

        sprites::paint_player(
            canvas,
            self.player.pos(),
            self.player.variant(),
            self.player.is_grounded(),
            self.player.is_facing_left(),
        );
        sprites::paint_enemy(canvas, self.enemy.pos());
        for &b in self.enemy.bullets() {
            sprites::paint_bullet(canvas, b);
        }

        self.paint_hud(canvas);
    }

    fn paint_hud(&self, canvas: &mut dyn Canvas) {
        let tl = canvas.topleft();
        let right = tl.x + canvas.width() - 60;

        let mut x = tl.x + 10;
        for active in self.lives.slots() {
            sprites::paint_heart(canvas, Pt::new(x, tl.y + 10), active);
            x += sprites::HEART[0].len() as i32 + 3;
        }

        paint_number(
            canvas,
            Pt::new(right, tl.y + 10),
            self.player.score(),
            colors::WHITE,
            2,
        );
        if let Some(active) = &self.double_score {
            let seconds = active.seconds_left(self.config.rules.frames_per_second);
            paint_number(canvas, Pt::new(right, tl.y + 30), seconds, colors::YELLOW, 2);
        }
    }
}

fn indexed<T: HasBounds>(items: Vec<T>, cell_size: i32) -> SpatialStore<T> {
    let mut store = SpatialStore::with_cell_size(cell_size);
    for item in items {
        store.insert(item);
    }
    store
}

fn visible_in<'a, T: HasBounds>(
    store: &'a SpatialStore<T>,
    handles: &'a BTreeSet<Handle<T>>,
) -> impl Iterator<Item = &'a T> + 'a {
    handles.iter().filter_map(move |&h| store.get(h))
}

impl FrameGame for PlatformerGame {
    type Event = GameEvent;

    fn update(&mut self, canvas: &mut dyn Canvas) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.finished {
            return events;
        }
        self.process_keys(canvas, &mut events);
        if self.session == Session::Playing && !self.finished {
            self.update_objects(canvas, &mut events);
            camera::follow(canvas, self.player.pos());
        }
        events
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        match self.session {
            Session::StartScreen => self.paint_title(canvas, 60),
            Session::Winner => self.paint_title(canvas, 80),
            Session::Paused => canvas.clear(colors::WHITE),
            Session::GameOver => canvas.clear(colors::RED),
            Session::Playing => self.paint_world(canvas),
        }
        let tl = canvas.topleft();
        let border = Rect::new(
            tl.x,
            tl.y,
            tl.x + canvas.width() - 1,
            tl.y + canvas.height() - 1,
        );
        paint_frame(canvas, &border, colors::BLACK, BORDER);
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn is_paused(&self) -> bool {
        self.session == Session::Paused
    }
}
