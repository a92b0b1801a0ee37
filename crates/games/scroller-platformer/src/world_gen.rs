use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use scroller_core::geometry::{HasBounds, Pt};

use crate::alien::{Alien, MovementPattern};
use crate::config::WorldConfig;
use crate::medkit::Medkit;
use crate::platform::Platform;
use crate::powerup::PowerUp;

/// Hand-placed ledges around the spawn point: (left, right, top, bottom).
const STARTER_PLATFORMS: [(i32, i32, i32, i32); 3] = [
    (100, 300, 200, 211),
    (0, 200, 250, 261),
    (250, 400, 150, 161),
];

const STARTER_ALIENS: [(Pt, MovementPattern); 2] = [
    (Pt::new(160, 186), MovementPattern::Stationary),
    (Pt::new(100, 236), MovementPattern::Horizontal),
];

/// Procedural platforms start to the right of this x.
const START_AREA_RIGHT: i32 = 400;
/// Platforms before this index carry no aliens or pickups.
const FIRST_SPAWN_INDEX: usize = 2;

/// Every entity a session starts with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub platforms: Vec<Platform>,
    pub aliens: Vec<Alien>,
    pub powerups: Vec<PowerUp>,
    pub medkits: Vec<Medkit>,
}

/// The configured seed, or one taken from the system clock.
pub fn resolve_seed(config: &WorldConfig) -> u64 {
    config.seed.unwrap_or_else(clock_seed)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Generate a deterministic world from a seed.
pub fn generate_world(config: &WorldConfig, seed: u64) -> World {
    let mut rng = StdRng::seed_from_u64(seed);
    let ledge = |left, right, top, bottom| {
        Platform::with_motion(
            left,
            right,
            top,
            bottom,
            config.platform_speed,
            config.platform_range,
        )
    };

    let mut world = World::default();
    world.platforms.extend(
        STARTER_PLATFORMS
            .iter()
            .map(|&(l, r, t, b)| ledge(l, r, t, b)),
    );
    world.aliens.extend(
        STARTER_ALIENS
            .iter()
            .map(|&(pos, pattern)| Alien::new(pos, pattern)),
    );

    let mut last_right = START_AREA_RIGHT;
    for _ in 0..config.platform_count {
        let width = config.platform_min_width + rng.random_range(0..config.platform_width_jitter);
        let gap = config.gap_min + rng.random_range(0..config.gap_jitter);
        let left = last_right + gap;
        let right = left + width;
        let top = config.platform_base_top + rng.random_range(0..config.platform_height_jitter);
        world
            .platforms
            .push(ledge(left, right, top, top + config.platform_thickness));
        last_right = right;
    }

    let World {
        platforms,
        aliens,
        powerups,
        medkits,
    } = &mut world;
    for platform in platforms.iter().skip(FIRST_SPAWN_INDEX) {
        let rect = platform.rect();
        let span = rect.width().max(1);

        let alien_x = rect.left + rng.random_range(0..span);
        let alien_y = rect.top
            - config.alien_height_min
            - rng.random_range(0..config.alien_height_jitter);
        let item_y = rect.top - config.item_height;

        if rng.random_ratio(1, config.powerup_one_in) {
            let x = rect.left + rng.random_range(0..span);
            powerups.push(PowerUp::new(Pt::new(x, item_y)));
        }
        if rng.random_ratio(1, config.medkit_one_in) {
            let x = rect.left + rng.random_range(0..span);
            medkits.push(Medkit::new(Pt::new(x, item_y)));
        }

        let pattern = MovementPattern::ALL[rng.random_range(0..MovementPattern::ALL.len())];
        aliens.push(Alien::new(Pt::new(alien_x, alien_y), pattern));
    }

    tracing::info!(
        seed,
        platforms = world.platforms.len(),
        aliens = world.aliens.len(),
        powerups = world.powerups.len(),
        medkits = world.medkits.len(),
        "World generated"
    );
    world
}
