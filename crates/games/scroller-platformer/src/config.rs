use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "SCROLLER_PLATFORMER_CONFIG";
/// Config file read when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/platformer.toml";

/// Error produced while reading a [`PlatformerConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(m) => write!(f, "config parse error: {m}"),
            Self::Invalid(m) => write!(f, "invalid config: {m}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Player movement and jump parameters. Units are pixels and frames.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to vertical speed every frame.
    pub gravity: i32,
    /// Extra vertical acceleration while the jump impulse lasts.
    pub jump_accel: i32,
    /// Frames the jump impulse lasts.
    pub jump_frames: u32,
    pub move_speed: i32,
    /// Respawn height above the anchor platform's top.
    pub respawn_offset: i32,
    /// Player start height; x is the viewport's horizontal center.
    pub start_y: i32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1,
            jump_accel: -6,
            jump_frames: 2,
            move_speed: 4,
            respawn_offset: 30,
            start_y: 150,
        }
    }
}

/// Procedural world layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Fixed seed. `None` seeds from the clock.
    pub seed: Option<u64>,
    pub platform_count: u32,
    pub platform_min_width: i32,
    pub platform_width_jitter: i32,
    pub gap_min: i32,
    pub gap_jitter: i32,
    pub platform_base_top: i32,
    pub platform_height_jitter: i32,
    pub platform_thickness: i32,
    /// Each procedural platform gets a power-up with probability 1/n.
    pub powerup_one_in: u32,
    /// Each procedural platform gets a medkit with probability 1/n.
    pub medkit_one_in: u32,
    pub alien_height_min: i32,
    pub alien_height_jitter: i32,
    pub item_height: i32,
    pub platform_speed: i32,
    pub platform_range: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: None,
            platform_count: 35_000,
            platform_min_width: 35,
            platform_width_jitter: 150,
            gap_min: 35,
            gap_jitter: 30,
            platform_base_top: 150,
            platform_height_jitter: 55,
            platform_thickness: 11,
            powerup_one_in: 7,
            medkit_one_in: 7,
            alien_height_min: 25,
            alien_height_jitter: 15,
            item_height: 20,
            platform_speed: 1,
            platform_range: 50,
        }
    }
}

/// The pursuing shooter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnemyConfig {
    /// Distance kept from the viewport's right edge.
    pub edge_offset: i32,
    pub width: i32,
    pub height: i32,
    /// Added to the player's y.
    pub vertical_offset: i32,
    pub initial_cooldown: i32,
    pub fire_interval: i32,
    pub bullet_speed: i32,
    pub bullet_half_width: i32,
    pub bullet_half_height: i32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            edge_offset: 25,
            width: 8,
            height: 5,
            vertical_offset: -15,
            initial_cooldown: 30,
            fire_interval: 60,
            bullet_speed: 5,
            bullet_half_width: 1,
            bullet_half_height: 2,
        }
    }
}

/// Session rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    pub lives: u32,
    pub winner_points: u32,
    pub double_score_frames: u32,
    pub frames_per_second: u32,
    pub grid_cell_size: i32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            lives: 3,
            winner_points: 25,
            double_score_frames: 600,
            frames_per_second: 60,
            grid_cell_size: 100,
        }
    }
}

/// Top-level platformer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PlatformerConfig {
    pub physics: PhysicsConfig,
    pub world: WorldConfig,
    pub enemy: EnemyConfig,
    pub rules: RulesConfig,
}

impl PlatformerConfig {
    /// Load from the file named by [`CONFIG_ENV`], else [`DEFAULT_CONFIG_PATH`].
    pub fn load() -> Self {
        Self::load_from(&config_path(std::env::var(CONFIG_ENV).ok()))
    }

    /// A missing file yields defaults; a broken one is logged and ignored.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to load {}: {e}, using defaults", path.display());
                    Self::default()
                },
            },
            Err(_) => Self::default(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.world;
        let checks = [
            (self.rules.grid_cell_size > 0, "rules.grid_cell_size must be > 0"),
            (self.rules.frames_per_second > 0, "rules.frames_per_second must be > 0"),
            (w.platform_min_width >= 0, "world.platform_min_width must be >= 0"),
            (w.platform_width_jitter > 0, "world.platform_width_jitter must be > 0"),
            (w.gap_jitter > 0, "world.gap_jitter must be > 0"),
            (w.platform_height_jitter > 0, "world.platform_height_jitter must be > 0"),
            (w.alien_height_jitter > 0, "world.alien_height_jitter must be > 0"),
            (w.platform_thickness >= 0, "world.platform_thickness must be >= 0"),
            (w.powerup_one_in > 0, "world.powerup_one_in must be > 0"),
            (w.medkit_one_in > 0, "world.medkit_one_in must be > 0"),
            (w.platform_range >= 0, "world.platform_range must be >= 0"),
            (self.enemy.fire_interval > 0, "enemy.fire_interval must be > 0"),
            (self.physics.move_speed >= 0, "physics.move_speed must be >= 0"),
        ];
        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, msg)) => Err(ConfigError::Invalid((*msg).to_string())),
            None => Ok(()),
        }
    }
}

fn config_path(from_env: Option<String>) -> PathBuf {
    PathBuf::from(from_env.unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string()))
}
