//! Gameplay constants and runtime settings.
//!
//! Everything tunable lives here as a named constant.  `Settings` carries the
//! handful of values a player may override from the command line or the
//! environment.

use std::ops::Range;
use std::path::PathBuf;

use clap::Parser;

use crate::entities::{Category, Vec2};
use crate::error::GameError;

// ── Screen & pacing ───────────────────────────────────────────────────────────

/// Logical play-field size in world units (the renderer scales it to the terminal).
pub const SCREEN: Vec2 = Vec2::new(800.0, 600.0);

pub const DEFAULT_FPS: u32 = 30;
pub const MAX_FPS: u32 = 120;

// ── Player ────────────────────────────────────────────────────────────────────

pub const DEFAULT_LIVES: u32 = 4;
pub const DEFAULT_AMMO: u32 = 100;

/// Health a fresh ship (or a ship that just lost a life) starts with.
pub const FULL_HEALTH: u32 = 100;

/// Pixels per frame on each axis while a direction key is held.
pub const SHIP_SPEED: f32 = 10.0;

/// Vertical launch offset of a rocket; the sign flips after every shot.
pub const ROCKET_OFFSET: f32 = 30.0;

/// Horizontal launch offset of a rocket, ahead of the ship's nose.
pub const ROCKET_LEAD: f32 = 60.0;

pub const ROCKET_SPEED: f32 = 15.0;

/// Minimum wall-clock gap between two applications of contact damage.
pub const CONTACT_DEBOUNCE_MS: u64 = 500;

/// Damage applied by an enemy projectile.  Larger than any health a ship can have.
pub const PROJECTILE_DAMAGE: u32 = 100;

/// Where the ship starts in a playable level.
pub const SHIP_START: Vec2 = Vec2::new(200.0, 200.0);

// ── Intro fly-by ──────────────────────────────────────────────────────────────

pub const FLYBY_START: Vec2 = Vec2::new(-200.0, 150.0);
pub const FLYBY_SPEED: f32 = 4.0;

/// How far past either screen edge the fly-by ship travels before wrapping.
pub const FLYBY_MARGIN: f32 = 200.0;

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Contact damage dealt to the ship by each enemy category.
pub fn contact_damage(category: Category) -> u32 {
    match category {
        Category::Enemy1 => 10,
        Category::Enemy2 => 20,
        Category::Enemy3 => 30,
        Category::Enemy4 => 50,
        Category::Enemy5 => 10,
        Category::Enemy6 => 50,
        Category::Enemy7 => 20,
        Category::Enemy8 => 20,
        _ => 0,
    }
}

pub const PATROL_SPEED: f32 = 4.0;

/// Horizontal patrol bounds for the ground crawlers.
pub const PATROL_MIN_X: f32 = 100.0;
pub const PATROL_MAX_X: f32 = 500.0;

/// Fire countdown ranges (frames), reseeded after every shot.
pub const SLOW_FIRE: Range<i32> = 10..200;
pub const RAPID_FIRE: Range<i32> = 10..50;

/// An enemy shows its firing pose while its countdown is below this.
pub const FIRING_POSE_TICKS: i32 = 5;

pub const PROJECTILE_SPEED: f32 = 5.0;

// ── Scenery & HUD ─────────────────────────────────────────────────────────────

pub const STAR_COUNT: usize = 50;
pub const STAR_SIZES: Range<u32> = 10..100;

/// Frames the level banner stays on screen.
pub const BANNER_FRAMES: u32 = 50;

// ── Runtime settings ──────────────────────────────────────────────────────────

/// Player-facing options.  Every flag has an environment fallback.
#[derive(Debug, Clone, Parser)]
#[command(name = "aliens", version, about = "Aliens vs Humans - a side-scrolling terminal shooter")]
pub struct Settings {
    /// Target frames per second.
    #[arg(long, env = "ALIENS_FPS", default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Lives granted when a new game starts.
    #[arg(long, env = "ALIENS_LIVES", default_value_t = DEFAULT_LIVES)]
    pub lives: u32,

    /// Rockets granted when a new game starts.
    #[arg(long, env = "ALIENS_AMMO", default_value_t = DEFAULT_AMMO)]
    pub ammo: u32,

    /// Seed for enemy fire timers and the star field.  Random when omitted.
    #[arg(long, env = "ALIENS_SEED")]
    pub seed: Option<u64>,

    /// Ring the terminal bell on explosions.
    #[arg(long, env = "ALIENS_BELL")]
    pub bell: bool,

    /// Where trace output goes while the terminal is in raw mode.
    #[arg(long, env = "ALIENS_LOG_FILE", default_value = "aliens.log")]
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            fps: DEFAULT_FPS,
            lives: DEFAULT_LIVES,
            ammo: DEFAULT_AMMO,
            seed: None,
            bell: false,
            log_file: PathBuf::from("aliens.log"),
        }
    }
}

impl Settings {
    /// Reject values the game loop cannot run with.
    pub fn validate(self) -> Result<Self, GameError> {
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(GameError::InvalidSetting {
                name: "fps",
                value: self.fps.to_string(),
            });
        }
        if self.lives == 0 {
            return Err(GameError::InvalidSetting {
                name: "lives",
                value: self.lives.to_string(),
            });
        }
        Ok(self)
    }

    /// Milliseconds per frame at the configured rate.
    pub fn frame_ms(&self) -> u64 {
        1000 / u64::from(self.fps.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let s = Settings::default().validate().unwrap();
        assert_eq!(s.lives, 4);
        assert_eq!(s.ammo, 100);
        assert_eq!(s.frame_ms(), 33);
    }

    #[test]
    fn zero_fps_rejected() {
        let s = Settings { fps: 0, ..Settings::default() };
        assert!(matches!(
            s.validate(),
            Err(GameError::InvalidSetting { name: "fps", .. })
        ));
    }

    #[test]
    fn zero_lives_rejected() {
        let s = Settings { lives: 0, ..Settings::default() };
        assert!(s.validate().is_err());
    }

    #[test]
    fn flags_parse() {
        let s = Settings::try_parse_from(["aliens", "--fps", "60", "--seed", "7", "--bell"]).unwrap();
        assert_eq!(s.fps, 60);
        assert_eq!(s.seed, Some(7));
        assert!(s.bell);
    }

    #[test]
    fn damage_table() {
        let table: Vec<u32> = Category::ENEMIES.iter().map(|&c| contact_damage(c)).collect();
        assert_eq!(table, vec![10, 20, 30, 50, 10, 50, 20, 20]);
        assert_eq!(contact_damage(Category::Star), 0);
    }
}
