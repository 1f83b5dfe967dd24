//! Top-level game state: the current level plus everything that outlives it.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::assets::AssetCache;
use crate::audio::Audio;
use crate::config::{Settings, SCREEN};
use crate::entities::Vec2;
use crate::error::GameError;
use crate::input::Input;
use crate::level::{Carry, Env, Level, Setup, Stage};

pub struct Game {
    settings: Settings,
    screen: Vec2,
    assets: AssetCache,
    audio: Box<dyn Audio>,
    rng: StdRng,
    level: Level,
    frames: u64,
}

impl Game {
    /// Validate the settings and open on the intro screen.
    pub fn new(settings: Settings, mut audio: Box<dyn Audio>) -> Result<Self, GameError> {
        let settings = settings.validate()?;
        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut assets = AssetCache::new();
        let screen = SCREEN;
        let level = Level::new(
            Stage::Intro,
            Carry::EMPTY,
            &mut Setup {
                assets: &mut assets,
                audio: audio.as_mut(),
                rng: &mut rng,
                screen,
            },
        )?;
        tracing::info!(fps = settings.fps, seed = ?settings.seed, "game created");
        Ok(Game { settings, screen, assets, audio, rng, level, frames: 0 })
    }

    /// Run one frame and switch levels if the current one asks for it.
    pub fn frame(&mut self, input: &dyn Input, now_ms: u64) -> Result<(), GameError> {
        self.frames += 1;
        let fresh = Carry { lives: self.settings.lives, ammo: self.settings.ammo };
        let transition = self.level.update(&mut Env {
            now_ms,
            input,
            audio: self.audio.as_mut(),
            rng: &mut self.rng,
            fresh,
        });
        if let Some(t) = transition {
            self.enter(t.to, t.carry)?;
        }
        Ok(())
    }

    /// Replace the current level.  The old one is torn down first.
    pub fn enter(&mut self, stage: Stage, carry: Carry) -> Result<(), GameError> {
        let from = self.level.stage();
        let destroyed = self.level.teardown();
        tracing::info!(?from, to = ?stage, destroyed, lives = carry.lives, ammo = carry.ammo, "stage change");
        self.level = Level::new(
            stage,
            carry,
            &mut Setup {
                assets: &mut self.assets,
                audio: self.audio.as_mut(),
                rng: &mut self.rng,
                screen: self.screen,
            },
        )?;
        Ok(())
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn stage(&self) -> Stage {
        self.level.stage()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn screen(&self) -> Vec2 {
        self.screen
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
