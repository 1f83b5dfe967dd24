//! Levels and the transitions between them.
//!
//! A `Level` owns every actor of one stage.  After all actors have stepped it
//! applies the life-loss rule and evaluates the transition predicates:
//!
//! 1. no lives left and the ship knocked out → `GameOver`
//! 2. no enemies left → the stage's successor
//!
//! The intro and the two end screens wait for a released confirm key instead.

use rand::rngs::StdRng;
use rand::Rng;

use crate::actor::{Actor, World};
use crate::assets::AssetCache;
use crate::audio::{self, Audio};
use crate::config::{BANNER_FRAMES, FLYBY_START, SHIP_START};
use crate::enemy::{Enemy, Placement};
use crate::entities::{ActorId, Align, Category, Font, Label, Tint, Vec2};
use crate::error::GameError;
use crate::input::{Input, Key};
use crate::scenery;
use crate::scheduler::Scheduler;
use crate::ship::{Pilot, Ship};

const CREDITS: [&str; 3] = [
    "Idea & Graphics: Nikita Karpov",
    "Music & Programming: Andy Karpov",
    "Copyright (c) 2012",
];

// ── Stages ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Intro,
    Level1,
    Level2,
    Level3,
    Level4,
    Level5,
    GameOver,
    Won,
}

impl Stage {
    /// Where the stage leads once it is cleared (or confirmed).
    pub fn next(self) -> Stage {
        match self {
            Stage::Intro => Stage::Level1,
            Stage::Level1 => Stage::Level2,
            Stage::Level2 => Stage::Level3,
            Stage::Level3 => Stage::Level4,
            Stage::Level4 => Stage::Level5,
            Stage::Level5 => Stage::Won,
            Stage::GameOver | Stage::Won => Stage::Intro,
        }
    }

    pub fn is_playable(self) -> bool {
        !matches!(self, Stage::Intro | Stage::GameOver | Stage::Won)
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Level1 => "1",
            Stage::Level2 => "2",
            Stage::Level3 => "3",
            Stage::Level4 => "4",
            Stage::Level5 => "5",
            Stage::Intro => "Intro",
            Stage::GameOver => "Game Over",
            Stage::Won => "Won",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Stage::Level1 => "Moon",
            Stage::Level2 => "Mars",
            Stage::Level3 => "Nepthun",
            Stage::Level4 => "Venera",
            Stage::Level5 => "Back to Earth",
            _ => "",
        }
    }

    fn music(self) -> Option<&'static str> {
        match self {
            Stage::Intro | Stage::Level5 => Some("music/_music2.xm"),
            Stage::Level1 => Some("music/_music6.xm"),
            Stage::Level2 => Some("music/_music7.xm"),
            Stage::Level3 => Some("music/music.xm"),
            Stage::Level4 => Some("music/_music3.xm"),
            Stage::GameOver | Stage::Won => None,
        }
    }

    fn backdrop(self) -> Option<&'static str> {
        match self {
            Stage::Level1 => Some("bg_luna.png"),
            Stage::Level2 => Some("bg_mars.png"),
            Stage::Level3 => Some("bg_neptun.png"),
            Stage::Level4 => Some("bg_venera.png"),
            Stage::Level5 => Some("bg_earth.png"),
            _ => None,
        }
    }

    fn roster(self, rng: &mut impl Rng) -> Vec<(Category, Placement)> {
        use Category::*;
        match self {
            Stage::Level1 => vec![
                (Enemy1, Placement::at_x(300.0)),
                (Enemy2, Placement::at_x(600.0)),
                (Enemy2, Placement::at_x(700.0)),
            ],
            Stage::Level2 => vec![
                (Enemy3, Placement::at_x(300.0)),
                (Enemy4, Placement::at_x(600.0)),
            ],
            Stage::Level3 => vec![
                (Enemy7, Placement::at_x(400.0)),
                (Enemy6, Placement::at_x(rng.gen_range(500..600) as f32)),
                (Enemy5, Placement::sized(500.0, 340.0, 60)),
                (Enemy5, Placement::sized(500.0, 350.0, 70)),
                (Enemy5, Placement::sized(500.0, 360.0, 80)),
                (Enemy5, Placement::sized(500.0, 370.0, 90)),
                (Enemy5, Placement::sized(500.0, 380.0, 100)),
            ],
            Stage::Level4 => vec![(Enemy8, Placement::at_x(600.0))],
            Stage::Level5 => vec![
                (Enemy6, Placement::at(400.0, 200.0)),
                (Enemy6, Placement::at(500.0, 900.0)),
                (Enemy6, Placement::at(600.0, 400.0)),
                (Enemy6, Placement::at(700.0, -100.0)),
            ],
            Stage::Intro | Stage::GameOver | Stage::Won => vec![],
        }
    }
}

// ── Counters ──────────────────────────────────────────────────────────────────

/// Lives and rockets handed from one stage to the next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Carry {
    pub lives: u32,
    pub ammo: u32,
}

impl Carry {
    pub const EMPTY: Carry = Carry { lives: 0, ammo: 0 };
}

/// Per-level counters.  Only the level and its actors touch them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub lives: u32,
    pub ammo: u32,
    pub enemies_alive: u32,
}

impl Stats {
    pub fn enemy_down(&mut self) {
        self.enemies_alive = self.enemies_alive.saturating_sub(1);
    }

    /// A knocked-out ship costs a life; if any remain it comes back at full
    /// health.  Returns whether a life was lost.
    pub fn settle(&mut self, ship: &mut Ship) -> bool {
        if ship.health > 0 {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives >= 1 {
            ship.restore();
        }
        true
    }

    pub fn is_game_over(&self, ship_health: u32) -> bool {
        self.lives == 0 && ship_health == 0
    }
}

// ── Level ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub to: Stage,
    pub carry: Carry,
}

/// What a level needs while it is being built.
pub struct Setup<'a> {
    pub assets: &'a mut AssetCache,
    pub audio: &'a mut dyn Audio,
    pub rng: &'a mut StdRng,
    pub screen: Vec2,
}

/// What a level needs every frame.
pub struct Env<'a> {
    pub now_ms: u64,
    pub input: &'a dyn Input,
    pub audio: &'a mut dyn Audio,
    pub rng: &'a mut StdRng,
    /// Lives and rockets a brand-new game starts with.
    pub fresh: Carry,
}

/// Label slots of the in-game HUD.
struct Hud {
    level: usize,
    lives: usize,
    health: usize,
    bullets: usize,
    banner: usize,
}

pub struct Level {
    stage: Stage,
    screen: Vec2,
    actors: Scheduler,
    stats: Stats,
    ship: Option<ActorId>,
    labels: Vec<Label>,
    hud: Option<Hud>,
    banner_frames: u32,
}

impl Level {
    pub fn new(stage: Stage, carry: Carry, setup: &mut Setup<'_>) -> Result<Self, GameError> {
        let screen = setup.screen;
        let small = setup.assets.load_font("c64.ttf", 16)?;
        let big = setup.assets.load_font("c64.ttf", 50)?;
        let music = stage.music().map(|m| setup.assets.load_music(m)).transpose()?;

        let mut level = Level {
            stage,
            screen,
            actors: Scheduler::new(),
            stats: Stats { lives: carry.lives, ammo: carry.ammo, enemies_alive: 0 },
            ship: None,
            labels: Vec::new(),
            hud: None,
            banner_frames: 0,
        };
        let center = Vec2::new(screen.x / 2.0, screen.y / 2.0);

        match stage {
            Stage::Intro => {
                level.text(big, center, Align::Center, "Aliens vs Humans", Tint::White);
                level.text(small, below(center, 50.0), Align::Center, "Press \"Enter\" to start", Tint::White);
                for (i, line) in CREDITS.iter().enumerate() {
                    let y = screen.y - 20.0 * (CREDITS.len() - i) as f32;
                    level.text(small, Vec2::new(center.x, y), Align::Center, line, Tint::Green);
                }
                for star in scenery::sky(setup.assets, screen, setup.rng)? {
                    level.actors.spawn(star);
                }
                let ship = Ship::spawn(setup.assets, FLYBY_START, Pilot::Flyby)?;
                level.ship = Some(level.actors.spawn(ship));
            }
            Stage::GameOver => {
                level.text(big, center, Align::Center, "Game Over", Tint::Red);
                level.text(small, below(center, 50.0), Align::Center, "Press \"Enter\" to continue", Tint::White);
            }
            Stage::Won => {
                level.text(big, center, Align::Center, "You Won!", Tint::Green);
                level.text(small, below(center, 50.0), Align::Center, "Press \"Enter\" to continue", Tint::White);
            }
            _ => level.populate(setup, small, big)?,
        }

        if let Some(track) = music {
            audio::play_music(&mut *setup.audio, &track);
        }
        tracing::info!(
            ?stage,
            lives = level.stats.lives,
            ammo = level.stats.ammo,
            enemies = level.stats.enemies_alive,
            "stage started"
        );
        Ok(level)
    }

    /// Spawn a playable stage: ground, stars, enemies, then the ship.
    fn populate(&mut self, setup: &mut Setup<'_>, small: Font, big: Font) -> Result<(), GameError> {
        let screen = self.screen;
        if let Some(name) = self.stage.backdrop() {
            let sprite = setup.assets.load_image(name)?;
            self.actors.spawn(scenery::backdrop(sprite, screen));
        }
        for star in scenery::sky(setup.assets, screen, setup.rng)? {
            self.actors.spawn(star);
        }
        let roster = self.stage.roster(setup.rng);
        self.stats.enemies_alive = roster.len() as u32;
        for (category, at) in roster {
            let enemy = Enemy::build(category, at, setup.assets, screen, setup.rng)?;
            self.actors.spawn(enemy);
        }
        let ship = Ship::spawn(setup.assets, SHIP_START, Pilot::Manual)?;
        self.ship = Some(self.actors.spawn(ship));

        let origin = Vec2::new(0.0, 0.0);
        self.hud = Some(Hud {
            level: self.text(small, origin, Align::TopLeft, "", Tint::White),
            lives: self.text(small, Vec2::new(200.0, 0.0), Align::TopLeft, "", Tint::LightGreen),
            health: self.text(small, Vec2::new(400.0, 0.0), Align::TopLeft, "", Tint::LightRed),
            bullets: self.text(small, Vec2::new(600.0, 0.0), Align::TopLeft, "", Tint::LightBlue),
            banner: self.text(
                big,
                Vec2::new(screen.x / 2.0, screen.y / 2.0),
                Align::Center,
                &format!("Level {}: {}", self.stage.name(), self.stage.description()),
                Tint::White,
            ),
        });
        Ok(())
    }

    fn text(&mut self, font: Font, pos: Vec2, align: Align, text: &str, tint: Tint) -> usize {
        self.labels.push(Label { font, pos, align, text: text.to_string(), tint });
        self.labels.len() - 1
    }

    /// Step every actor, then decide whether the stage is over.
    pub fn update(&mut self, env: &mut Env<'_>) -> Option<Transition> {
        let mut world = World {
            screen: self.screen,
            now_ms: env.now_ms,
            input: env.input,
            audio: &mut *env.audio,
            rng: &mut *env.rng,
            stats: &mut self.stats,
        };
        self.actors.step_all(&mut world);

        match self.stage {
            Stage::Intro => env.input.was_released(Key::Confirm).then_some(Transition {
                to: Stage::Level1,
                carry: env.fresh,
            }),
            Stage::GameOver | Stage::Won => {
                env.input.was_released(Key::Confirm).then_some(Transition {
                    to: Stage::Intro,
                    carry: Carry::EMPTY,
                })
            }
            _ => self.referee(),
        }
    }

    fn referee(&mut self) -> Option<Transition> {
        let health = match self.ship.and_then(|id| self.actors.get_mut(id)).and_then(Actor::ship_mut) {
            Some(ship) => {
                if self.stats.settle(ship) {
                    tracing::info!(lives = self.stats.lives, "life lost");
                }
                ship.health
            }
            None => 0,
        };

        self.refresh_hud(health);

        if self.stats.is_game_over(health) {
            tracing::info!(stage = ?self.stage, "game over");
            return Some(Transition { to: Stage::GameOver, carry: Carry::EMPTY });
        }
        if self.stats.enemies_alive == 0 {
            let to = self.stage.next();
            let carry = if to.is_playable() {
                Carry { lives: self.stats.lives, ammo: self.stats.ammo }
            } else {
                Carry::EMPTY
            };
            return Some(Transition { to, carry });
        }
        None
    }

    fn refresh_hud(&mut self, health: u32) {
        let Some(hud) = &self.hud else {
            return;
        };
        self.labels[hud.level].text = format!("Level: {}", self.stage.name());
        self.labels[hud.lives].text = format!("Lives: {}", self.stats.lives);
        self.labels[hud.health].text = format!("Health: {health}");
        self.labels[hud.bullets].text = format!("Bullets: {}", self.stats.ammo);
        self.banner_frames += 1;
        if self.banner_frames >= BANNER_FRAMES {
            self.labels[hud.banner].text.clear();
        }
    }

    /// Destroy every actor and label.  Returns how many actors died.
    pub fn teardown(&mut self) -> usize {
        self.ship = None;
        self.hud = None;
        self.labels.clear();
        self.actors.kill_all()
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn actors(&self) -> &Scheduler {
        &self.actors
    }

    pub fn actors_mut(&mut self) -> &mut Scheduler {
        &mut self.actors
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn ship_id(&self) -> Option<ActorId> {
        self.ship
    }

    pub fn ship(&self) -> Option<&Ship> {
        self.ship.and_then(|id| self.actors.get(id)).and_then(Actor::ship)
    }

    pub fn ship_mut(&mut self) -> Option<&mut Ship> {
        self.ship.and_then(|id| self.actors.get_mut(id)).and_then(Actor::ship_mut)
    }
}

fn below(p: Vec2, dy: f32) -> Vec2 {
    Vec2::new(p.x, p.y + dy)
}
