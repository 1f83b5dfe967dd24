//! The player ship.
//!
//! Each step the ship flips between its two animation frames, moves (by
//! input, or along the intro fly-by path), takes contact damage from any
//! overlapping enemy, and launches a rocket on a fire-key release.

use crate::actor::{Actor, Behavior, Frame, Step};
use crate::assets::AssetCache;
use crate::config::{
    contact_damage, CONTACT_DEBOUNCE_MS, FLYBY_MARGIN, FLYBY_SPEED, FULL_HEALTH, ROCKET_LEAD,
    ROCKET_OFFSET, SHIP_SPEED,
};
use crate::entities::{ActorId, Body, Category, Sound, Sprite, Vec2};
use crate::error::GameError;
use crate::input::Key;
use crate::projectile::Projectile;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pilot {
    /// Steered by the player, kept on screen, can fire.
    Manual,
    /// Intro fly-by: drifts right and wraps around, ignores input.
    Flyby,
}

#[derive(Clone, Debug)]
pub struct Ship {
    pub health: u32,
    pilot: Pilot,
    frames: [Sprite; 2],
    animate: bool,
    rocket_offset: f32,
    last_hit_ms: Option<u64>,
    rocket: Sprite,
    collision: Sound,
    launch: Sound,
    explosion: Sound,
}

impl Ship {
    pub fn spawn(assets: &mut AssetCache, pos: Vec2, pilot: Pilot) -> Result<Actor, GameError> {
        let frames = [assets.load_image("ship1.png")?, assets.load_image("ship2.png")?];
        let ship = Ship {
            health: FULL_HEALTH,
            pilot,
            frames,
            animate: false,
            rocket_offset: ROCKET_OFFSET,
            last_hit_ms: None,
            rocket: assets.load_image("ship_bullet1.png")?,
            collision: assets.load_sound("ship_get_nyam.wav")?,
            launch: assets.load_sound("ship_rocket_start2.wav")?,
            explosion: assets.load_sound("ship_explosion.wav")?,
        };
        Ok(Actor::new(
            Body::new(Category::Ship, pos, frames[0]),
            Behavior::Ship(ship),
        ))
    }

    pub fn pilot(&self) -> Pilot {
        self.pilot
    }

    /// Vertical offset the next rocket will launch at.
    pub fn rocket_offset(&self) -> f32 {
        self.rocket_offset
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn restore(&mut self) {
        self.health = FULL_HEALTH;
    }

    pub(crate) fn step(&mut self, body: &mut Body, frame: &mut Frame<'_, '_>) -> Step {
        body.sprite = self.frames[usize::from(self.animate)];
        self.animate = !self.animate;

        match self.pilot {
            Pilot::Manual => steer(body, frame),
            Pilot::Flyby => {
                body.pos.x += FLYBY_SPEED;
                if body.pos.x > frame.world.screen.x + FLYBY_MARGIN {
                    body.pos.x = -FLYBY_MARGIN;
                }
            }
        }

        self.check_contacts(body, frame);

        if self.pilot == Pilot::Manual && frame.world.input.was_released(Key::Fire) {
            self.fire(body, frame);
        }

        Step::Continue
    }

    /// One debounce window covers all enemy kinds: at most one contact hit
    /// per `CONTACT_DEBOUNCE_MS`.
    fn check_contacts(&mut self, body: &Body, frame: &mut Frame<'_, '_>) {
        let area = body.bounds();
        for category in Category::ENEMIES {
            if frame.find(category, &area).is_none() {
                continue;
            }
            let now = frame.world.now_ms;
            if self
                .last_hit_ms
                .is_some_and(|last| now.saturating_sub(last) < CONTACT_DEBOUNCE_MS)
            {
                continue;
            }
            self.last_hit_ms = Some(now);
            frame.play(&self.collision);
            self.take_damage(contact_damage(category));
            tracing::debug!(?category, health = self.health, "ship rammed");
        }
    }

    /// Launch a rocket if any are left.  Returns the rocket's id.
    pub fn fire(&mut self, body: &Body, frame: &mut Frame<'_, '_>) -> Option<ActorId> {
        let stats = &mut *frame.world.stats;
        if stats.ammo == 0 {
            return None;
        }
        stats.ammo -= 1;

        let origin = Vec2::new(body.pos.x + ROCKET_LEAD, body.pos.y + self.rocket_offset);
        self.rocket_offset = -self.rocket_offset;
        frame.play(&self.launch);
        Some(frame.spawn(Projectile::rocket(self.rocket, self.explosion, origin)))
    }
}

fn steer(body: &mut Body, frame: &Frame<'_, '_>) {
    let input = frame.world.input;
    if input.is_held(Key::Up) {
        body.pos.y -= SHIP_SPEED;
    }
    if input.is_held(Key::Down) {
        body.pos.y += SHIP_SPEED;
    }
    if input.is_held(Key::Left) {
        body.pos.x -= SHIP_SPEED;
    }
    if input.is_held(Key::Right) {
        body.pos.x += SHIP_SPEED;
    }

    let (half_w, half_h) = (body.width() / 2.0, body.height() / 2.0);
    let screen = frame.world.screen;
    body.pos.x = body.pos.x.clamp(half_w, screen.x - half_w);
    body.pos.y = body.pos.y.clamp(half_h, screen.y - half_h);
}
