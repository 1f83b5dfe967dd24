//! The eight enemy kinds.
//!
//! They all share one shape: a pair of sprites, an optional blink cadence,
//! a motion pattern, and zero to two guns.  A gun counts down from a random
//! value, shows the enemy's second sprite for the last few ticks, then fires
//! its volley and reseeds.

use std::ops::Range;

use rand::Rng;

use crate::actor::{Actor, Behavior, Frame, Step};
use crate::assets::AssetCache;
use crate::config::{
    FIRING_POSE_TICKS, PATROL_MAX_X, PATROL_MIN_X, PATROL_SPEED, PROJECTILE_SPEED, RAPID_FIRE,
    SLOW_FIRE,
};
use crate::entities::{Body, Category, Sound, Sprite, Vec2};
use crate::error::GameError;
use crate::projectile::Projectile;

/// Where a level puts an enemy.  `y` falls back to a per-kind ground height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: Option<f32>,
    /// Percent of natural size.
    pub size: u32,
}

impl Placement {
    pub fn at_x(x: f32) -> Self {
        Placement { x, y: None, size: 100 }
    }

    pub fn at(x: f32, y: f32) -> Self {
        Placement { x, y: Some(y), size: 100 }
    }

    pub fn sized(x: f32, y: f32, size: u32) -> Self {
        Placement { x, y: Some(y), size }
    }
}

// ── Behaviour parts ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
enum Motion {
    Still,
    /// Back and forth between `PATROL_MIN_X` and `PATROL_MAX_X`.
    PatrolX { dir: f32 },
    /// Up and down across the whole screen height.
    PatrolY { dir: f32 },
}

/// Sprite cycling: show the base sprite after `base_after` ticks, the
/// alternate after `alt_after`, then start over.
#[derive(Clone, Copy, Debug)]
struct Blink {
    ticks: u32,
    base_after: u32,
    alt_after: u32,
}

impl Blink {
    fn new(base_after: u32, alt_after: u32) -> Self {
        Blink { ticks: 0, base_after, alt_after }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Volley {
    /// Enemy2: one shell up and to the left.
    Lob,
    /// Enemy4: one shell straight left from above the hull.
    Level,
    /// Enemy5: one shell straight left from the top edge.
    Pod,
    /// Enemy8 first gun: three shells fanned vertically.
    Fan,
    /// Enemy8 second gun: three shells from the nose.
    Burst,
}

const FAN: [(f32, f32); 3] = [(5.0, 3.0), (5.0, 5.0), (5.0, -1.0)];
const BURST: [(f32, f32); 3] = [(5.0, 5.0), (3.0, 5.0), (5.0, -1.0)];

#[derive(Clone, Debug)]
struct Gun {
    countdown: i32,
    range: Range<i32>,
    volley: Volley,
    category: Category,
    shell: Sprite,
    launch: Sound,
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    frames: [Sprite; 2],
    motion: Motion,
    blink: Option<Blink>,
    guns: Vec<Gun>,
    impact: Sound,
}

impl Enemy {
    /// Build an enemy of `category`.  Fails for non-enemy categories or
    /// missing assets.
    pub fn build(
        category: Category,
        at: Placement,
        assets: &mut AssetCache,
        screen: Vec2,
        rng: &mut impl Rng,
    ) -> Result<Actor, GameError> {
        let (base, alt) = match category {
            Category::Enemy1 => ("enemy1.png", "enemy1_1.png"),
            Category::Enemy2 => ("enemy2.png", "enemy2_2.png"),
            Category::Enemy3 => ("enemy3.png", "enemy3_1.png"),
            Category::Enemy4 => ("enemy4.png", "enemy4_1.png"),
            Category::Enemy5 => ("enemy5.png", "enemy5_1.png"),
            Category::Enemy6 => ("enemy6.png", "enemy6_1.png"),
            Category::Enemy7 => ("enemy7.png", "enemy7_1.png"),
            Category::Enemy8 => ("enemy8.png", "enemy8_1.png"),
            other => return Err(GameError::NotAnEnemy(other)),
        };
        let frames = [assets.load_image(base)?, assets.load_image(alt)?];

        // Height above the bottom edge, measured to the sprite's lower edge.
        let lift = match category {
            Category::Enemy2 => 30.0,
            Category::Enemy4 => 220.0,
            Category::Enemy8 => 100.0,
            _ => 20.0,
        };
        let ground = screen.y - frames[0].height / 2.0 - lift;
        let y = at.y.unwrap_or(ground);

        let mut gun = |volley: Volley,
                       category: Category,
                       shell: &str,
                       launch: &str,
                       range: Range<i32>|
         -> Result<Gun, GameError> {
            Ok(Gun {
                countdown: rng.gen_range(range.clone()),
                range,
                volley,
                category,
                shell: assets.load_image(shell)?,
                launch: assets.load_sound(launch)?,
            })
        };

        let (motion, blink, guns) = match category {
            Category::Enemy1 | Category::Enemy3 => {
                (Motion::PatrolX { dir: 1.0 }, Some(Blink::new(3, 6)), vec![])
            }
            Category::Enemy2 => (
                Motion::Still,
                None,
                vec![gun(Volley::Lob, Category::Enemy2Bullet, "enemy2_bullet.png", "enemy2_bullet.wav", SLOW_FIRE)?],
            ),
            Category::Enemy4 => (
                Motion::Still,
                None,
                vec![gun(Volley::Level, Category::Enemy4Bullet, "enemy2_bullet.png", "enemy2_bullet.wav", SLOW_FIRE)?],
            ),
            Category::Enemy5 => (
                Motion::Still,
                None,
                vec![gun(Volley::Pod, Category::Enemy5Bullet, "enemy2_bullet.png", "enemy2_bullet.wav", SLOW_FIRE)?],
            ),
            Category::Enemy6 => (Motion::PatrolY { dir: 1.0 }, Some(Blink::new(3, 6)), vec![]),
            Category::Enemy7 => (Motion::Still, Some(Blink::new(1, 3)), vec![]),
            _ => (
                Motion::Still,
                None,
                vec![
                    gun(Volley::Fan, Category::Enemy8Bullet1, "enemy2_bullet.png", "enemy2_bullet.wav", RAPID_FIRE)?,
                    gun(Volley::Burst, Category::Enemy8Bullet2, "enemy8_bullet2.png", "enemy8_bullet2.wav", RAPID_FIRE)?,
                ],
            ),
        };

        let enemy = Enemy {
            frames,
            motion,
            blink,
            guns,
            impact: assets.load_sound("ship_explosion.wav")?,
        };
        let mut body = Body::new(category, Vec2::new(at.x, y), frames[0]);
        body.size = at.size;
        Ok(Actor::new(body, Behavior::Enemy(enemy)))
    }

    pub(crate) fn step(&mut self, body: &mut Body, frame: &mut Frame<'_, '_>) -> Step {
        if let Some(blink) = &mut self.blink {
            blink.ticks += 1;
            if blink.ticks > blink.alt_after {
                body.sprite = self.frames[1];
                blink.ticks = 0;
            } else if blink.ticks > blink.base_after {
                body.sprite = self.frames[0];
            }
        }

        match &mut self.motion {
            Motion::Still => {}
            Motion::PatrolX { dir } => {
                body.pos.x += *dir * PATROL_SPEED;
                if body.pos.x > PATROL_MAX_X {
                    *dir = -1.0;
                }
                if body.pos.x < PATROL_MIN_X {
                    *dir = 1.0;
                }
            }
            Motion::PatrolY { dir } => {
                body.pos.y += *dir * PATROL_SPEED;
                if body.pos.y > frame.world.screen.y {
                    *dir = -1.0;
                }
                if body.pos.y < 0.0 {
                    *dir = 1.0;
                }
            }
        }

        for gun in &mut self.guns {
            if gun.countdown <= 0 {
                fire(gun, body, &self.impact, frame);
                gun.countdown = frame.world.rng.gen_range(gun.range.clone());
                body.sprite = self.frames[0];
            } else {
                if gun.countdown < FIRING_POSE_TICKS {
                    body.sprite = self.frames[1];
                }
                gun.countdown -= 1;
            }
        }

        Step::Continue
    }
}

fn fire(gun: &Gun, body: &Body, impact: &Sound, frame: &mut Frame<'_, '_>) {
    let (x, y) = (body.pos.x, body.pos.y);
    let (half_w, half_h) = (body.width() / 2.0, body.height() / 2.0);
    let shell_half_h = gun.shell.height / 2.0;

    let shells: Vec<(Vec2, Vec2)> = match gun.volley {
        Volley::Lob => vec![(Vec2::new(x - half_w, y - 70.0), Vec2::new(-PROJECTILE_SPEED, -2.0))],
        Volley::Level => vec![(Vec2::new(x - half_w, y - 40.0), Vec2::new(-PROJECTILE_SPEED, 0.0))],
        Volley::Pod => vec![(
            Vec2::new(x - half_w, y - half_h + shell_half_h),
            Vec2::new(-PROJECTILE_SPEED, 0.0),
        )],
        Volley::Fan => {
            let origin = Vec2::new(x - half_w, y - half_h + shell_half_h + 20.0);
            FAN.iter().map(|&(dx, dy)| (origin, Vec2::new(-dx, -dy))).collect()
        }
        Volley::Burst => {
            let origin = Vec2::new(x - half_w + 40.0, y - half_h + shell_half_h);
            BURST.iter().map(|&(dx, dy)| (origin, Vec2::new(-dx, -dy))).collect()
        }
    };

    for (origin, velocity) in shells {
        frame.play(&gun.launch);
        frame.spawn(Projectile::hostile(gun.category, gun.shell, *impact, origin, velocity));
    }
}
