//! Rockets and enemy shells.
//!
//! A projectile checks for a hit before it moves.  Rockets destroy the oldest
//! enemy or enemy shell they overlap; shells damage the ship.  Either way the
//! projectile is spent.  Anything that leaves the screen is dropped.

use crate::actor::{Actor, Behavior, Frame, Step};
use crate::config::{PROJECTILE_DAMAGE, ROCKET_SPEED};
use crate::entities::{Body, Category, Sound, Sprite, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Allegiance {
    Player,
    Hostile,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    velocity: Vec2,
    allegiance: Allegiance,
    impact: Sound,
}

impl Projectile {
    pub fn rocket(sprite: Sprite, impact: Sound, origin: Vec2) -> Actor {
        Actor::new(
            Body::new(Category::ShipBullet, origin, sprite),
            Behavior::Projectile(Projectile {
                velocity: Vec2::new(ROCKET_SPEED, 0.0),
                allegiance: Allegiance::Player,
                impact,
            }),
        )
    }

    pub fn hostile(
        category: Category,
        sprite: Sprite,
        impact: Sound,
        origin: Vec2,
        velocity: Vec2,
    ) -> Actor {
        Actor::new(
            Body::new(category, origin, sprite),
            Behavior::Projectile(Projectile {
                velocity,
                allegiance: Allegiance::Hostile,
                impact,
            }),
        )
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn allegiance(&self) -> Allegiance {
        self.allegiance
    }

    pub(crate) fn step(&mut self, body: &mut Body, frame: &mut Frame<'_, '_>) -> Step {
        let area = body.bounds();
        match self.allegiance {
            Allegiance::Player => {
                if let Some(hit) = frame.find_any(&Category::ROCKET_TARGETS, &area) {
                    frame.play(&self.impact);
                    if frame.kill(hit.id) && hit.category.is_enemy() {
                        frame.world.stats.enemy_down();
                    }
                    return Step::Terminate;
                }
            }
            Allegiance::Hostile => {
                if let Some(hit) = frame.find(Category::Ship, &area) {
                    frame.play(&self.impact);
                    if let Some(ship) = frame.actor_mut(hit.id).and_then(Actor::ship_mut) {
                        ship.take_damage(PROJECTILE_DAMAGE);
                        tracing::debug!(health = ship.health, "ship shot");
                    }
                    return Step::Terminate;
                }
            }
        }

        body.pos.x += self.velocity.x;
        body.pos.y += self.velocity.y;
        if off_screen(body.pos, frame.world.screen) {
            Step::Terminate
        } else {
            Step::Continue
        }
    }
}

fn off_screen(pos: Vec2, screen: Vec2) -> bool {
    pos.x < 0.0 || pos.y < 0.0 || pos.x > screen.x || pos.y > screen.y
}
