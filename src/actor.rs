//! The per-frame update protocol.
//!
//! Every actor is a [`Body`] plus behaviour.  Once per frame the scheduler
//! calls [`Actor::step`] with a [`Frame`], through which the actor queries
//! collisions, kills or spawns other actors, plays sounds and touches the
//! level counters.  Returning [`Step::Terminate`] removes the actor.

use rand::rngs::StdRng;

use crate::audio::{self, Audio};
use crate::enemy::Enemy;
use crate::entities::{Aabb, ActorId, ActorRef, Body, Category, Sound, Vec2};
use crate::input::Input;
use crate::level::Stats;
use crate::projectile::Projectile;
use crate::scheduler::Scheduler;
use crate::ship::Ship;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    Terminate,
}

/// Everything outside the actor set that a step may read or mutate.
pub struct World<'a> {
    pub screen: Vec2,
    /// Wall-clock milliseconds, used for damage debouncing.
    pub now_ms: u64,
    pub input: &'a dyn Input,
    pub audio: &'a mut dyn Audio,
    pub rng: &'a mut StdRng,
    pub stats: &'a mut Stats,
}

/// What an actor sees while it is being stepped.
pub struct Frame<'s, 'w> {
    actors: &'s mut Scheduler,
    pub world: &'s mut World<'w>,
}

impl<'s, 'w> Frame<'s, 'w> {
    pub(crate) fn new(actors: &'s mut Scheduler, world: &'s mut World<'w>) -> Self {
        Frame { actors, world }
    }

    pub fn find(&self, category: Category, area: &Aabb) -> Option<ActorRef> {
        self.actors.find(category, area)
    }

    pub fn find_any(&self, categories: &[Category], area: &Aabb) -> Option<ActorRef> {
        self.actors.find_any(categories, area)
    }

    pub fn kill(&mut self, id: ActorId) -> bool {
        self.actors.kill(id)
    }

    pub fn spawn(&mut self, actor: Actor) -> ActorId {
        self.actors.spawn(actor)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id)
    }

    pub fn play(&mut self, sound: &Sound) {
        audio::play_sound(&mut *self.world.audio, sound);
    }
}

#[derive(Clone, Debug)]
pub enum Behavior {
    Ship(Ship),
    Enemy(Enemy),
    Projectile(Projectile),
    /// Stars and backgrounds: drawn, never moved.
    Scenery,
}

#[derive(Clone, Debug)]
pub struct Actor {
    pub body: Body,
    pub behavior: Behavior,
}

impl Actor {
    pub fn new(body: Body, behavior: Behavior) -> Self {
        Actor { body, behavior }
    }

    pub fn step(&mut self, frame: &mut Frame<'_, '_>) -> Step {
        match &mut self.behavior {
            Behavior::Ship(ship) => ship.step(&mut self.body, frame),
            Behavior::Enemy(enemy) => enemy.step(&mut self.body, frame),
            Behavior::Projectile(projectile) => projectile.step(&mut self.body, frame),
            Behavior::Scenery => Step::Continue,
        }
    }

    pub fn category(&self) -> Category {
        self.body.category
    }

    pub fn ship(&self) -> Option<&Ship> {
        match &self.behavior {
            Behavior::Ship(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn ship_mut(&mut self) -> Option<&mut Ship> {
        match &mut self.behavior {
            Behavior::Ship(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn projectile(&self) -> Option<&Projectile> {
        match &self.behavior {
            Behavior::Projectile(p) => Some(p),
            _ => None,
        }
    }
}
