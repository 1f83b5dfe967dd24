use aliens::actor::{Actor, World};
use aliens::assets::AssetCache;
use aliens::audio::SilentAudio;
use aliens::config::SCREEN;
use aliens::entities::{Aabb, Category, Vec2};
use aliens::input::{Key, KeyState};
use aliens::level::Stats;
use aliens::projectile::Projectile;
use aliens::scenery;
use aliens::scheduler::Scheduler;
use aliens::ship::{Pilot, Ship};

use rand::rngs::StdRng;
use rand::SeedableRng;

struct Rig {
    assets: AssetCache,
    keys: KeyState,
    audio: SilentAudio,
    rng: StdRng,
    stats: Stats,
}

impl Rig {
    fn new() -> Self {
        Rig {
            assets: AssetCache::new(),
            keys: KeyState::new(),
            audio: SilentAudio,
            rng: StdRng::seed_from_u64(42),
            stats: Stats { lives: 4, ammo: 100, enemies_alive: 0 },
        }
    }

    fn step(&mut self, sched: &mut Scheduler, now_ms: u64) {
        let mut world = World {
            screen: SCREEN,
            now_ms,
            input: &self.keys,
            audio: &mut self.audio,
            rng: &mut self.rng,
            stats: &mut self.stats,
        };
        sched.step_all(&mut world);
    }

    fn star(&mut self, x: f32, y: f32) -> Actor {
        let sprite = self.assets.load_image("star.png").unwrap();
        scenery::star(sprite, Vec2::new(x, y), 50)
    }

    fn rocket(&mut self, x: f32, y: f32) -> Actor {
        let sprite = self.assets.load_image("ship_bullet1.png").unwrap();
        let boom = self.assets.load_sound("ship_explosion.wav").unwrap();
        Projectile::rocket(sprite, boom, Vec2::new(x, y))
    }

    fn shell(&mut self, x: f32, y: f32) -> Actor {
        let sprite = self.assets.load_image("enemy2_bullet.png").unwrap();
        let boom = self.assets.load_sound("ship_explosion.wav").unwrap();
        Projectile::hostile(Category::Enemy2Bullet, sprite, boom, Vec2::new(x, y), Vec2::new(-5.0, 0.0))
    }
}

fn probe(x: f32, y: f32) -> Aabb {
    Aabb::centered(Vec2::new(x, y), 4.0, 4.0)
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[test]
fn spawned_actor_joins_queries_on_next_frame() {
    let mut rig = Rig::new();
    let mut sched = Scheduler::new();
    let id = {
        let star = rig.star(100.0, 100.0);
        sched.spawn(star)
    };

    // Pending actors are reachable by id but not by collision query.
    assert!(sched.get(id).is_some());
    assert!(sched.find(Category::Star, &probe(100.0, 100.0)).is_none());

    rig.step(&mut sched, 0);
    let hit = sched.find(Category::Star, &probe(100.0, 100.0)).unwrap();
    assert_eq!(hit.id, id);
    assert_eq!(hit.category, Category::Star);
}

#[test]
fn actor_spawned_mid_frame_is_not_stepped_until_next_frame() {
    let mut rig = Rig::new();
    let mut sched = Scheduler::new();
    let ship = Ship::spawn(&mut rig.assets, Vec2::new(400.0, 300.0), Pilot::Manual).unwrap();
    sched.spawn(ship);
    rig.step(&mut sched, 0);

    rig.keys.begin_frame();
    rig.keys.press(Key::Fire);
    rig.keys.release(Key::Fire);
    rig.step(&mut sched, 33);

    let (rocket, x) = sched
        .iter()
        .find(|(_, a)| a.category() == Category::ShipBullet)
        .map(|(id, a)| (id, a.body.pos.x))
        .unwrap();
    assert_eq!(x, 460.0);

    rig.keys.begin_frame();
    rig.step(&mut sched, 66);
    assert_eq!(sched.get(rocket).unwrap().body.pos.x, 475.0);
}

#[test]
fn iteration_follows_creation_order() {
    let mut rig = Rig::new();
    let mut sched = Scheduler::new();
    let ids: Vec<_> = (0..5)
        .map(|i| {
            let star = rig.star(10.0 * i as f32, 10.0);
            sched.spawn(star)
        })
        .collect();
    rig.step(&mut sched, 0);

    let seen: Vec<_> = sched.iter().map(|(id, _)| id).collect();
    assert_eq!(seen, ids);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

// ── Killing ───────────────────────────────────────────────────────────────────

#[test]
fn kill_is_idempotent() {
    let mut rig = Rig::new();
    let mut sched = Scheduler::new();
    let id = {
        let star = rig.star(100.0, 100.0);
        sched.spawn(star)
    };
    rig.step(&mut sched, 0);

    assert!(sched.kill(id));
    assert!(!sched.kill(id));
    assert!(sched.get(id).is_none());
    assert!(sched.find(Category::Star, &probe(100.0, 100.0)).is_none());

    rig.step(&mut sched, 33);
    assert!(!sched.kill(id));
    assert!(sched.is_empty());
}

#[test]
fn pending_actor_can_be_killed() {
    let mut rig = Rig::new();
    let mut sched = Scheduler::new();
    let id = {
        let star = rig.star(100.0, 100.0);
        sched.spawn(star)
    };
    assert!(sched.kill(id));
    assert!(sched.get(id).is_none());
    rig.step(&mut sched, 0);
    assert_eq!(sched.len(), 0);
}

#[test]
fn actor_killed_earlier_in_frame_is_not_stepped() {
    let mut rig = Rig::new();
    let mut sched = Scheduler::new();

    // Rocket first, then the ship, then a shell sitting on both.
    let rocket = rig.rocket(400.0, 300.0);
    sched.spawn(rocket);
    let ship = Ship::spawn(&mut rig.assets, Vec2::new(400.0, 300.0), Pilot::Manual).unwrap();
    let ship_id = sched.spawn(ship);
    let shell = rig.shell(400.0, 300.0);
    sched.spawn(shell);

    rig.step(&mut sched, 0);

    // The rocket destroyed the shell before the shell's turn came up.
    let ship = sched.get(ship_id).and_then(Actor::ship).unwrap();
    assert_eq!(ship.health, 100);
    assert_eq!(sched.count(Category::Enemy2Bullet), 0);
    assert_eq!(sched.count(Category::ShipBullet), 0);
    assert_eq!(sched.len(), 1);
}

#[test]
fn terminated_actor_is_removed() {
    let mut rig = Rig::new();
    let mut sched = Scheduler::new();
    let rocket = rig.rocket(SCREEN.x - 5.0, 300.0);
    let id = sched.spawn(rocket);
    let star = rig.star(10.0, 10.0);
    sched.spawn(star);

    rig.step(&mut sched, 0);
    assert!(sched.get(id).is_none());
    assert_eq!(sched.len(), 1);
    assert_eq!(sched.count(Category::Star), 1);
}

#[test]
fn kill_all_counts_live_and_pending() {
    let mut rig = Rig::new();
    let mut sched = Scheduler::new();
    for i in 0..3 {
        let star = rig.star(10.0 * i as f32, 10.0);
        sched.spawn(star);
    }
    rig.step(&mut sched, 0);
    let star = rig.star(50.0, 50.0);
    sched.spawn(star);

    assert_eq!(sched.kill_all(), 4);
    assert!(sched.is_empty());
    rig.step(&mut sched, 33);
    assert!(sched.is_empty());
}
