use aliens::assets::AssetCache;
use aliens::entities::*;
use aliens::ship::{Pilot, Ship};

#[test]
fn category_groups() {
    for c in Category::ENEMIES {
        assert!(c.is_enemy());
        assert!(!c.is_enemy_projectile());
        assert!(!c.is_scenery());
    }
    for c in Category::ENEMY_PROJECTILES {
        assert!(c.is_enemy_projectile());
        assert!(!c.is_enemy());
    }
    // Rockets hit every enemy and every enemy shell, nothing else.
    assert_eq!(
        Category::ROCKET_TARGETS.len(),
        Category::ENEMIES.len() + Category::ENEMY_PROJECTILES.len()
    );
    assert!(Category::ROCKET_TARGETS.contains(&Category::Enemy8Bullet1));
    assert!(Category::ROCKET_TARGETS.contains(&Category::Enemy8Bullet2));
    assert!(!Category::ROCKET_TARGETS.contains(&Category::Ship));
    assert!(!Category::ROCKET_TARGETS.contains(&Category::ShipBullet));
    assert!(Category::Star.is_scenery() && Category::Background.is_scenery());
}

#[test]
fn actor_clone_is_independent() {
    let mut assets = AssetCache::new();
    let original = Ship::spawn(&mut assets, Vec2::new(200.0, 200.0), Pilot::Manual).unwrap();
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.body.pos.x = 99.0;
    cloned.ship_mut().unwrap().take_damage(40);

    assert_eq!(original.body.pos.x, 200.0);
    assert_eq!(original.ship().unwrap().health, 100);
    assert_eq!(cloned.ship().unwrap().health, 60);
}

#[test]
fn bounds_are_centred_on_position() {
    let mut assets = AssetCache::new();
    let sprite = assets.load_image("enemy4.png").unwrap();
    let body = Body::new(Category::Enemy4, Vec2::new(100.0, 100.0), sprite);
    let b = body.bounds();
    assert_eq!(b.min, Vec2::new(70.0, 75.0));
    assert_eq!(b.max, Vec2::new(130.0, 125.0));
}

#[test]
fn actor_ids_display() {
    let mut sched = aliens::scheduler::Scheduler::new();
    let mut assets = AssetCache::new();
    let ship = Ship::spawn(&mut assets, Vec2::new(0.0, 0.0), Pilot::Flyby).unwrap();
    let id = sched.spawn(ship);
    assert_eq!(id.raw(), 0);
    assert_eq!(id.to_string(), "Actor(0)");
}
