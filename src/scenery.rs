//! Stars and the ground strip.  Pure decoration: never collide, never move.

use rand::Rng;

use crate::actor::{Actor, Behavior};
use crate::assets::AssetCache;
use crate::config::{STAR_COUNT, STAR_SIZES};
use crate::entities::{Body, Category, Sprite, Vec2};
use crate::error::GameError;

/// Ground strip along the bottom edge.
pub fn backdrop(sprite: Sprite, screen: Vec2) -> Actor {
    let pos = Vec2::new(screen.x / 2.0, screen.y - sprite.height / 2.0);
    Actor::new(Body::new(Category::Background, pos, sprite), Behavior::Scenery)
}

pub fn star(sprite: Sprite, pos: Vec2, size: u32) -> Actor {
    let mut body = Body::new(Category::Star, pos, sprite);
    body.size = size;
    Actor::new(body, Behavior::Scenery)
}

/// A randomly scattered star field.
pub fn sky(assets: &mut AssetCache, screen: Vec2, rng: &mut impl Rng) -> Result<Vec<Actor>, GameError> {
    let sprite = assets.load_image("star.png")?;
    Ok((0..STAR_COUNT)
        .map(|_| {
            let size = rng.gen_range(STAR_SIZES);
            let pos = Vec2::new(
                rng.gen_range(0.0..screen.x),
                rng.gen_range(0.0..screen.y),
            );
            star(sprite, pos, size)
        })
        .collect())
}
