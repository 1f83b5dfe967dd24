//! Plain data shared by the simulation: categories, geometry and the opaque
//! asset handles actors carry around.  No logic beyond simple geometry.

use std::fmt;

// ── Categories ────────────────────────────────────────────────────────────────

/// Identity tag used for collision queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Ship,
    Enemy1,
    Enemy2,
    Enemy3,
    Enemy4,
    Enemy5,
    Enemy6,
    Enemy7,
    Enemy8,
    ShipBullet,
    Enemy2Bullet,
    Enemy4Bullet,
    Enemy5Bullet,
    Enemy8Bullet1,
    Enemy8Bullet2,
    Star,
    Background,
}

impl Category {
    pub const ENEMIES: [Category; 8] = [
        Category::Enemy1,
        Category::Enemy2,
        Category::Enemy3,
        Category::Enemy4,
        Category::Enemy5,
        Category::Enemy6,
        Category::Enemy7,
        Category::Enemy8,
    ];

    pub const ENEMY_PROJECTILES: [Category; 5] = [
        Category::Enemy2Bullet,
        Category::Enemy4Bullet,
        Category::Enemy5Bullet,
        Category::Enemy8Bullet1,
        Category::Enemy8Bullet2,
    ];

    /// Everything a rocket can destroy.
    pub const ROCKET_TARGETS: [Category; 13] = [
        Category::Enemy1,
        Category::Enemy2,
        Category::Enemy3,
        Category::Enemy4,
        Category::Enemy5,
        Category::Enemy6,
        Category::Enemy7,
        Category::Enemy8,
        Category::Enemy2Bullet,
        Category::Enemy4Bullet,
        Category::Enemy5Bullet,
        Category::Enemy8Bullet1,
        Category::Enemy8Bullet2,
    ];

    pub fn is_enemy(self) -> bool {
        Self::ENEMIES.contains(&self)
    }

    pub fn is_enemy_projectile(self) -> bool {
        Self::ENEMY_PROJECTILES.contains(&self)
    }

    /// Drawn behind everything else.
    pub fn is_scenery(self) -> bool {
        matches!(self, Category::Star | Category::Background)
    }
}

// ── Identity ──────────────────────────────────────────────────────────────────

/// Stable handle to a spawned actor.  Ids grow with creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub(crate) u64);

impl ActorId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Actor({})", self.0)
    }
}

/// Result of a collision query: which actor matched and what it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActorRef {
    pub id: ActorId,
    pub category: Category,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
}

/// Axis-aligned bounding box, edges inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of size `w`×`h` centred on `center`.
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Aabb {
            min: Vec2::new(center.x - w / 2.0, center.y - h / 2.0),
            max: Vec2::new(center.x + w / 2.0, center.y + h / 2.0),
        }
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

// ── Asset handles ─────────────────────────────────────────────────────────────

/// Colour hint for the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    White,
    Grey,
    Red,
    LightRed,
    Green,
    LightGreen,
    LightBlue,
    Yellow,
    Cyan,
    Magenta,
}

/// Drawable handle: logical size for collision plus terminal glyph art.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub name: &'static str,
    pub width: f32,
    pub height: f32,
    pub art: &'static [&'static str],
    pub tint: Tint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Font {
    pub name: &'static str,
    pub size: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sound {
    pub name: &'static str,
    /// Loud enough to deserve the terminal bell.
    pub loud: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Music {
    pub name: &'static str,
}

// ── Text ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    TopLeft,
    Center,
}

/// A line of on-screen text.  The level rewrites `text` in place every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub font: Font,
    pub pos: Vec2,
    pub align: Align,
    pub text: String,
    pub tint: Tint,
}

// ── Body ──────────────────────────────────────────────────────────────────────

/// The positioned, drawable part of an actor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub category: Category,
    pub pos: Vec2,
    pub sprite: Sprite,
    /// Size in percent of the sprite's natural size.
    pub size: u32,
}

impl Body {
    pub fn new(category: Category, pos: Vec2, sprite: Sprite) -> Self {
        Body { category, pos, sprite, size: 100 }
    }

    pub fn width(&self) -> f32 {
        self.sprite.width * self.size as f32 / 100.0
    }

    pub fn height(&self) -> f32 {
        self.sprite.height * self.size as f32 / 100.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::centered(self.pos, self.width(), self.height())
    }
}
