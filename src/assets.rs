//! Asset loading.
//!
//! Assets are addressed the way the level scripts name them (`"enemy2.png"`,
//! `"ship_explosion.wav"`) and resolved under fixed directories (`gfx/`,
//! `sounds/`, `music/`).  The terminal build ships glyph art instead of
//! bitmaps, so resolution goes through the built-in catalog below.  A name
//! that does not resolve is fatal for whoever asked for it.

use std::collections::HashMap;

use crate::entities::{Font, Music, Sound, Sprite, Tint};
use crate::error::GameError;

const GFX_DIR: &str = "gfx";
const SOUND_DIR: &str = "sounds";

// ── Catalog ───────────────────────────────────────────────────────────────────

const fn sprite(
    name: &'static str,
    width: f32,
    height: f32,
    art: &'static [&'static str],
    tint: Tint,
) -> Sprite {
    Sprite { name, width, height, art, tint }
}

const IMAGES: &[Sprite] = &[
    // Player
    sprite("ship1.png", 80.0, 50.0, &["__|\\___ ", "==|====>"], Tint::White),
    sprite("ship2.png", 80.0, 50.0, &["__|\\___ ", "~=|====>"], Tint::White),
    sprite("ship_bullet1.png", 30.0, 12.0, &["-=>"], Tint::Cyan),
    // Moon
    sprite("enemy1.png", 50.0, 50.0, &["(o_o)", "/| |\\"], Tint::Green),
    sprite("enemy1_1.png", 50.0, 50.0, &["(o_o)", "\\| |/"], Tint::Green),
    sprite("enemy2.png", 50.0, 50.0, &["[=O=]", "/###\\"], Tint::Yellow),
    sprite("enemy2_2.png", 50.0, 50.0, &["[=@=]", "/###\\"], Tint::LightRed),
    sprite("enemy2_bullet.png", 20.0, 12.0, &["<o"], Tint::Magenta),
    // Mars
    sprite("enemy3.png", 40.0, 50.0, &["<^^>", "/vv\\"], Tint::Red),
    sprite("enemy3_1.png", 40.0, 50.0, &["<^^>", "\\vv/"], Tint::Red),
    sprite("enemy4.png", 60.0, 50.0, &["_/--\\_", "(_oo_)"], Tint::LightBlue),
    sprite("enemy4_1.png", 60.0, 50.0, &["_/--\\_", "(_**_)"], Tint::LightRed),
    // Neptune
    sprite("enemy5.png", 30.0, 25.0, &["{o}"], Tint::Cyan),
    sprite("enemy5_1.png", 30.0, 25.0, &["{*}"], Tint::LightRed),
    sprite("enemy6.png", 40.0, 50.0, &["{~~}", " )( "], Tint::Magenta),
    sprite("enemy6_1.png", 40.0, 50.0, &["{~~}", " () "], Tint::Magenta),
    sprite("enemy7.png", 30.0, 50.0, &["@@@", "@@@"], Tint::LightGreen),
    sprite("enemy7_1.png", 30.0, 50.0, &["@*@", "*@*"], Tint::LightGreen),
    // Venus
    sprite("enemy8.png", 70.0, 75.0, &["  ___  ", "<(o8o)>", " /| |\\ "], Tint::Yellow),
    sprite("enemy8_1.png", 70.0, 75.0, &["  ___  ", "<(*8*)>", " /| |\\ "], Tint::LightRed),
    sprite("enemy8_bullet2.png", 10.0, 10.0, &["*"], Tint::Yellow),
    // Scenery
    sprite("star.png", 8.0, 8.0, &["."], Tint::Grey),
    sprite("bg_luna.png", 800.0, 40.0, &["_.-._.-."], Tint::Grey),
    sprite("bg_mars.png", 800.0, 40.0, &["^^__^^__"], Tint::Red),
    sprite("bg_neptun.png", 800.0, 40.0, &["~~-~~-~~"], Tint::LightBlue),
    sprite("bg_venera.png", 800.0, 40.0, &["/\\/\\__/\\"], Tint::Yellow),
    sprite("bg_earth.png", 800.0, 40.0, &["_,-'`-,_"], Tint::Green),
];

const FONTS: &[&str] = &["c64.ttf"];

const SOUNDS: &[Sound] = &[
    Sound { name: "ship_motor4.wav", loud: false },
    Sound { name: "ship_explosion.wav", loud: true },
    Sound { name: "ship_get_nyam.wav", loud: false },
    Sound { name: "ship_rocket_start2.wav", loud: false },
    Sound { name: "enemy2_bullet.wav", loud: false },
    Sound { name: "enemy8_bullet2.wav", loud: false },
];

const TRACKS: &[&str] = &[
    "music/_music2.xm",
    "music/_music3.xm",
    "music/_music6.xm",
    "music/_music7.xm",
    "music/music.xm",
];

// ── Cache ─────────────────────────────────────────────────────────────────────

/// Load-once, reuse-many resource cache keyed by resolved path.
#[derive(Debug, Default)]
pub struct AssetCache {
    images: HashMap<String, Sprite>,
    fonts: HashMap<(String, u16), Font>,
    sounds: HashMap<String, Sound>,
    loads: usize,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_image(&mut self, name: &str) -> Result<Sprite, GameError> {
        let path = format!("{GFX_DIR}/{name}");
        if let Some(sprite) = self.images.get(&path) {
            return Ok(*sprite);
        }
        let sprite = IMAGES
            .iter()
            .find(|s| s.name == name)
            .copied()
            .ok_or_else(|| GameError::AssetNotFound { kind: "image", name: path.clone() })?;
        tracing::trace!(%path, "image loaded");
        self.loads += 1;
        self.images.insert(path, sprite);
        Ok(sprite)
    }

    pub fn load_font(&mut self, name: &str, size: u16) -> Result<Font, GameError> {
        let path = format!("{GFX_DIR}/{name}");
        if let Some(font) = self.fonts.get(&(path.clone(), size)) {
            return Ok(*font);
        }
        let name = FONTS
            .iter()
            .find(|f| **f == name)
            .copied()
            .ok_or_else(|| GameError::AssetNotFound { kind: "font", name: path.clone() })?;
        let font = Font { name, size };
        self.loads += 1;
        self.fonts.insert((path, size), font);
        Ok(font)
    }

    pub fn load_sound(&mut self, name: &str) -> Result<Sound, GameError> {
        let path = format!("{SOUND_DIR}/{name}");
        if let Some(sound) = self.sounds.get(&path) {
            return Ok(*sound);
        }
        let sound = SOUNDS
            .iter()
            .find(|s| s.name == name)
            .copied()
            .ok_or_else(|| GameError::AssetNotFound { kind: "sound", name: path.clone() })?;
        self.loads += 1;
        self.sounds.insert(path, sound);
        Ok(sound)
    }

    /// Music tracks are streamed, not cached; this only checks the track exists.
    pub fn load_music(&self, path: &str) -> Result<Music, GameError> {
        TRACKS
            .iter()
            .find(|t| **t == path)
            .map(|&name| Music { name })
            .ok_or_else(|| GameError::AssetNotFound { kind: "music", name: path.to_string() })
    }

    /// Number of distinct assets resolved so far.
    pub fn loaded(&self) -> usize {
        self.loads
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_loads_hit_the_cache() {
        let mut cache = AssetCache::new();
        let a = cache.load_image("ship1.png").unwrap();
        let b = cache.load_image("ship1.png").unwrap();
        assert_eq!(a, b);
        assert_eq!(cache.loaded(), 1);
    }

    #[test]
    fn fonts_cached_per_size() {
        let mut cache = AssetCache::new();
        cache.load_font("c64.ttf", 16).unwrap();
        cache.load_font("c64.ttf", 50).unwrap();
        cache.load_font("c64.ttf", 16).unwrap();
        assert_eq!(cache.loaded(), 2);
    }

    #[test]
    fn missing_assets_are_errors() {
        let mut cache = AssetCache::new();
        assert!(matches!(
            cache.load_image("nope.png"),
            Err(GameError::AssetNotFound { kind: "image", .. })
        ));
        assert!(cache.load_sound("nope.wav").is_err());
        assert!(cache.load_font("arial.ttf", 12).is_err());
        assert!(cache.load_music("music/nope.xm").is_err());
    }

    #[test]
    fn every_sprite_has_art() {
        for s in IMAGES {
            assert!(!s.art.is_empty(), "{} has no art", s.name);
            assert!(s.width > 0.0 && s.height > 0.0);
        }
    }
}
