//! Logical keys and per-frame key state.
//!
//! `KeyState` keeps the frame each key was last seen pressed.  Terminals that
//! report key releases remove keys immediately; classic terminals only send
//! presses (OS key-repeat shows up as repeated presses), so a key that has
//! not been refreshed within `HOLD_WINDOW` frames counts as released.

use std::collections::{HashMap, HashSet};

/// A key is still "held" if its last press/repeat arrived within this many
/// frames.  OS key-repeat runs at ≥ 15 Hz, so 4 frames at 30 FPS (≈133 ms) is
/// always refreshed before expiry.
pub const HOLD_WINDOW: u64 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Confirm,
    Quit,
}

pub trait Input {
    fn is_held(&self, key: Key) -> bool;

    /// True for exactly one frame after the key goes up.
    fn was_released(&self, key: Key) -> bool;
}

#[derive(Debug, Default, Clone)]
pub struct KeyState {
    frame: u64,
    held: HashMap<Key, u64>,
    released: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame: drop last frame's release edges and expire keys
    /// whose repeats stopped arriving.
    pub fn begin_frame(&mut self) {
        self.frame += 1;
        self.released.clear();
        let frame = self.frame;
        let stale: Vec<Key> = self
            .held
            .iter()
            .filter(|(_, &last)| frame.saturating_sub(last) > HOLD_WINDOW)
            .map(|(&k, _)| k)
            .collect();
        for key in stale {
            self.held.remove(&key);
            self.released.insert(key);
        }
    }

    /// Press or repeat.
    pub fn press(&mut self, key: Key) {
        self.held.insert(key, self.frame);
    }

    pub fn release(&mut self, key: Key) {
        if self.held.remove(&key).is_some() {
            self.released.insert(key);
        }
    }
}

impl Input for KeyState {
    fn is_held(&self, key: Key) -> bool {
        self.held.contains_key(&key)
    }

    fn was_released(&self, key: Key) -> bool {
        self.released.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_edge_lasts_one_frame() {
        let mut keys = KeyState::new();
        keys.begin_frame();
        keys.press(Key::Fire);
        assert!(keys.is_held(Key::Fire));
        assert!(!keys.was_released(Key::Fire));

        keys.begin_frame();
        keys.release(Key::Fire);
        assert!(!keys.is_held(Key::Fire));
        assert!(keys.was_released(Key::Fire));

        keys.begin_frame();
        assert!(!keys.was_released(Key::Fire));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut keys = KeyState::new();
        keys.begin_frame();
        keys.release(Key::Confirm);
        assert!(!keys.was_released(Key::Confirm));
    }

    #[test]
    fn unrefreshed_press_expires_into_release() {
        let mut keys = KeyState::new();
        keys.begin_frame();
        keys.press(Key::Left);
        for _ in 0..HOLD_WINDOW {
            keys.begin_frame();
            assert!(keys.is_held(Key::Left));
        }
        keys.begin_frame();
        assert!(!keys.is_held(Key::Left));
        assert!(keys.was_released(Key::Left));
    }

    #[test]
    fn repeats_keep_key_held() {
        let mut keys = KeyState::new();
        for _ in 0..20 {
            keys.begin_frame();
            keys.press(Key::Up);
            assert!(keys.is_held(Key::Up));
            assert!(!keys.was_released(Key::Up));
        }
    }
}
