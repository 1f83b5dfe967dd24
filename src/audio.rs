//! Fire-and-forget audio.
//!
//! Back ends may fail; simulation code never sees it.  Always go through
//! [`play_sound`] / [`play_music`] rather than calling the trait directly.

use std::io::Write;

use crate::entities::{Music, Sound};
use crate::error::AudioError;

pub trait Audio {
    fn play(&mut self, sound: &Sound) -> Result<(), AudioError>;
    fn play_music(&mut self, track: &Music) -> Result<(), AudioError>;
}

/// Best-effort playback: failures are logged and dropped.
pub fn play_sound(audio: &mut dyn Audio, sound: &Sound) {
    if let Err(err) = audio.play(sound) {
        tracing::debug!(sound = sound.name, %err, "sound dropped");
    }
}

pub fn play_music(audio: &mut dyn Audio, track: &Music) {
    if let Err(err) = audio.play_music(track) {
        tracing::debug!(track = track.name, %err, "music dropped");
    }
}

/// Plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl Audio for SilentAudio {
    fn play(&mut self, _sound: &Sound) -> Result<(), AudioError> {
        Ok(())
    }

    fn play_music(&mut self, _track: &Music) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Rings the terminal bell for loud sounds; music is ignored.
pub struct BellAudio<W: Write> {
    out: W,
}

impl<W: Write> BellAudio<W> {
    pub fn new(out: W) -> Self {
        BellAudio { out }
    }
}

impl<W: Write> Audio for BellAudio<W> {
    fn play(&mut self, sound: &Sound) -> Result<(), AudioError> {
        if sound.loud {
            self.out.write_all(b"\x07")?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn play_music(&mut self, _track: &Music) -> Result<(), AudioError> {
        Ok(())
    }
}
