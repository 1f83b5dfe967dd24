use aliens::actor::World;
use aliens::assets::AssetCache;
use aliens::audio::{self, Audio, BellAudio};
use aliens::config::SCREEN;
use aliens::entities::{Music, Sound, Vec2};
use aliens::error::AudioError;
use aliens::input::{Key, KeyState};
use aliens::level::{Carry, Env, Level, Setup, Stage, Stats};
use aliens::scheduler::Scheduler;
use aliens::ship::{Pilot, Ship};

use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
struct Recorder {
    sounds: Vec<&'static str>,
    music: Vec<&'static str>,
}

impl Audio for Recorder {
    fn play(&mut self, sound: &Sound) -> Result<(), AudioError> {
        self.sounds.push(sound.name);
        Ok(())
    }

    fn play_music(&mut self, track: &Music) -> Result<(), AudioError> {
        self.music.push(track.name);
        Ok(())
    }
}

struct Broken;

impl Audio for Broken {
    fn play(&mut self, _sound: &Sound) -> Result<(), AudioError> {
        Err(AudioError::Unavailable)
    }

    fn play_music(&mut self, _track: &Music) -> Result<(), AudioError> {
        Err(AudioError::Unavailable)
    }
}

#[test]
fn each_stage_starts_its_track() {
    let mut assets = AssetCache::new();
    let mut rng = StdRng::seed_from_u64(1);
    let mut rec = Recorder::default();
    for stage in [Stage::Intro, Stage::Level1, Stage::Level3, Stage::GameOver] {
        Level::new(
            stage,
            Carry { lives: 1, ammo: 1 },
            &mut Setup { assets: &mut assets, audio: &mut rec, rng: &mut rng, screen: SCREEN },
        )
        .unwrap();
    }
    assert_eq!(rec.music, vec!["music/_music2.xm", "music/_music6.xm", "music/music.xm"]);
}

#[test]
fn firing_plays_the_launch_sound() {
    let mut assets = AssetCache::new();
    let mut rng = StdRng::seed_from_u64(1);
    let mut rec = Recorder::default();
    let mut stats = Stats { lives: 1, ammo: 1, enemies_alive: 0 };
    let mut keys = KeyState::new();
    let mut sched = Scheduler::new();
    sched.spawn(Ship::spawn(&mut assets, Vec2::new(400.0, 300.0), Pilot::Manual).unwrap());

    keys.press(Key::Fire);
    keys.release(Key::Fire);
    let mut world = World {
        screen: SCREEN,
        now_ms: 0,
        input: &keys,
        audio: &mut rec,
        rng: &mut rng,
        stats: &mut stats,
    };
    sched.step_all(&mut world);

    assert_eq!(rec.sounds, vec!["ship_rocket_start2.wav"]);
}

#[test]
fn broken_audio_never_stops_the_game() {
    let mut assets = AssetCache::new();
    let mut rng = StdRng::seed_from_u64(1);
    let mut broken = Broken;
    let mut level = Level::new(
        Stage::Level4,
        Carry { lives: 4, ammo: 100 },
        &mut Setup { assets: &mut assets, audio: &mut broken, rng: &mut rng, screen: SCREEN },
    )
    .unwrap();

    let keys = KeyState::new();
    // Enemy8 fires (and plays sounds) well within this many frames.
    for frame in 0..100u64 {
        level.update(&mut Env {
            now_ms: frame * 33,
            input: &keys,
            audio: &mut broken,
            rng: &mut rng,
            fresh: Carry::EMPTY,
        });
    }
    assert_eq!(level.stage(), Stage::Level4);
}

#[test]
fn bell_rings_only_for_loud_sounds() {
    let mut out = Vec::new();
    {
        let mut bell = BellAudio::new(&mut out);
        audio::play_sound(&mut bell, &Sound { name: "ship_explosion.wav", loud: true });
        audio::play_sound(&mut bell, &Sound { name: "ship_motor4.wav", loud: false });
        audio::play_music(&mut bell, &Music { name: "music/music.xm" });
    }
    assert_eq!(out, b"\x07");
}
