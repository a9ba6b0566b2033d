//! Sound hooks fired by the simulation
//!
//! The core treats sound as fire-and-forget: it calls a [`SoundSink`] on hit
//! and score events and never consults a result. Actual playback belongs to
//! the frontend; [`AudioManager`] tracks volume state and logs what it would play.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits a wall or the top/bottom bound
    WallHit,
    /// Ball left the playfield
    Score,
    /// A potion was spawned by a paddle hit
    PotionSpawned,
    /// Match finished
    GameOver,
}

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Menu,
}

/// Receiver for simulation sound events
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect);

    fn play_music(&mut self, _track: MusicTrack) {}

    fn stop_music(&mut self) {}
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    music: Option<MusicTrack>,
    played: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            music: None,
            played: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Currently playing music track
    pub fn music(&self) -> Option<MusicTrack> {
        self.music
    }

    /// Number of effects played at non-zero volume
    pub fn played_count(&self) -> u64 {
        self.played
    }
}

impl SoundSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.played += 1;
        log::debug!("sfx {:?} at volume {:.2}", effect, vol);
    }

    fn play_music(&mut self, track: MusicTrack) {
        log::debug!("music {:?} started", track);
        self.music = Some(track);
    }

    fn stop_music(&mut self) {
        if let Some(track) = self.music.take() {
            log::debug!("music {:?} stopped", track);
        }
    }
}
