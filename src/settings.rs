//! Game settings and preferences
//!
//! Read once at startup. The browser build reads LocalStorage, the native
//! build reads the `SKYGAP_SETTINGS` environment variable. Settings are never
//! written back; there is no save state.

use serde::{Deserialize, Serialize};

use crate::sim::MAX_PARTICLES;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Explosion particles
    pub particles: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particles: true,
            show_fps: false,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            mute_on_blur: true,
        }
    }
}

impl Settings {
    /// LocalStorage key / environment variable name
    pub const STORAGE_KEY: &'static str = "sky_gap_settings";
    pub const ENV_VAR: &'static str = "SKYGAP_SETTINGS";

    /// Parse settings JSON, falling back to defaults if it is malformed.
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.clamped(),
            Err(e) => {
                log::warn!("Ignoring malformed settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Volumes limited to 0.0 - 1.0
    fn clamped(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }

    /// Effective sound effect gain
    pub fn effective_sfx_volume(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }

    /// Effective music gain
    pub fn effective_music_volume(&self) -> f32 {
        self.master_volume * self.music_volume
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles { 0 } else { MAX_PARTICLES }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the environment (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var(Self::ENV_VAR) {
            Ok(json) => {
                log::info!("Loaded settings from {}", Self::ENV_VAR);
                Self::from_json(&json)
            }
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
