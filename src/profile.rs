//! Persisted player profile
//!
//! Upgrade levels and the best score live outside the sim. The engine
//! reads them at run start and writes the high score back when a run
//! beats it; the sim itself never touches storage.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Source of persisted player data consulted on every reset.
pub trait Profile {
    /// Lives the player starts a run with
    fn max_lives(&self) -> u8;
    /// Seconds of invincibility a star grants
    fn invincibility_duration(&self) -> f32;
    fn high_score(&self) -> u64;
    fn set_high_score(&mut self, score: u64);
}

/// Plain-data profile backed by a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileData {
    pub max_lives: u8,
    pub invincibility_duration: f32,
    pub high_score: u64,
}

impl Default for ProfileData {
    fn default() -> Self {
        Self {
            max_lives: MAX_LIVES_MIN,
            invincibility_duration: INVINCIBILITY_MIN,
            high_score: 0,
        }
    }
}

impl ProfileData {
    /// Load a profile, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(profile) => {
                    log::info!("Loaded profile from {}", path.display());
                    profile
                }
                Err(err) => {
                    log::warn!("Ignoring corrupt profile {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No profile at {}, starting fresh", path.display());
                Self::default()
            }
        }
    }

    /// Write the profile as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}

impl Profile for ProfileData {
    fn max_lives(&self) -> u8 {
        self.max_lives
    }

    fn invincibility_duration(&self) -> f32 {
        self.invincibility_duration
    }

    fn high_score(&self) -> u64 {
        self.high_score
    }

    fn set_high_score(&mut self, score: u64) {
        self.high_score = score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_the_base_upgrades() {
        let profile = ProfileData::default();
        assert_eq!(profile.max_lives, 3);
        assert_eq!(profile.invincibility_duration, 6.0);
        assert_eq!(profile.high_score, 0);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = Path::new("/nonexistent/lane-rush-profile.json");
        assert_eq!(ProfileData::load_or_default(path), ProfileData::default());
    }

    #[test]
    fn test_corrupt_json_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("lane-rush-corrupt-{}.json", std::process::id()));
        fs::write(&path, "{not json").unwrap();
        assert_eq!(ProfileData::load_or_default(&path), ProfileData::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let path = std::env::temp_dir().join(format!("lane-rush-profile-{}.json", std::process::id()));
        let profile = ProfileData {
            max_lives: 5,
            invincibility_duration: 9.5,
            high_score: 4242,
        };
        profile.save(&path).unwrap();
        assert_eq!(ProfileData::load_or_default(&path), profile);
        let _ = fs::remove_file(&path);
    }
}
