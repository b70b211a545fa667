mod schema;

pub use schema::{AntiCheatConfig, BackendConfig, Config, EmotionThresholds, InterviewConfig};

use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

impl Config {
    /// Load `~/.zerohire/config.toml`, creating it with defaults on first run.
    pub fn load_or_init() -> Result<Self> {
        let dir = Self::home_dir()?;
        let config_path = dir.join("config.toml");

        if !dir.exists() {
            fs::create_dir_all(&dir).context("Failed to create .zerohire directory")?;
        }

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self {
                config_path: config_path.clone(),
                ..Self::default()
            };
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).context("Failed to read config file")?;
        let mut config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, contents).context("Failed to write config file")?;
        Ok(())
    }

    pub fn silence_debounce(&self) -> Duration {
        Duration::from_millis(self.interview.silence_debounce_ms)
    }

    pub fn listen_delay(&self) -> Duration {
        Duration::from_millis(self.interview.listen_delay_ms)
    }

    pub fn interview_duration(&self) -> Duration {
        Duration::from_secs(self.interview.duration_secs)
    }

    fn home_dir() -> Result<PathBuf> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Ok(home.join(".zerohire"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_observed_frontend_constants() {
        let config = Config::default();
        assert_eq!(config.backend.origin, "http://localhost:8000");
        assert_eq!(config.interview.duration_secs, 300);
        assert_eq!(config.interview.silence_debounce_ms, 4000);
        assert_eq!(config.interview.listen_delay_ms, 500);
        assert_eq!(config.anticheat.warn_limit, 3);
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.config_path = path.clone();
        config.interview.duration_secs = 120;
        config.save().unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.interview.duration_secs, 120);
        assert_eq!(loaded.emotion.eye_squint, 0.4);
    }

    #[test]
    fn partial_config_fills_missing_sections_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[backend]\norigin = \"http://10.0.0.5:8000\"\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.backend.origin, "http://10.0.0.5:8000");
        assert_eq!(loaded.interview.silence_debounce_ms, 4000);
        assert_eq!(loaded.emotion.brow_raise, 0.3);
    }
}
