use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_dirs::AppDirs;
use crate::stats::{CompletionMetric, DailyGoal, RandomCompletion};

/// Shortest UI poll interval honoured, whatever the config says
pub const MIN_TICK_RATE_MS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Overrides the default location of the user record
    pub state_file: Option<PathBuf>,
    /// UI redraw/poll interval
    pub tick_rate_ms: u64,
    /// How long a notice stays on screen
    pub toast_ms: u64,
    /// When set, completion is measured against this many minutes per day
    pub daily_goal_minutes: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_file: None,
            tick_rate_ms: 100,
            toast_ms: 2_200,
            daily_goal_minutes: None,
        }
    }
}

impl Config {
    /// UI poll interval, clamped so a zero or tiny value cannot spin the loop
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(MIN_TICK_RATE_MS))
    }

    /// Metric used for the completion statistic
    pub fn completion_metric(&self) -> Box<dyn CompletionMetric> {
        match self.daily_goal_minutes {
            Some(minutes) => Box::new(DailyGoal { minutes }),
            None => Box::new(RandomCompletion),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("studybuddy_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "ignoring malformed config")
                }
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            state_file: Some(dir.path().join("record.json")),
            tick_rate_ms: 50,
            toast_ms: 5_000,
            daily_goal_minutes: Some(90),
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"daily_goal_minutes": 45}"#).unwrap();
        let loaded = FileConfigStore::with_path(&path).load();
        assert_eq!(loaded.daily_goal_minutes, Some(45));
        assert_eq!(loaded.tick_rate_ms, 100);
        assert_eq!(loaded.toast_ms, 2_200);
    }

    #[test]
    fn daily_goal_selects_goal_metric() {
        let state = crate::session::UserState::default();
        let today = chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let cfg = Config {
            daily_goal_minutes: Some(30),
            ..Config::default()
        };
        assert_eq!(cfg.completion_metric().completion_pct(&state, today), 0);
    }

    #[test]
    fn zero_tick_rate_is_clamped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"tick_rate_ms": 0}"#).unwrap();
        let loaded = FileConfigStore::with_path(&path).load();
        assert_eq!(loaded.tick_rate(), Duration::from_millis(MIN_TICK_RATE_MS));
        assert_eq!(Config::default().tick_rate(), Duration::from_millis(100));
    }

    #[test]
    fn malformed_config_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{{{").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }
}
