use directories::ProjectDirs;
use std::path::PathBuf;

/// File stem of the persisted user record
pub const STATE_KEY: &str = "studybuddy_demo_userstate";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("studybuddy"),
            )
        } else {
            ProjectDirs::from("", "", "studybuddy")
                .map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
        }
    }

    pub fn state_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join(format!("{STATE_KEY}.json")))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("studybuddy.log"))
    }

    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "studybuddy").map(|pd| pd.config_dir().join("config.json"))
    }
}
