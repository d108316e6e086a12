use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use shared::domain::ReminderWindow;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{reminders::DEFAULT_REMINDER_RECIPIENT, ClientConfig, ClientError};

pub const SETTINGS_FILE: &str = "assignment_desk.toml";
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub reminder_recipient: String,
    pub default_window: ReminderWindow,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            reminder_recipient: DEFAULT_REMINDER_RECIPIENT.into(),
            default_window: ReminderWindow::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    reminder_recipient: Option<String>,
    default_window_hours: Option<u32>,
}

impl ClientSettings {
    /// Defaults, then `assignment_desk.toml` from the working directory if it
    /// exists, then process environment overrides.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(None)
    }

    /// Like [`ClientSettings::load`], but an explicit path must exist.
    pub fn load_from(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut settings = Self::default();

        match path {
            Some(path) => settings.apply_file(path)?,
            None => {
                let default_path = Path::new(SETTINGS_FILE);
                if default_path.exists() {
                    settings.apply_file(default_path)?;
                }
            }
        }

        settings.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(settings)
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), SettingsError> {
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileSettings = toml::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded settings file");

        if let Some(v) = file.api_base_url {
            self.api_base_url = v;
        }
        if let Some(v) = file.reminder_recipient {
            self.reminder_recipient = v;
        }
        if let Some(hours) = file.default_window_hours {
            self.set_window_hours(hours);
        }
        Ok(())
    }

    /// Later names win: `ASSIGNMENT_API_URL` is overridden by `APP__API_BASE_URL`.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(v) = non_empty("ASSIGNMENT_API_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = non_empty("APP__API_BASE_URL") {
            self.api_base_url = v;
        }

        if let Some(v) = non_empty("REMINDER_RECIPIENT") {
            self.reminder_recipient = v;
        }
        if let Some(v) = non_empty("APP__REMINDER_RECIPIENT") {
            self.reminder_recipient = v;
        }

        if let Some(v) = non_empty("APP__DEFAULT_WINDOW_HOURS") {
            match v.trim().parse::<u32>() {
                Ok(hours) => self.set_window_hours(hours),
                Err(err) => warn!("ignoring APP__DEFAULT_WINDOW_HOURS='{v}': {err}"),
            }
        }
    }

    fn set_window_hours(&mut self, hours: u32) {
        match ReminderWindow::try_from(hours) {
            Ok(window) => self.default_window = window,
            Err(err) => {
                warn!("{err}; keeping {}", ReminderWindow::default());
                self.default_window = ReminderWindow::default();
            }
        }
    }

    pub fn client_config(&self) -> Result<ClientConfig, ClientError> {
        ClientConfig::new(&self.api_base_url)
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
