use std::{
    fs, io,
    ops::Not,
    path::{Path, PathBuf},
};

use eframe::egui;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const APP_NAME: &str = "alarm_clock";
/// looked for in the sounds directory when no sound is configured
pub const DEFAULT_SOUND: &str = "alarm.mp3";

#[derive(Debug, Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Not for Theme {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl From<Theme> for egui::Visuals {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub theme: Theme,
    pub snooze_minutes: u32,
    /// alert sound, defaults to [`DEFAULT_SOUND`] in [`Config::sounds_path`]
    pub sound: Option<PathBuf>,
    /// percent
    pub volume: f32,
    /// keep playing until dismissed instead of playing once
    pub loop_sound: bool,
    /// where alarms are stored, defaults to [`Config::data_path`]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            snooze_minutes: 5,
            sound: None,
            volume: 100.0,
            loop_sound: true,
            data_dir: None,
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the config at `path`, falling back to defaults if there is none.
    ///
    /// # Errors
    ///
    /// If the file exists but can't be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(config) => Ok(toml::from_str(&config)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(Error::io(path, e)),
        }
    }

    /// # Errors
    ///
    /// If the config can't be serialized or written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let config = toml::to_string(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(path, config).map_err(|e| Error::io(path, e))
    }

    /// # Errors
    ///
    /// If there is no home directory to put it in.
    pub fn config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// # Errors
    ///
    /// If there is no home directory to put it in.
    pub fn data_path() -> Result<PathBuf> {
        Ok(project_dirs()?.data_dir().to_path_buf())
    }

    /// # Errors
    ///
    /// If there is no home directory to put it in.
    pub fn sounds_path() -> Result<PathBuf> {
        Ok(Self::data_path()?.join("sounds"))
    }

    /// # Errors
    ///
    /// If `data_dir` isn't set and there is no home directory.
    pub fn alarms_dir(&self) -> Result<PathBuf> {
        self.data_dir.clone().map_or_else(Self::data_path, Ok)
    }

    /// # Errors
    ///
    /// If `sound` isn't set and there is no home directory.
    pub fn sound_path(&self) -> Result<PathBuf> {
        self.sound
            .clone()
            .map_or_else(|| Ok(Self::sounds_path()?.join(DEFAULT_SOUND)), Ok)
    }
}

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME).ok_or(Error::NoProjectDirs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load(&dir.path().join("config.toml")).expect("load");
        assert_eq!(config, Config::default());
        assert_eq!(config.snooze_minutes, 5);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "theme = \"Light\"\nsnooze_minutes = 10\n").expect("write");
        let config = Config::load(&path).expect("load");
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.snooze_minutes, 10);
        assert!(config.loop_sound);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            sound: Some(PathBuf::from("/tmp/ring.mp3")),
            data_dir: Some(dir.path().to_path_buf()),
            volume: 40.0,
            ..Config::default()
        };
        config.save(&path).expect("save");
        assert_eq!(Config::load(&path).expect("load"), config);
        assert_eq!(config.alarms_dir().expect("dir"), dir.path());
        assert_eq!(
            config.sound_path().expect("sound"),
            PathBuf::from("/tmp/ring.mp3")
        );
    }

    #[test]
    fn bad_toml_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "snooze_minutes = \"five\"").expect("write");
        assert!(matches!(Config::load(&path), Err(Error::ConfigParse(_))));
    }

    #[test]
    fn theme_toggles() {
        assert_eq!(!Theme::Dark, Theme::Light);
        assert_eq!(!Theme::Light, Theme::Dark);
    }
}
