use std::env;
use std::path::{Path, PathBuf};

use ::config::{Config, ConfigError, Environment, File};

use super::schema::Settings;

/// Env var naming the config file; beats the XDG location, loses to `--config`.
const CONFIG_PATH_VAR: &str = "MP3SPLIT_CONFIG_PATH";
/// Prefix of per-key overrides, e.g. `MP3SPLIT__EXPORT__MODE=frames`.
const ENV_PREFIX: &str = "MP3SPLIT";

impl Settings {
    /// Build the settings for one run.
    ///
    /// Layers, lowest first: struct defaults, the config file, `MP3SPLIT__*`
    /// variables. A file named with `--config` has to exist; the looked-up one
    /// may be missing.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match explicit {
            Some(path) => Some(File::from(path).required(true)),
            None => resolve_config_path().map(|path| File::from(path.as_path()).required(false)),
        };

        let mut builder = Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(file);
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Reject values the exporter cannot work with.
    ///
    /// Messages name the offending key as written in `config.toml`.
    pub fn validate(&self) -> Result<(), String> {
        let export = &self.export;

        if export.ffmpeg_quality > 9 {
            return Err(format!(
                "export.ffmpeg_quality is {}, expected 0..=9",
                export.ffmpeg_quality
            ));
        }
        if export.part_prefix.trim().is_empty() {
            return Err("export.part_prefix is empty".to_string());
        }
        if export.part_prefix.contains(['/', '\\']) {
            return Err(format!(
                "export.part_prefix '{}' contains a path separator",
                export.part_prefix
            ));
        }
        if export.ffmpeg_program.trim().is_empty() {
            return Err("export.ffmpeg_program is empty".to_string());
        }
        Ok(())
    }
}

/// `$MP3SPLIT_CONFIG_PATH` when set, otherwise [`default_config_path`].
pub fn resolve_config_path() -> Option<PathBuf> {
    env::var_os(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .or_else(default_config_path)
}

/// `mp3split/config.toml` under `$XDG_CONFIG_HOME`, or under `~/.config`.
pub fn default_config_path() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map(|dir| dir.join("mp3split").join("config.toml"))
}
