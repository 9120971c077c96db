use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tempfile::tempdir;

/// Process environment is global; tests touching it run one at a time.
static ENV: Mutex<()> = Mutex::new(());

/// Exclusive access to the environment for one test.
///
/// Every variable touched through the scope is put back when it drops, and
/// the `MP3SPLIT__*` overrides read by `Settings::load` start out unset.
struct EnvScope {
    saved: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvScope {
    fn new() -> Self {
        let mut scope = Self {
            saved: Vec::new(),
            _lock: ENV.lock().unwrap_or_else(|poisoned| poisoned.into_inner()),
        };
        for key in [
            "MP3SPLIT__EXPORT__MODE",
            "MP3SPLIT__EXPORT__FFMPEG_PROGRAM",
            "MP3SPLIT__EXPORT__FFMPEG_QUALITY",
            "MP3SPLIT__EXPORT__PART_PREFIX",
            "MP3SPLIT__TAGS__VERSION",
            "MP3SPLIT__TAGS__COPY_SOURCE",
            "MP3SPLIT__TAGS__NUMBER_TRACKS",
        ] {
            scope.unset(key);
        }
        scope
    }

    fn remember(&mut self, key: &'static str) {
        if !self.saved.iter().any(|(k, _)| *k == key) {
            self.saved.push((key, env::var_os(key)));
        }
    }

    fn set(&mut self, key: &'static str, value: &str) {
        self.remember(key);
        // SAFETY: `ENV` serializes every test that reads or writes the environment.
        unsafe { env::set_var(key, value) }
    }

    fn unset(&mut self, key: &'static str) {
        self.remember(key);
        // SAFETY: as in `set`.
        unsafe { env::remove_var(key) }
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..).rev() {
            // SAFETY: the lock is still held; `_lock` drops after this body.
            unsafe {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }
}

fn write_config(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn config_path_variable_wins_over_xdg() {
    let mut env = EnvScope::new();
    env.set("MP3SPLIT_CONFIG_PATH", "/tmp/elsewhere/mp3split.toml");
    env.set("XDG_CONFIG_HOME", "/tmp/xdg");
    assert_eq!(
        resolve_config_path(),
        Some(PathBuf::from("/tmp/elsewhere/mp3split.toml"))
    );
}

#[test]
fn default_path_lives_under_xdg_config_home() {
    let mut env = EnvScope::new();
    env.unset("MP3SPLIT_CONFIG_PATH");
    env.set("XDG_CONFIG_HOME", "/tmp/xdg");
    assert_eq!(
        resolve_config_path(),
        Some(PathBuf::from("/tmp/xdg/mp3split/config.toml"))
    );
}

#[test]
fn default_path_without_xdg_uses_home_dot_config() {
    let mut env = EnvScope::new();
    env.unset("XDG_CONFIG_HOME");
    env.set("HOME", "/tmp/someone");
    assert_eq!(
        default_config_path(),
        Some(PathBuf::from("/tmp/someone/.config/mp3split/config.toml"))
    );
}

#[test]
fn defaults_pass_validation() {
    let s = Settings::default();
    assert_eq!(s.export.mode, ExportMode::Auto);
    assert_eq!(s.export.ffmpeg_program, "ffmpeg");
    assert_eq!(s.export.part_prefix, "part");
    assert_eq!(s.tags.version, TagVersion::Id3v23);
    assert!(s.tags.copy_source);
    assert!(s.tags.number_tracks);
    assert!(s.validate().is_ok());
}

#[test]
fn explicit_file_fills_only_the_keys_it_names() {
    let _env = EnvScope::new();
    let dir = tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r#"
[export]
mode = "frames"
part_prefix = "track"

[tags]
version = "2.4"
number_tracks = false
"#,
    );

    let s = Settings::load(Some(path.as_path())).unwrap();
    assert_eq!(s.export.mode, ExportMode::Frames);
    assert_eq!(s.export.part_prefix, "track");
    assert_eq!(s.export.ffmpeg_quality, 2);
    assert_eq!(s.tags.version, TagVersion::Id3v24);
    assert!(!s.tags.number_tracks);
    assert!(s.tags.copy_source);
}

#[test]
fn variables_beat_the_file() {
    let mut env = EnvScope::new();
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), "[export]\nmode = \"frames\"\n");

    env.set("MP3SPLIT__EXPORT__MODE", "ffmpeg");
    env.set("MP3SPLIT__EXPORT__FFMPEG_QUALITY", "5");

    let s = Settings::load(Some(path.as_path())).unwrap();
    assert_eq!(s.export.mode, ExportMode::Ffmpeg);
    assert_eq!(s.export.ffmpeg_quality, 5);
}

#[test]
fn tag_version_from_variable_accepts_dotted_numbers() {
    let mut env = EnvScope::new();
    let dir = tempdir().unwrap();
    env.set("MP3SPLIT_CONFIG_PATH", dir.path().join("absent.toml").to_str().unwrap());

    for (raw, expected) in [
        ("2.4", TagVersion::Id3v24),
        ("2.3", TagVersion::Id3v23),
        ("id3v24", TagVersion::Id3v24),
        ("ID3v23", TagVersion::Id3v23),
    ] {
        env.set("MP3SPLIT__TAGS__VERSION", raw);
        let s = Settings::load(None).unwrap();
        assert_eq!(s.tags.version, expected, "MP3SPLIT__TAGS__VERSION={raw}");
    }

    env.set("MP3SPLIT__TAGS__VERSION", "2.5");
    assert!(Settings::load(None).is_err());
}

#[test]
fn tag_version_accepts_bare_toml_number() {
    let _env = EnvScope::new();
    let dir = tempdir().unwrap();

    let path = write_config(dir.path(), "[tags]\nversion = 2.4\n");
    let s = Settings::load(Some(path.as_path())).unwrap();
    assert_eq!(s.tags.version, TagVersion::Id3v24);

    let path = write_config(dir.path(), "[tags]\nversion = 3\n");
    assert!(Settings::load(Some(path.as_path())).is_err());
}

#[test]
fn tag_version_parses_every_spelling() {
    for raw in ["2.3", "v2.3", "v23", "id3v23", " ID3V23 "] {
        assert_eq!(raw.parse::<TagVersion>(), Ok(TagVersion::Id3v23), "{raw}");
    }
    for raw in ["2.4", "v2.4", "v24", "id3v24"] {
        assert_eq!(raw.parse::<TagVersion>(), Ok(TagVersion::Id3v24), "{raw}");
    }
    assert!("2.2".parse::<TagVersion>().is_err());
}

#[test]
fn explicit_missing_file_is_an_error() {
    let _env = EnvScope::new();
    let dir = tempdir().unwrap();
    assert!(Settings::load(Some(dir.path().join("missing.toml").as_path())).is_err());
}

#[test]
fn validate_rejects_bad_values() {
    let mut s = Settings::default();
    s.export.ffmpeg_quality = 10;
    assert!(s.validate().unwrap_err().contains("ffmpeg_quality"));

    let mut s = Settings::default();
    s.export.part_prefix = "  ".to_string();
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.export.part_prefix = "a/b".to_string();
    assert!(s.validate().unwrap_err().contains("separator"));

    let mut s = Settings::default();
    s.export.ffmpeg_program = String::new();
    assert!(s.validate().is_err());
}

#[test]
fn export_mode_from_str() {
    assert_eq!("auto".parse::<ExportMode>(), Ok(ExportMode::Auto));
    assert_eq!("FRAMES".parse::<ExportMode>(), Ok(ExportMode::Frames));
    assert_eq!("copy".parse::<ExportMode>(), Ok(ExportMode::Frames));
    assert_eq!("ffmpeg".parse::<ExportMode>(), Ok(ExportMode::Ffmpeg));
    assert!("lame".parse::<ExportMode>().is_err());
}
