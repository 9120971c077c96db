use std::path::PathBuf;

use clap::{Arg, Command, builder::ValueParser, value_parser};

use crate::config::ExportMode;

/// `--mode` value parser; same spellings as the config file.
pub fn parse_mode(value: &str) -> Result<ExportMode, String> {
    value.parse()
}

pub fn build_cli() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .about("Split MP3 files at millisecond timestamps and edit the parts' ID3 tags")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .help("MP3 file or directory of MP3 files (prompted for when omitted)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Config file to use instead of the default location")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_name("MODE")
                .help("How parts are written: auto, frames or ffmpeg")
                .value_parser(ValueParser::new(parse_mode)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn all_arguments_are_optional() {
        let m = build_cli().try_get_matches_from(["mp3split"]).unwrap();
        assert!(m.get_one::<PathBuf>("input").is_none());
        assert!(m.get_one::<ExportMode>("mode").is_none());
    }

    #[test]
    fn parses_input_config_and_mode() {
        let m = build_cli()
            .try_get_matches_from([
                "mp3split",
                "song.mp3",
                "--config",
                "conf.toml",
                "--mode",
                "frames",
            ])
            .unwrap();
        assert_eq!(
            m.get_one::<PathBuf>("input").map(PathBuf::as_path),
            Some(Path::new("song.mp3"))
        );
        assert_eq!(
            m.get_one::<PathBuf>("config").map(PathBuf::as_path),
            Some(Path::new("conf.toml"))
        );
        assert_eq!(m.get_one::<ExportMode>("mode"), Some(&ExportMode::Frames));
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(
            build_cli()
                .try_get_matches_from(["mp3split", "--mode", "fast"])
                .is_err()
        );
    }

    #[test]
    fn parse_mode_accepts_aliases() {
        assert_eq!(parse_mode("copy").unwrap(), ExportMode::Frames);
        assert_eq!(parse_mode("FFMPEG").unwrap(), ExportMode::Ffmpeg);
    }
}
