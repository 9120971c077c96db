//! core/audio/ffmpeg.rs
//! Is an ffmpeg binary usable?

use std::process::{Command, Stdio};

use tracing::debug;

/// Run `<program> -version` and report whether it exited cleanly.
///
/// A missing binary, a spawn failure and a non-zero exit all count as absent.
pub fn ffmpeg_available(program: &str) -> bool {
    let status = Command::new(program)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(s) => {
            debug!(program, status = %s, "ffmpeg probe");
            s.success()
        }
        Err(e) => {
            debug!(program, error = %e, "ffmpeg probe failed to spawn");
            false
        }
    }
}
