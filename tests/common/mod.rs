#![allow(dead_code)]

use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// MPEG-1 Layer III, no CRC, 128 kbit/s, 44.1 kHz, no padding, mono.
pub const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0xC0];
/// `144 * 128000 / 44100`, rounded down.
pub const FRAME_LEN: usize = 417;
pub const SAMPLES_PER_FRAME: u64 = 1152;
pub const SAMPLE_RATE: u64 = 44_100;

/// Milliseconds covered by `frames` frames, floored the way the splitter does.
pub fn duration_ms(frames: usize) -> u64 {
    frames as u64 * SAMPLES_PER_FRAME * 1000 / SAMPLE_RATE
}

/// Write a silent MP3 made of `frames` identical frames.
///
/// An all-zero side info block is a valid frame with no audio data, which is
/// enough for the demuxer and keeps binary fixtures out of the repository.
pub fn write_test_mp3<P: AsRef<Path>>(path: P, frames: usize) -> Result<(), Box<dyn Error>> {
    let mut frame = vec![0u8; FRAME_LEN];
    frame[..4].copy_from_slice(&FRAME_HEADER);

    let mut file = File::create(path)?;
    for _ in 0..frames {
        file.write_all(&frame)?;
    }
    Ok(())
}
