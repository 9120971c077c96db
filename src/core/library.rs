//! core/library.rs
//!
//! Filesystem side of the splitter:
//! - which files to process (one file, or the `.mp3`s directly inside a folder)
//! - where the parts go (`<stem>_<N>`, first free `N`)
//! - what the parts are called (`part1.mp3`, `part2.mp3`, ...)

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Resolve the user's input path into the list of files to split.
///
/// - File: returned as-is (extension is checked by the caller's prompt).
/// - Directory: direct children with a `.mp3` extension, any case.
///   No recursion. Sorted so runs are repeatable.
pub fn discover_inputs(path: &Path) -> io::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut out = scan_mp3s(path)?;
    out.sort();
    Ok(out)
}

/// Direct `.mp3` children of `dir`.
pub fn scan_mp3s(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() && is_mp3(&path) {
            out.push(path);
        }
    }

    Ok(out)
}

pub fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}

/// Create `<base>_<N>` for the smallest `N >= 1` that does not exist yet.
///
/// `create_dir` (not `create_dir_all`) so an `AlreadyExists` race just moves
/// on to the next number. The parent of `base` must already exist.
pub fn create_unique_directory(base: &Path) -> io::Result<PathBuf> {
    let mut n: u64 = 1;
    loop {
        let candidate = numbered(base, n);
        if !candidate.exists() {
            match fs::create_dir(&candidate) {
                Ok(()) => return Ok(candidate),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                Err(e) => return Err(e),
            }
        }
        n += 1;
    }
}

fn numbered(base: &Path, n: u64) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(format!("_{n}"));
    PathBuf::from(name)
}

/// Base path for an input's output directory: the input path minus extension.
pub fn output_base(input: &Path) -> PathBuf {
    input.with_extension("")
}

/// `part1.mp3`, `part2.mp3`, ... (`index` is 0-based).
pub fn part_file_name(prefix: &str, index: usize) -> String {
    format!("{prefix}{}.mp3", index + 1)
}
