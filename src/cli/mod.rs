//! cli/mod.rs
//!
//! This folder contains ONLY console concerns:
//! - command-line arguments ('args')
//! - the interactive session ('session')
//! - line-based prompt helpers ('Console')
//!
//! Splitting, tagging and validation all live in `core`.

pub mod args;
pub mod session;

use std::fmt::Display;
use std::io::{self, BufRead, Write};

pub use args::build_cli;
pub use session::run;

/// Prompt/answer helper over any reader and writer.
///
/// `main` wraps the stdin/stdout locks; tests wrap a `Cursor` and a `Vec<u8>`.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print one line.
    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.output)
    }

    /// Print `prompt` (no newline) and read one line.
    ///
    /// The line ending is stripped. End of input is `UnexpectedEof`, so a
    /// closed stdin can never spin a re-prompt loop.
    pub fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }

        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Y/N question. Only `y` (any case) counts as yes.
    pub fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let answer = self.ask(prompt)?;
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }

    /// Ask until `parse` accepts the answer, printing each rejection.
    pub fn ask_until<T, E, F>(&mut self, prompt: &str, mut parse: F) -> io::Result<T>
    where
        E: Display,
        F: FnMut(&str) -> Result<T, E>,
    {
        loop {
            let answer = self.ask(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => self.say(e)?,
            }
        }
    }
}
