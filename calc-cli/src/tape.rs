//! Key tapes: recorded key sequences replayed through a [`Session`].
//!
//! ## Tape Format
//!
//! One key sequence per line, keys separated by whitespace (see
//! [`crate::keys`] for the labels). All lines run in one session, so a line
//! continues from the display the previous line left; write `AC` to start
//! over.
//!
//! | Element | Meaning |
//! |-------------------|---------------------------------------------------|
//! | `# ...` | comment, to the end of the line |
//! | blank line | ignored |
//! | `keys => text` | press `keys`, then expect the display to be `text` |
//!
//! ### Example
//!
//! ```text
//! # running total
//! 1 2 + 3 0 =      => 42
//! / 4 =            => 10.5
//! AC 2 +/- sqrt    => Error
//! ```

use std::{fs, io, path::Path};

use tracing::{debug, info};

use crate::session::{Session, SessionError};

const COMMENT: char = '#';
const EXPECTATION: &str = "=>";

/// Errors that can occur while loading a tape.
#[derive(Debug, thiserror::Error)]
pub enum TapeError {
    #[error("cannot read tape: {0}")]
    Io(#[from] io::Error),

    /// An expectation marker with no keys before it. `line` is 1-based.
    #[error("line {line}: expectation '{expected}' has no keys to press")]
    MissingKeys { line: usize, expected: String },
}

/// One key line of a tape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapeLine {
    /// 1-based line number in the source text.
    pub line_number: usize,
    pub keys: String,
    pub expected: Option<String>,
}

/// What happened when a [`TapeLine`] was replayed.
#[derive(Debug)]
pub struct TapeOutcome {
    pub line: TapeLine,
    pub display: String,
    pub problems: Vec<SessionError>,
}

impl TapeOutcome {
    /// `true` unless the line carried an expectation the display missed.
    pub fn meets_expectation(&self) -> bool {
        self.line
            .expected
            .as_deref()
            .is_none_or(|expected| expected == self.display)
    }
}

/// Parses tape text, dropping comments and blank lines.
///
/// # Errors
///
/// * [TapeError::MissingKeys] if a line holds an expectation but no keys.
pub fn load_from_str(input: &str) -> Result<Vec<TapeLine>, TapeError> {
    let mut lines = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        let line_number = index + 1;
        let content = raw.split(COMMENT).next().unwrap_or_default();

        let (keys, expected) = match content.split_once(EXPECTATION) {
            Some((keys, expected)) => (keys.trim(), Some(expected.trim().to_string())),
            None => (content.trim(), None),
        };

        if keys.is_empty() {
            if let Some(expected) = expected {
                return Err(TapeError::MissingKeys {
                    line: line_number,
                    expected,
                });
            }
            continue;
        }

        lines.push(TapeLine {
            line_number,
            keys: keys.to_string(),
            expected,
        });
    }

    debug!(count = lines.len(), "parsed tape");
    Ok(lines)
}

/// Reads a tape file from disk.
///
/// # Errors
///
/// * [TapeError::Io] if the file cannot be read.
/// * Any error from [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<TapeLine>, TapeError> {
    let contents = fs::read_to_string(path)?;
    load_from_str(&contents)
}

/// Replays every line through `session`, in order.
pub fn replay(
    session: &mut Session,
    lines: Vec<TapeLine>,
) -> Vec<TapeOutcome> {
    let outcomes: Vec<TapeOutcome> = lines
        .into_iter()
        .map(|line| {
            let problems = session.press_line(&line.keys);
            TapeOutcome {
                display: session.display(),
                line,
                problems,
            }
        })
        .collect();

    let failed = outcomes.iter().filter(|o| !o.meets_expectation()).count();
    info!(lines = outcomes.len(), failed, "tape replayed");
    outcomes
}
