use std::{
    io::{self, BufRead, IsTerminal, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use calc_core::TrigMode;
use clap::Parser;
use tracing::{debug, info};

use calc_cli::{Session, SessionError, Settings, logging, tape};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Immediate-execution calculator.
///
/// Reads whitespace-separated key labels (`1 + 2 =`, `9 0 sin`, `mr`) and
/// prints the display after each line. Without `--keys` or `--tape` it reads
/// lines from stdin; `:log LEVEL` changes the log filter and `:quit` exits.
#[derive(Parser, Debug)]
#[command(name = "calc")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keys to press, e.g. "1 + 2 ="
    #[arg(short, long, conflicts_with = "tape")]
    keys: Option<String>,

    /// Tape file to replay, one key sequence per line
    #[arg(short, long)]
    tape: Option<PathBuf>,

    /// Start in degrees rather than radians
    #[arg(long, default_value_t = false)]
    degrees: bool,

    /// Significant digits to display
    #[arg(short, long)]
    precision: Option<usize>,

    /// Seed for the random-number key
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter, e.g. "debug" or "calc_core=trace"
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)
                .with_context(|| format!("Failed to load settings: {}", path.display()))?,
            None => Settings::default(),
        };

        if self.degrees {
            settings.trig_mode = TrigMode::Degrees;
        }
        if let Some(precision) = self.precision {
            settings.precision = precision;
        }
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(level) = &self.log_level {
            settings.log_level = level.clone();
        }

        settings.validate().context("Invalid command-line settings")?;
        Ok(settings)
    }
}

// ─── modes ───────────────────────────────────────────────────────────────────

fn report(problems: &[SessionError]) {
    for problem in problems {
        eprintln!("error: {problem}");
    }
}

fn run_keys(
    session: &mut Session,
    keys: &str,
) {
    report(&session.press_line(keys));
    println!("{}", session.display());
}

fn run_tape(
    session: &mut Session,
    path: &Path,
) -> Result<()> {
    let lines = tape::load_from_file(path)
        .with_context(|| format!("Failed to load tape: {}", path.display()))?;

    let mut failed = 0;
    for outcome in tape::replay(session, lines) {
        report(&outcome.problems);
        println!("{}", outcome.display);

        if !outcome.meets_expectation() {
            failed += 1;
            eprintln!(
                "line {}: expected {}, got {}",
                outcome.line.line_number,
                outcome.line.expected.as_deref().unwrap_or_default(),
                outcome.display
            );
        }
    }

    if failed > 0 {
        bail!("{failed} tape line(s) did not match: {}", path.display());
    }
    Ok(())
}

/// The filter named by a `:log FILTER` line, or `None` for any other line.
fn log_filter(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(":log")?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

fn run_interactive(session: &mut Session) -> Result<()> {
    let interactive = io::stdin().is_terminal();
    let mut stdout = io::stdout().lock();

    let prompt = |stdout: &mut io::StdoutLock<'_>| -> io::Result<()> {
        if interactive {
            write!(stdout, "> ")?;
            stdout.flush()?;
        }
        Ok(())
    };

    prompt(&mut stdout)?;
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;

        let line = line.trim();
        if matches!(line, ":q" | ":quit") {
            break;
        }

        match log_filter(line) {
            Some("") => eprintln!("usage: :log FILTER"),
            Some(filter) => match logging::set_log_level(filter) {
                Ok(()) => info!(filter, "log filter changed"),
                Err(error) => eprintln!("error: {error}"),
            },
            None => {
                report(&session.press_line(line));
                if interactive {
                    writeln!(stdout, "{}    [{}]", session.display(), session.indicators())?;
                } else {
                    writeln!(stdout, "{}", session.display())?;
                }
            }
        }

        prompt(&mut stdout)?;
    }

    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings()?;

    logging::init_logging(&settings.log_level).context("Failed to initialise logging")?;
    debug!(?settings, "starting session");

    let mut session = Session::from_settings(&settings);

    match (&cli.keys, &cli.tape) {
        (Some(keys), _) => run_keys(&mut session, keys),
        (None, Some(path)) => run_tape(&mut session, path)?,
        (None, None) => run_interactive(&mut session)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn log_command_takes_the_rest_of_the_line() {
        assert_eq!(log_filter(":log debug"), Some("debug"));
        assert_eq!(log_filter(":log  calc_core=trace,warn "), Some("calc_core=trace,warn"));
        assert_eq!(log_filter(":log"), Some(""));
    }

    #[test]
    fn log_command_needs_a_word_boundary() {
        assert_eq!(log_filter(":logfoo"), None);
        assert_eq!(log_filter(":logdebug"), None);
    }

    #[test]
    fn key_lines_are_not_log_commands() {
        assert_eq!(log_filter("1 + 2 ="), None);
        assert_eq!(log_filter("log2"), None);
    }
}
