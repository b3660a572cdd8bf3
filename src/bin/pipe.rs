//! Pipe runner.
//!
//! Pipes one file into another as described by a TOML job file:
//!
//! ```toml
//! input = "in.txt"
//! output = "out.txt"
//! mode = "append"       # or "truncate" (default)
//! unit = "chars"        # or "lines" (default)
//! count = 10            # omit or 0 to pipe everything
//! log_level = "debug"   # default: "warn"
//! ```
//!
//! Usage: `iostream-pipe <job.toml>`

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde::Deserialize;

use iostream::{Closable, FileInputStream, FileOutputStream, Pipe, StreamError, WriteMode};

/// Pipe job read from the TOML file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Job {
    input: PathBuf,
    output: PathBuf,
    #[serde(default)]
    mode: Mode,
    #[serde(default)]
    unit: Unit,
    #[serde(default)]
    count: usize,
    #[serde(default = "default_log_level")]
    log_level: String,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Mode {
    #[default]
    Truncate,
    Append,
}

impl From<Mode> for WriteMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Truncate => WriteMode::Truncate,
            Mode::Append => WriteMode::Append,
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Unit {
    Chars,
    #[default]
    Lines,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn load_job(path: &Path) -> Result<Job, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read job file {}: {e}", path.display()))?;
    toml::from_str(&text).map_err(|e| format!("invalid job file {}: {e}", path.display()))
}

/// Transfer `count` units (all when 0), returning how many were moved.
fn transfer(pipe: &mut Pipe<'_>, unit: Unit, count: usize) -> Result<usize, StreamError> {
    let mut transferred = 0;

    while count == 0 || transferred < count {
        let moved = match unit {
            Unit::Chars => !pipe.process_char()?.is_end(),
            Unit::Lines => !pipe.process_line()?.is_end(),
        };
        if !moved {
            break;
        }
        transferred += 1;
    }
    Ok(transferred)
}

fn run(job: &Job) -> Result<usize, StreamError> {
    let mut input: FileInputStream = FileInputStream::open(&job.input)?;
    let mut output: FileOutputStream = FileOutputStream::create(&job.output, job.mode.into())?;

    let transferred = {
        let mut pipe = Pipe::connect(&mut input, &mut output);
        transfer(&mut pipe, job.unit, job.count)?
    };

    output.close()?;
    input.close()?;
    Ok(transferred)
}

fn main() -> ExitCode {
    let Some(job_path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: iostream-pipe <job.toml>");
        return ExitCode::from(2);
    };

    let job = match load_job(&job_path) {
        Ok(job) => job,
        Err(msg) => {
            eprintln!("error: {msg}");
            return ExitCode::FAILURE;
        }
    };

    let level = match job.log_level.parse::<tracing::Level>() {
        Ok(level) => level,
        Err(_) => {
            eprintln!("error: unknown log level '{}'", job.log_level);
            return ExitCode::FAILURE;
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(&job) {
        Ok(transferred) => {
            let unit = match job.unit {
                Unit::Chars => "chars",
                Unit::Lines => "lines",
            };
            println!("{transferred} {unit} transferred");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "pipe job failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
