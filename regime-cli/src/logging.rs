//! Log output for `regime-calc`.
//!
//! Reports go to stdout, so every log line goes to stderr, and optionally
//! to an append-mode file named on the command line.

use std::{
    fs::File,
    io::{self, IsTerminal},
    path::Path,
    sync::Mutex,
};

use anyhow::{Result, anyhow};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Event formatter: timestamp, level, `file:line`, then fields.
///
/// Stderr gets a short wall-clock time; the log file gets the full local
/// date and offset.
struct LocalFmt {
    full_timestamp: bool,
}

impl LocalFmt {
    fn stderr() -> Self {
        Self {
            full_timestamp: false,
        }
    }

    fn file() -> Self {
        Self {
            full_timestamp: true,
        }
    }

    fn timestamp(&self) -> String {
        let format = if self.full_timestamp {
            "%Y-%m-%dT%H:%M:%S%.3f%:z"
        } else {
            "%H:%M:%S%.3f"
        };
        Local::now().format(format).to_string()
    }
}

fn level_colour(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

/// Source path relative to its crate's `src/` directory, e.g.
/// `regime-core/src/calculations/regimes.rs` becomes `calculations/regimes.rs`.
fn short_location(
    file: &str,
    line: u32,
) -> String {
    let file = file.replace('\\', "/");
    let relative = file.rsplit_once("src/").map_or(file.as_str(), |(_, rest)| rest);
    format!("{relative}:{line}")
}

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let location = meta
            .file()
            .zip(meta.line())
            .map(|(file, line)| short_location(file, line));

        if writer.has_ansi_escapes() {
            write!(writer, "{DIM}{}{RESET} ", self.timestamp())?;
            write!(writer, "{}{:>5}{RESET} ", level_colour(meta.level()), meta.level())?;
            if let Some(location) = location {
                write!(writer, "{CYAN}{location}{RESET} ")?;
            }
        } else {
            write!(writer, "{} {:>5} ", self.timestamp(), meta.level())?;
            if let Some(location) = location {
                write!(writer, "{location} ")?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn make_filter(default_directive: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_directive)
            .map_err(|e| anyhow!("invalid log level '{default_directive}': {e}")),
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow!("cannot open log file '{}': {e}", path.display()))
}

/// Installs the global subscriber. Call once at startup.
///
/// - Level: `RUST_LOG` when set, otherwise `default_directive`.
/// - Stderr: coloured only when attached to a terminal.
/// - File: appended to when `log_file` is given. Its directory must exist.
///
/// # Errors
///
/// Fails if `default_directive` is not a valid filter or the log file cannot
/// be opened.
pub fn init_logging(
    default_directive: &str,
    log_file: Option<&Path>,
) -> Result<()> {
    let filter = make_filter(default_directive)?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt::stderr())
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = log_file
        .map(open_log_file)
        .transpose()?
        .map(|file| {
            tracing_subscriber::fmt::layer()
                .event_format(LocalFmt::file())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("logging already initialized: {e}"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn location_is_relative_to_crate_src() {
        assert_eq!(
            short_location("regime-core/src/calculations/regimes.rs", 140),
            "calculations/regimes.rs:140"
        );
        assert_eq!(short_location("src\\main.rs", 7), "main.rs:7");
    }

    #[test]
    fn location_without_src_is_kept_whole() {
        assert_eq!(short_location("build.rs", 3), "build.rs:3");
    }

    #[test]
    fn invalid_default_directive_is_rejected() {
        // Only meaningful when RUST_LOG is unset, as in a plain test run.
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(make_filter("regime_core=loud").is_err());
        }
    }

    #[test]
    fn timestamps_differ_by_destination() {
        assert_eq!(LocalFmt::stderr().timestamp().len(), "12:34:56.789".len());
        assert!(LocalFmt::file().timestamp().contains('T'));
    }

    #[test]
    fn unopenable_log_file_is_reported() {
        let err = open_log_file(Path::new("/nonexistent-dir/regime.log")).unwrap_err();

        assert!(err.to_string().starts_with("cannot open log file '/nonexistent-dir/regime.log'"));
    }
}
