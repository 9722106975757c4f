mod pretty_list;

use std::{fmt::Write as FmtWrite, sync::OnceLock};

use anyhow::{Context, Result};
use flexi_logger::{
    DeferredNow, Duplicate, FileSpec, Logger, LoggerHandle, Record, WriteMode,
};
use regex::Regex;
use textwrap::{termwidth, Options};

pub use self::pretty_list::PrettyList;

/// Matches the last continuation line of a wrapped log message.
static LAST_LINE_MATCHER: OnceLock<Regex> = OnceLock::new();

const LAST_LINE_PATTERN: &str = r"(┃)(.*)$";

/// Setup pretty console and file logging.
///
/// Logs go to the `logs` directory and are duplicated to stdout at Info and
/// above. Writes are asynchronous so the returned handle must be kept alive
/// until the application exits, dropping it flushes the log.
pub fn setup() -> Result<LoggerHandle> {
    if LAST_LINE_MATCHER.get().is_none() {
        let matcher = Regex::new(LAST_LINE_PATTERN)
            .context("Unable to build the log line matcher")?;
        let _ = LAST_LINE_MATCHER.set(matcher);
    }

    let handle = Logger::try_with_env_or_str("info")
        .context("Unable to parse the log specification")?
        .log_to_file(FileSpec::default().directory("logs"))
        .format(multiline_format)
        .duplicate_to_stdout(Duplicate::Info)
        .write_mode(WriteMode::Async)
        .start()
        .context("Unable to start the logger")?;

    log::info!(
        "Adjust the log level by setting RUST_LOG. By default RUST_LOG=info"
    );

    Ok(handle)
}

/// A multiline log format for flexi_logger.
///
/// Logs are automatically wrapped at terminal width and prefixed with unicode
/// so it's easy to tell where a big log statement begins and ends.
pub fn multiline_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    let mut full_line = String::new();
    let _ = writeln!(
        full_line,
        "{} [{}] [{}:{}]",
        record.level(),
        now.now().format("%H:%M:%S%.6f"),
        record.file().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
    );
    let _ = write!(full_line, "{}", record.args());

    writeln!(w, "{}", wrap_message(&full_line, termwidth().min(74)))
}

/// Wrap a message to `width` columns with box-drawing prefixes which mark
/// the first, middle, and last lines.
fn wrap_message(message: &str, width: usize) -> String {
    let wrap_options = Options::new(width)
        .initial_indent("┏ ")
        .subsequent_indent("┃ ");
    let wrapped = textwrap::fill(message, wrap_options);
    match LAST_LINE_MATCHER.get() {
        Some(matcher) => matcher.replace(&wrapped, "┗$2").into_owned(),
        None => wrapped,
    }
}
