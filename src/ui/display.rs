//! Text shown to the user: usage, version and batch summaries.
//!
//! Usage and version text goes to stdout through the caller's writer.
//! Everything else is a diagnostic and goes to stderr so that `-view`
//! output stays clean.

use std::fmt::Write as _;

use console::{Term, style};

use crate::config::{APP_NAME, VERSION};
use crate::settings::Settings;
use crate::types::{Outcome, ProcessorMode};

/// One entry per subcommand: synopsis and description.
const COMMANDS: &[(&str, &str)] = &[
    ("encrypt -key k [-force] [-nopreserve] file ...", "encrypts file(s) with key k"),
    ("decrypt -key k [-force] [-nopreserve] [-view] file ...", "decrypts file(s) with key k"),
    ("digest file ...", "computes message digest of file(s)"),
    ("digestkey -key k", "computes message digest of key k"),
    ("crypt -key k -salt s", "computes crypt of key k with salt s (requires perl)"),
    ("version", "shows version information"),
    ("help", "shows this screen"),
];

/// The usage screen.
pub fn usage() -> String {
    let mut text = String::new();
    for (synopsis, description) in COMMANDS {
        let _ = writeln!(text, "{APP_NAME} {synopsis}");
        let _ = writeln!(text, "  {description}\n");
    }
    text
}

/// Version header followed by every loaded setting, sorted by key.
pub fn version(settings: &Settings) -> String {
    let header = format!("{APP_NAME} version {VERSION}");
    let mut text = format!("{header}\n{}\n", "-".repeat(header.len()));
    for (key, value) in settings.entries() {
        let _ = writeln!(text, "{key}={value}");
    }
    text.push('\n');
    text
}

/// Reports a malformed command line on stderr.
pub fn show_usage_error(message: &str) {
    let _ = Term::stderr().write_line(&format!("{} {message}", style(format!("{APP_NAME}:")).red().bold()));
}

/// One-line summary of a cipher batch on stderr.
pub fn show_summary(mode: ProcessorMode, outcomes: &[Outcome]) {
    let done = outcomes.iter().filter(|outcome| outcome.is_done()).count();
    let removed = outcomes.iter().filter(|outcome| matches!(outcome, Outcome::Done { removed: true })).count();

    let mark = if done == outcomes.len() { style("✓").green() } else { style("!").yellow() };
    let mut line = format!("{mark} {}", style(format!("{mode}ed {done} of {} file(s)", outcomes.len())).bold());
    if removed > 0 {
        let _ = write!(line, ", {removed} source(s) deleted");
    }

    let _ = Term::stderr().write_line(&line);
}
