//! Terminal output for the CLI.
//!
//! Status lines, spinners and errors all go to stderr so that stdout carries
//! nothing but the manifest and can be piped straight into `kubectl apply`.

use std::fmt::Display;
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use parking_lot::RwLock;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Suppress status lines and spinners.
    pub quiet: bool,
    /// Show extra detail (cache source, skipped families).
    pub verbose: bool,
}

impl OutputConfig {
    /// Output settings from the `--quiet` and `--verbose` flags.
    #[must_use]
    pub const fn new(quiet: bool, verbose: bool) -> Self {
        Self { quiet, verbose }
    }
}

/// Process-wide output settings, set once from the CLI flags.
static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

/// Snapshot of the current settings.
fn read_config() -> OutputConfig {
    *config_cell().read()
}

/// Apply output settings from CLI flags.
pub fn configure(config: OutputConfig) {
    *config_cell().write() = config;
}

/// Return whether quiet mode is enabled.
#[must_use]
pub fn is_quiet() -> bool {
    read_config().quiet
}

/// Return whether verbose mode is enabled.
#[must_use]
pub fn is_verbose() -> bool {
    read_config().verbose
}

/// Print a success line.
pub fn success(message: &str) {
    if is_quiet() {
        return;
    }
    eprintln!("  {} {}", "✓".green(), message);
}

/// Print a warning line. Warnings survive quiet mode.
pub fn warning(message: &str) {
    eprintln!("  {} {}", "⚠".yellow(), message);
}

/// Print an error line.
pub fn error(message: &str) {
    eprintln!("  {} {}", "×".red(), message);
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    if is_quiet() {
        return;
    }
    eprintln!("  {:<12} {}", label.dimmed(), value);
}

/// Print a dimmed note, only in verbose mode.
pub fn detail(message: &str) {
    if !is_verbose() || is_quiet() {
        return;
    }
    eprintln!("  {}", message.dimmed());
}

/// Print a hint with a `hint:` prefix.
pub fn hint(message: &str) {
    if is_quiet() {
        return;
    }
    eprintln!("  {} {}", "hint:".cyan().bold(), message);
}

/// Format a highlighted value in cyan.
pub fn highlight(value: impl Display) -> String {
    format!("{}", value.to_string().cyan())
}

const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Create and start a progress spinner on stderr.
///
/// Returns a hidden progress bar in quiet mode.
pub fn spinner(message: &str) -> indicatif::ProgressBar {
    if is_quiet() {
        let pb = indicatif::ProgressBar::hidden();
        pb.set_message(message.to_string());
        return pb;
    }

    let pb = indicatif::ProgressBar::new_spinner();
    if let Ok(style) = indicatif::ProgressStyle::default_spinner()
        .tick_strings(BRAILLE_SPINNER)
        .template("  {spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Finish a spinner with a success checkmark.
pub fn spinner_success(pb: &indicatif::ProgressBar, message: &str) {
    if is_quiet() {
        pb.finish_and_clear();
        return;
    }
    pb.finish_with_message(format!("{} {}", "✓".green(), message));
}

/// Clear a spinner after a failure; the error itself is reported by the caller.
pub fn spinner_fail(pb: &indicatif::ProgressBar) {
    pb.finish_and_clear();
}

/// Write the primary output to `path`, or stdout when no path is given.
///
/// # Errors
///
/// Returns the underlying I/O error if the file or stdout cannot be written.
pub fn emit(content: &str, path: Option<&Path>) -> std::io::Result<()> {
    match path {
        Some(path) => std::fs::write(path, content),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()
        }
    }
}
