//! Status output and diagnostic logging.
//!
//! Status lines (`info`, `warn`, `error`, `success`) and banners go to stderr with
//! coloured prefixes so that stdout only carries the rendered catalog. Diagnostics
//! use `tracing` and are off unless `RUST_LOG` or `--verbose` turns them on.

use colored::*;
use tracing_subscriber::EnvFilter;

/// Install the tracing subscriber. `verbose` enables debug output for this crate.
pub fn init(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("roster=debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  // A second init (tests, repeated calls) keeps the first subscriber
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}

fn log(message: &str) {
  for line in message.lines() {
    eprintln!("{line}");
  }
}

fn format_prefix(color: Color, prefix: &str) -> String {
  format!("[{}]{:<width$}", prefix.color(color).bold(), "", width = 7 - prefix.len() - 2)
}

fn prefixed(color: Color, prefix: &str, message: &str) {
  let prefix = format_prefix(color, prefix);
  for line in message.lines() {
    log(&format!("{prefix} {line}"));
  }
}

pub fn info(message: &str) {
  prefixed(Color::Blue, "info", message);
}

pub fn warn(message: &str) {
  prefixed(Color::Yellow, "warn", message);
}

pub fn error(message: &str) {
  prefixed(Color::Red, "error", message);
}

pub fn success(message: &str) {
  prefixed(Color::Green, "sccs", message);
}

pub fn banner_line(length: usize, char: char) -> String {
  char.to_string().repeat(length)
}

/// Headline for a command's output
pub fn announce(message: &str) {
  let banner = banner_line(50, '-');
  for line in [banner.as_str(), message, banner.as_str()] {
    log(&line.blue().bold().to_string());
  }
}
