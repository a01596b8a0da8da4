//! Logging setup for the supply-trace binary.
//!
//! Diagnostics go through `tracing` and are written to stderr, so they never
//! mix with the rendered tree on stdout.

use std::io::IsTerminal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "supply_trace=debug";
const QUIET_FILTER: &str = "supply_trace=error";
const DEFAULT_FILTER: &str = "supply_trace=info";

/// Picks the log filter from the verbosity flags.
///
/// 1. `--verbose`: debug for this crate (overrides `quiet`)
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG` when set
/// 4. info for this crate
pub fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the tracing subscriber.
///
/// Call once at startup, before anything logs. Later calls are ignored.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(build_filter(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}

/// Whether colored output should be used for a stream.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them, otherwise colors
/// are used only on a terminal.
pub fn should_use_colors(is_terminal: bool) -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    is_terminal
}

/// Whether the tree written to stdout should be colored
pub fn stdout_colors(no_color: bool) -> bool {
    !no_color && should_use_colors(std::io::stdout().is_terminal())
}
