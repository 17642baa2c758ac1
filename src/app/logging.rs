//! Diagnostic logging to stderr.
//!
//! Progress lines for the user go to stdout with `println!`; tracing events
//! carry detail such as the git commands being run and are off unless
//! `--log-level` or `RUST_LOG` asks for them.

use std::fmt;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const COMPONENT: &str = "rancher_catalog";

/// Log verbosity accepted on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Filter directive used when `RUST_LOG` is unset.
pub fn default_directive(level: LogLevel) -> String {
    format!("warn,{}={}", COMPONENT, level)
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
///
/// A second call is a no-op, so tests can call it freely.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false);

    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}
