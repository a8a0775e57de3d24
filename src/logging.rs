//! Diagnostic logging via `tracing-subscriber`.
//!
//! Logs go to stderr so they never mix with agent answers on stdout.
//! `RUST_LOG` wins when set; otherwise `-v` flags pick the level.

use tracing_subscriber::EnvFilter;

/// Noisy dependencies capped below the crate's own level.
const QUIET_TARGETS: &[(&str, &str)] = &[
    ("sqlx", "warn"),
    ("rig", "warn"),
    ("hyper", "warn"),
    ("reqwest", "warn"),
    ("rustyline", "warn"),
];

/// Maps the number of `-v` flags to a base level.
fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn build_filter(verbosity: u8) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let mut directives = vec![level_for(verbosity).to_string()];
    for (target, level) in QUIET_TARGETS {
        directives.push(format!("{target}={level}"));
    }
    EnvFilter::new(directives.join(","))
}

/// Installs the global subscriber. Safe to call once per process.
pub fn init(verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbosity))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
