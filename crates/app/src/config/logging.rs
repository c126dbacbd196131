//! Logging Config

use clap::{Args, ValueEnum};

/// Crates whose chatter is capped unless asked for explicitly.
const QUIETED_TARGETS: [&str; 3] = ["hyper", "reqwest", "rustls"];

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One human-readable line per event.
    Compact,

    /// One JSON object per event.
    Json,
}

/// Logging settings shared by every subcommand.
///
/// Logs always go to stderr, leaving stdout for state documents.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level or filter directives, e.g. `debug` or `githubtok=trace`
    #[arg(short = 'l', long, global = true, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, global = true, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl LoggingConfig {
    /// Filter directives for the subscriber.
    ///
    /// A bare level also caps the HTTP stack at `warn`; anything that already
    /// names targets is used as given.
    pub fn directives(&self) -> String {
        let level = self.log_level.trim();

        if level.contains(['=', ',']) {
            return level.to_string();
        }

        QUIETED_TARGETS
            .iter()
            .fold(level.to_string(), |directives, target| {
                format!("{directives},{target}=warn")
            })
    }
}
