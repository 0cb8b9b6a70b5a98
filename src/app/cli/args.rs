//! Command line arguments
//!
//! Global options apply to every subcommand. Anything left unset here falls
//! back to the configuration file and then to built-in defaults, see
//! [`Settings::resolve`](super::config::Settings::resolve).

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "eventcell")]
#[command(about = "Durable bounded notification queue")]
#[command(version)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Store file holding pending messages
    #[arg(short = 's', long = "store", value_name = "FILE", global = true)]
    pub store: Option<PathBuf>,

    /// Key the pending messages are kept under
    #[arg(short = 'k', long = "key", value_name = "KEY", global = true)]
    pub key: Option<String>,

    /// Maximum number of pending messages; older ones are dropped
    #[arg(
        short = 'n',
        long = "capacity",
        value_name = "COUNT",
        allow_negative_numbers = true,
        global = true
    )]
    pub capacity: Option<i64>,

    /// Encoding of the pending list inside the store
    #[arg(long = "codec", value_name = "CODEC", global = true)]
    pub codec: Option<CodecName>,

    /// Separator for the separated codec
    #[arg(long = "separator", value_name = "CHAR", global = true)]
    pub separator: Option<char>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"], global = true)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"], global = true)]
    pub log_format: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Force colored output
    #[arg(long = "color", action = ArgAction::SetTrue, conflicts_with = "no_color", global = true)]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", action = ArgAction::SetTrue, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Queue one or more messages
    Send {
        #[arg(required = true, value_name = "MESSAGE")]
        messages: Vec<String>,
    },
    /// Print pending messages without consuming them
    Pending,
    /// Consume and print every pending message
    Drain,
    /// Queue lines read from stdin and deliver them as they arrive
    ///
    /// `/pause` and `/resume` lines toggle delivery. Pending messages are
    /// drained at end of input; Ctrl-C leaves them in the store.
    Watch {
        /// Simulated handling time per message
        #[arg(long = "delay-ms", value_name = "MILLIS", default_value_t = 0)]
        delay_ms: u64,
    },
}

/// Codec names accepted on the command line and in the configuration file
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CodecName {
    /// Length-prefixed elements
    Length,
    /// Elements joined by a separator character
    Separated,
}

impl Args {
    /// Color choice from the flags: `None` means detect from the terminal
    pub fn color_override(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
