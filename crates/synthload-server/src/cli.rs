//! Command-line flags.
//!
//! Flags are spelled the Go way (`-bind :8080`, `-h2c`), so single-dash long
//! names are rewritten to their `--` form before clap sees them.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::Parser;

const LONG_FLAGS: [&str; 3] = ["bind", "h2c", "config"];

#[derive(Debug, Default, Parser)]
#[command(name = "synthload", version, about = "Synthetic HTTP load target")]
pub struct Cli {
    /// The socket to bind to [default: :8080].
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Enable h2c (http/2 over tcp) protocol.
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub h2c: Option<bool>,

    /// Optional YAML config file; flags override its values.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse process arguments, accepting single-dash long flags.
    pub fn parse_go_style() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }
}

/// Rewrite `-name` and `-name=value` to `--name...` for known long flags.
/// Everything else, including `-h` and `-V`, is passed through untouched.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(s) = arg.to_str() else { return arg };
            let Some(rest) = s.strip_prefix('-') else { return arg };
            if rest.starts_with('-') {
                return arg;
            }
            let name = rest.split_once('=').map_or(rest, |(n, _)| n);
            if LONG_FLAGS.contains(&name) {
                OsString::from(format!("-{s}"))
            } else {
                arg
            }
        })
        .collect()
}
