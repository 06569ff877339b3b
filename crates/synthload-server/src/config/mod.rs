//! Server config: optional strict YAML file merged with command-line flags.

pub mod schema;

use std::fs;
use std::path::Path;

use synthload_core::error::{Result, SynthLoadError};

use crate::cli::Cli;
use crate::transport::Transport;

pub use schema::{listen_addrs, validate_bind, ServerConfig, ServerSection};

pub fn load_from_file(path: &Path) -> Result<ServerConfig> {
    let s = fs::read_to_string(path).map_err(|e| {
        SynthLoadError::Config(format!("read config {} failed: {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| SynthLoadError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Effective runtime settings after merging defaults, file, and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind: String,
    pub transport: Transport,
}

impl Settings {
    /// Flags win over the config file, which wins over built-in defaults.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let section = match &cli.config {
            Some(path) => load_from_file(path)?.server,
            None => ServerSection::default(),
        };

        let bind = cli.bind.clone().unwrap_or(section.bind);
        validate_bind(&bind)?;
        let h2c = cli.h2c.unwrap_or(section.h2c);

        Ok(Self {
            bind,
            transport: Transport::from_h2c_flag(h2c),
        })
    }
}
