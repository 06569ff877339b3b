use serde::Deserialize;
use synthload_core::error::{Result, SynthLoadError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(SynthLoadError::UnsupportedVersion);
        }

        self.server.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default)]
    pub h2c: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            h2c: false,
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        validate_bind(&self.bind)
    }
}

pub(crate) fn default_bind() -> String {
    ":8080".into()
}

/// Accepts `host:port`, `[v6]:port` or `:port`; the port must be a u16.
pub fn validate_bind(bind: &str) -> Result<()> {
    let (_host, port) = bind
        .rsplit_once(':')
        .ok_or_else(|| SynthLoadError::Config(format!("bind must be host:port, got {bind:?}")))?;
    port.parse::<u16>()
        .map_err(|_| SynthLoadError::Config(format!("bind has invalid port: {bind:?}")))?;
    Ok(())
}

/// Candidate listen addresses for a bind string, in the order to try them.
/// An empty host means every interface: dual-stack `[::]` first, then IPv4
/// for hosts where IPv6 is disabled.
pub fn listen_addrs(bind: &str) -> Vec<String> {
    if bind.starts_with(':') {
        vec![format!("[::]{bind}"), format!("0.0.0.0{bind}")]
    } else {
        vec![bind.to_string()]
    }
}
