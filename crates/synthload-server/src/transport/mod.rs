//! Transport layer: listener loop and per-connection protocol selection.

pub mod listener;
pub mod serve;

pub use listener::bind;
pub use serve::serve;

/// Wire protocol strategy chosen at startup.
///
/// Routing and handlers never look at this; it only decides which hyper
/// connection builder drives each accepted socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// HTTP/1.1 only.
    #[default]
    Http1,
    /// HTTP/1.1 plus HTTP/2 over cleartext TCP (prior knowledge) on the
    /// same socket; the protocol is sniffed from the connection preface.
    H2c,
}

impl Transport {
    pub fn from_h2c_flag(h2c: bool) -> Self {
        if h2c {
            Transport::H2c
        } else {
            Transport::Http1
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Transport::Http1 => "http1",
            Transport::H2c => "h2c",
        }
    }
}
