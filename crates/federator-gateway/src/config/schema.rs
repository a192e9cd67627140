use std::net::SocketAddr;

use serde::Deserialize;
use federator_core::error::{FederatorError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
        }
    }
}

impl RelayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(FederatorError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Upper bound for a `/receive` body, compressed.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// `/federate` lines are batched into chunks of about this size.
    #[serde(default = "default_federate_chunk_bytes")]
    pub federate_chunk_bytes: usize,

    /// Chunks buffered between the snapshot task and the client.
    #[serde(default = "default_federate_queue")]
    pub federate_queue: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_body_bytes: default_max_body_bytes(),
            federate_chunk_bytes: default_federate_chunk_bytes(),
            federate_queue: default_federate_queue(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !(1024..=1 << 30).contains(&self.max_body_bytes) {
            return Err(FederatorError::Config(
                "server.max_body_bytes must be between 1024 and 1073741824".into(),
            ));
        }
        if !(512..=1 << 20).contains(&self.federate_chunk_bytes) {
            return Err(FederatorError::Config(
                "server.federate_chunk_bytes must be between 512 and 1048576".into(),
            ));
        }
        if !(1..=1024).contains(&self.federate_queue) {
            return Err(FederatorError::Config(
                "server.federate_queue must be between 1 and 1024".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            FederatorError::Config(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:9999".into()
}
fn default_max_body_bytes() -> usize {
    32 << 20
}
fn default_federate_chunk_bytes() -> usize {
    8192
}
fn default_federate_queue() -> usize {
    16
}
