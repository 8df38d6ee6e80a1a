//! Server configuration.

use std::path::PathBuf;

use crate::server::error::Error;

/// Gateway configuration, resolved once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// The host or address to bind to.
    pub host: String,
    /// The port to bind to.
    pub port: u16,
    /// The domain `Host` headers must match; `None` accepts any host.
    pub domain: Option<String>,
    /// Root all request paths are resolved against.
    pub working_directory: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            domain: None,
            working_directory: PathBuf::from("."),
        }
    }
}

impl ServerConfig {
    /// Create a configuration for `working_directory` with default bind settings.
    pub fn new(working_directory: impl Into<PathBuf>) -> Self {
        Self {
            working_directory: working_directory.into(),
            ..Self::default()
        }
    }

    /// Set the expected domain. An empty value means "accept any host".
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        let domain = domain.into();
        self.domain = (!domain.is_empty()).then_some(domain);
        self
    }

    /// The `host:port` pair the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{host}:{port}", host = self.host, port = self.port)
    }

    /// Check that the working directory exists and is a directory.
    pub fn validate(&self) -> Result<(), Error> {
        if self.working_directory.is_dir() {
            Ok(())
        } else {
            Err(Error::InvalidWorkingDirectory(self.working_directory.clone()))
        }
    }
}
