//! Gateway server: accept loop and per-connection pipeline.

use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::signal;
use log::{info, error};

use crate::parser::read_request;
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::response::write_response;
use crate::server::router::route;

/// A file-access gateway server.
///
/// Connections are served strictly one at a time: each accepted
/// connection is read, routed, answered and closed before the next
/// `accept`. There are no read or write deadlines, so a stalled client
/// holds up every other client.
pub struct HttpServer {
    /// The server configuration.
    pub config: Arc<ServerConfig>,
}

impl HttpServer {
    /// Create a new server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Display the server banner and the resolved configuration.
    fn display_server_info(&self) {
        let banner = include_str!("../banner.txt");
        info!("\n{banner}");
        info!(
            "Starting server on {addr}, domain {domain:?}, working directory {dir}",
            addr = self.config.bind_address(),
            domain = self.config.domain.as_deref().unwrap_or(""),
            dir = self.config.working_directory.display()
        );
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(self.config.bind_address()).await?;
        info!("Listening at {addr}", addr = listener.local_addr()?);
        Ok(listener)
    }

    /// Handle an error from `accept`.
    ///
    /// Accept failures are usually transient (for example running out of
    /// file descriptors), so the loop keeps going after a short pause.
    async fn handle_accept_error(e: std::io::Error) {
        error!("Failed to accept connection: {e}");
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    }

    /// Bind the configured address and serve until Ctrl+C.
    pub async fn start(&self) -> Result<(), Error> {
        self.display_server_info();
        let listener = self.setup_listener().await?;
        self.serve(listener).await
    }

    /// Serve connections from an already bound listener until Ctrl+C.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), Error> {
        let shutdown = signal::ctrl_c();
        tokio::pin!(shutdown);
        let mut signal_available = true;

        loop {
            tokio::select! {
                result = &mut shutdown, if signal_available => {
                    match result {
                        Ok(()) => {
                            info!("Received Ctrl+C, shutting down");
                            break;
                        }
                        Err(e) => {
                            error!("Error setting up Ctrl+C handler: {e}");
                            signal_available = false;
                        }
                    }
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((mut socket, addr)) => {
                            info!("Handle connection from {addr}");
                            if let Err(e) = Self::handle_connection(&mut socket, &self.config).await {
                                error!("Error handling connection from {addr}: {e}");
                            }
                        }
                        Err(e) => Self::handle_accept_error(e).await,
                    }
                }
            }
        }

        info!("Server shutdown complete");
        Ok(())
    }

    /// Handle a single connection: one request, one response.
    ///
    /// A request line that cannot be parsed ends the connection without a
    /// response.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        config: &ServerConfig,
    ) -> Result<(), Error> {
        let request = {
            let mut reader = BufReader::new(&mut *socket);
            read_request(&mut reader, config.domain.as_deref()).await?
        };

        let response = route(&request, &config.working_directory).await;
        write_response(socket, &response).await?;
        info!(
            "{method} {path} -> {code} {reason}",
            method = request.method,
            path = request.path,
            code = response.status.as_u16(),
            reason = response.status.reason_phrase()
        );

        socket.shutdown().await?;
        Ok(())
    }
}
