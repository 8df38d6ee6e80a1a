//! Gateway server for filegate.
//!
//! This module routes each parsed request to a filesystem action rooted at
//! the configured working directory and writes the result back to the
//! connection.

mod response;
mod config;
mod error;
mod handlers;
mod listing;
mod router;
mod http_server;

// Re-export public items
pub use response::{HttpResponse, StatusCode, SERVER_NAME, write_response};
pub use config::ServerConfig;
pub use error::Error;
pub use handlers::{create, fetch, remove, replace, resolve_path};
pub use listing::list_directory;
pub use router::route;
pub use http_server::HttpServer;
