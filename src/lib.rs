//! A minimal HTTP/1.1 file-access gateway.
//!
//! Each connection carries exactly one request. The request is read off
//! the stream, mapped to a filesystem action under a configured working
//! directory and answered with a fixed-shape response before the
//! connection is closed.
//!
//! # Protocol
//!
//! | Verb     | Action                                                        |
//! |----------|---------------------------------------------------------------|
//! | `GET`    | Read a file, or list a directory                              |
//! | `POST`   | Create a file from the body, or a directory with `Create-Directory: True` |
//! | `PUT`    | Overwrite an existing file                                    |
//! | `DELETE` | Remove a file, or a directory tree with `Remove-Directory: True` |
//!
//! Other verbs are answered with an empty `200 OK`.
//!
//! # Examples
//!
//! ## Reading a request
//!
//! ```
//! use filegate::{read_request, Method};
//!
//! # tokio_test_block_on(async {
//! let mut wire: &[u8] = b"POST /notes.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
//! let request = read_request(&mut wire, None).await.unwrap();
//!
//! assert_eq!(request.method, Method::POST);
//! assert_eq!(request.path, "/notes.txt");
//! assert_eq!(request.body, b"hello");
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```
//!
//! ## Serving a directory
//!
//! ```no_run
//! use filegate::{HttpServer, ServerConfig};
//!
//! # async fn run() -> Result<(), filegate::ServerError> {
//! let config = ServerConfig::new("/srv/files").with_domain("files.local");
//! config.validate()?;
//! HttpServer::new(config).start().await?;
//! # Ok(())
//! # }
//! ```

// Export the request reader module
pub mod parser;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{Error as ParserError, HttpRequest, Method, read_request};
pub use server::{Error as ServerError, HttpResponse, HttpServer, ServerConfig, StatusCode};
