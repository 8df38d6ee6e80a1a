//! Request routing.

use std::path::Path;

use log::{debug, warn};

use crate::parser::{HttpRequest, Method};
use crate::server::handlers;
use crate::server::response::{HttpResponse, StatusCode};

/// Dispatch `request` to the filesystem action for its verb.
///
/// A domain mismatch short-circuits to `400 Bad Request` before any
/// handler runs. Verbs other than GET, POST, PUT and DELETE are answered
/// with an empty `200 OK`.
pub async fn route(request: &HttpRequest, working_directory: &Path) -> HttpResponse {
    if request.wrong_domain {
        warn!(
            "Rejecting {method} {path}: Host does not match the server domain",
            method = request.method,
            path = request.path
        );
        return HttpResponse::new(StatusCode::BadRequest);
    }

    match &request.method {
        Method::GET => handlers::fetch(working_directory, request).await,
        Method::POST => handlers::create(working_directory, request).await,
        Method::PUT => handlers::replace(working_directory, request).await,
        Method::DELETE => handlers::remove(working_directory, request).await,
        Method::Other(verb) => {
            debug!("No action for verb {verb}, answering with an empty response");
            HttpResponse::default()
        }
    }
}
