//! Filesystem actions behind each verb.
//!
//! Resource-state problems (missing path, existing path, unexpected
//! directory) become error statuses. I/O failures while acting on an
//! otherwise valid request are logged and answered with an empty `200 OK`.
//!
//! Existence checks and the subsequent write or delete are separate
//! filesystem calls, so a concurrent external change can slip between them.

use std::io;
use std::path::{Component, Path, PathBuf};

use log::{error, info, warn};
use tokio::fs::{self, DirBuilder, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::parser::HttpRequest;
use crate::server::listing::list_directory;
use crate::server::response::{HttpResponse, StatusCode};

/// Mode bits for created files and directories, before the umask.
#[cfg(unix)]
const PERMISSIVE_MODE: u32 = 0o777;

/// Resolve a request path under the working directory.
///
/// Leading slashes are dropped so absolute-looking request paths stay
/// under the root, then the joined path is cleaned lexically. `..`
/// segments are not rejected and may climb out of the root.
pub fn resolve_path(working_directory: &Path, request_path: &str) -> PathBuf {
    clean_path(&working_directory.join(request_path.trim_start_matches('/')))
}

/// Lexically normalise `path`: drop `.` segments, repeated and trailing
/// separators, and collapse `name/..` pairs. Leading `..` segments of a
/// relative path are kept; `..` directly under the root is dropped.
fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

fn not_found(path: &Path) -> HttpResponse {
    HttpResponse::new(StatusCode::NotFound)
        .with_body_string(format!("File {path} not found", path = path.display()))
}

fn is_a_directory(status: StatusCode, path: &Path) -> HttpResponse {
    HttpResponse::new(status)
        .with_body_string(format!("File {path} is a directory", path = path.display()))
}

async fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(PERMISSIVE_MODE);

    let mut file = options.open(path).await?;
    file.write_all(contents).await?;
    file.flush().await
}

async fn create_dir(path: &Path) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    #[cfg(unix)]
    builder.mode(PERMISSIVE_MODE);
    builder.create(path).await
}

/// GET: return a file's contents or a directory listing.
pub async fn fetch(working_directory: &Path, request: &HttpRequest) -> HttpResponse {
    let path = resolve_path(working_directory, &request.path);

    let metadata = match fs::metadata(&path).await {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!("Error while getting file {path}: {e}", path = path.display());
            return not_found(&path);
        }
    };

    if metadata.is_dir() {
        return match list_directory(&path).await {
            Ok(listing) => HttpResponse::new(StatusCode::Ok).with_body_bytes(listing),
            Err(e) => {
                error!("Error listing directory {path}: {e}", path = path.display());
                HttpResponse::default()
            }
        };
    }

    match fs::read(&path).await {
        Ok(contents) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            HttpResponse::new(StatusCode::Ok)
                .with_content_type(mime.essence_str())
                .with_body_bytes(contents)
        }
        Err(e) => {
            error!("Error while reading file {path}: {e}", path = path.display());
            HttpResponse::default()
        }
    }
}

/// POST: create a new file from the body, or a directory when requested.
pub async fn create(working_directory: &Path, request: &HttpRequest) -> HttpResponse {
    let path = resolve_path(working_directory, &request.path);

    if fs::metadata(&path).await.is_ok() {
        return HttpResponse::new(StatusCode::Conflict)
            .with_body_string(format!("File {path} already exists", path = path.display()));
    }

    if request.create_directory {
        match create_dir(&path).await {
            Ok(()) => info!("Created directory {path}", path = path.display()),
            Err(e) => error!("Error while creating directory {path}: {e}", path = path.display()),
        }
        return HttpResponse::default();
    }

    match write_file(&path, &request.body).await {
        Ok(()) => info!(
            "Created file {path} ({len} bytes)",
            path = path.display(),
            len = request.body.len()
        ),
        Err(e) => error!("Error while creating file {path}: {e}", path = path.display()),
    }
    HttpResponse::default()
}

/// PUT: overwrite an existing regular file with the body.
pub async fn replace(working_directory: &Path, request: &HttpRequest) -> HttpResponse {
    let path = resolve_path(working_directory, &request.path);

    let metadata = match fs::metadata(&path).await {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!("Error while putting file {path}: {e}", path = path.display());
            return not_found(&path);
        }
    };

    if metadata.is_dir() {
        return is_a_directory(StatusCode::Conflict, &path);
    }

    match write_file(&path, &request.body).await {
        Ok(()) => info!(
            "Replaced file {path} ({len} bytes)",
            path = path.display(),
            len = request.body.len()
        ),
        Err(e) => error!("Error while writing to file {path}: {e}", path = path.display()),
    }
    HttpResponse::default()
}

/// DELETE: remove a file, or a whole directory tree when explicitly asked to.
pub async fn remove(working_directory: &Path, request: &HttpRequest) -> HttpResponse {
    let path = resolve_path(working_directory, &request.path);

    let metadata = match fs::metadata(&path).await {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!("Error while deleting file {path}: {e}", path = path.display());
            return not_found(&path);
        }
    };

    if metadata.is_dir() {
        if !request.remove_directory {
            return is_a_directory(StatusCode::NotAcceptable, &path);
        }

        match fs::remove_dir_all(&path).await {
            Ok(()) => info!("Removed directory {path}", path = path.display()),
            Err(e) => error!("Error while removing directory {path}: {e}", path = path.display()),
        }
        return HttpResponse::default();
    }

    match fs::remove_file(&path).await {
        Ok(()) => info!("Removed file {path}", path = path.display()),
        Err(e) => error!("Error while removing file {path}: {e}", path = path.display()),
    }
    HttpResponse::default()
}
