//! File deletion handler
//!
//! Deletes one file from the upload directory named by the POSTed
//! `filename` field. The filename is always reduced to a sanitized basename
//! before it is joined onto the upload directory, so nothing outside that
//! directory can be touched.

use super::pages;
use super::request::CgiRequest;
use crate::config::CgiConfig;
use crate::http::ResponseDocument;
use crate::logger::{self, script_log};
use crate::sanitize::{escape_html, SanitizedFilename};
use hyper::{Method, StatusCode};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

pub const FILENAME_FIELD: &str = "filename";

/// Why a deletion did not happen. `Display` is the message shown to the
/// client and written to the script log.
#[derive(Debug, Error)]
pub enum DeleteError {
    #[error("Invalid request method")]
    InvalidMethod,
    #[error("No filename field found")]
    MissingField,
    #[error("No filename provided")]
    EmptyFilename,
    #[error("Invalid filename after sanitization")]
    InvalidFilename,
    #[error("File not found or not writable")]
    NotFound,
    #[error("Delete operation failed (server error)")]
    DeleteFailed(#[source] io::Error),
    #[error("Delete processing error: {0}")]
    Processing(String),
}

impl DeleteError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidMethod => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingField | Self::EmptyFilename | Self::InvalidFilename => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::DeleteFailed(_) | Self::Processing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Validate the request and delete the file it names
pub fn delete(request: &CgiRequest, cfg: &CgiConfig) -> Result<SanitizedFilename, DeleteError> {
    if request.method != Method::POST {
        return Err(DeleteError::InvalidMethod);
    }

    ensure_upload_dir(&cfg.upload_dir)
        .map_err(|e| DeleteError::Processing(format!("upload directory unavailable: {e}")))?;

    let fields = request.form_fields();
    let raw = fields.get(FILENAME_FIELD).ok_or(DeleteError::MissingField)?;
    if raw.is_empty() {
        return Err(DeleteError::EmptyFilename);
    }

    let filename = SanitizedFilename::new(raw).ok_or(DeleteError::InvalidFilename)?;
    let path = cfg.upload_dir.join(filename.as_str());

    if !is_writable_file(&path) {
        return Err(DeleteError::NotFound);
    }

    fs::remove_file(&path).map_err(DeleteError::DeleteFailed)?;
    Ok(filename)
}

/// Render the outcome of [`delete`], logging any error first
pub fn respond(
    outcome: &Result<SanitizedFilename, DeleteError>,
    cfg: &CgiConfig,
) -> ResponseDocument {
    let upload_page = escape_html(&cfg.upload_page);
    match outcome {
        Ok(filename) => {
            logger::log_info(&format!(
                "[Delete] Removed {}",
                cfg.upload_dir.join(filename.as_str()).display()
            ));
            ResponseDocument::html(
                StatusCode::OK,
                pages::delete_success(&escape_html(filename.as_str()), &upload_page),
            )
        }
        Err(err) => {
            let message = err.to_string();
            script_log::append(&cfg.log_file, &message);
            if let DeleteError::DeleteFailed(source) = err {
                logger::log_error(&format!("[Delete] {message}: {source}"));
            }
            ResponseDocument::html(
                err.status(),
                pages::delete_failure(&escape_html(&message), &upload_page),
            )
        }
    }
}

/// Validate, delete and render in one step
pub fn handle(request: &CgiRequest, cfg: &CgiConfig) -> ResponseDocument {
    respond(&delete(request, cfg), cfg)
}

/// Create the upload directory (mode 0755) if it does not exist yet
fn ensure_upload_dir(dir: &Path) -> io::Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(dir)
}

/// Exists and this process is allowed to write to it
fn is_writable_file(path: &Path) -> bool {
    path.exists() && can_write(path)
}

#[cfg(unix)]
fn can_write(path: &Path) -> bool {
    rustix::fs::access(path, rustix::fs::Access::WRITE_OK).is_ok()
}

#[cfg(not(unix))]
fn can_write(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| !meta.permissions().readonly())
}
