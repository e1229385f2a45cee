//! HTTP response building module
//!
//! [`ResponseDocument`] is the complete answer a handler produces. It can be
//! written out raw (status line, headers, body) for CGI mode, or converted
//! into a hyper response for serve mode.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=UTF-8";

/// Status, content type and body of one handler response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseDocument {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
}

impl ResponseDocument {
    /// HTML document with the given status
    pub const fn html(status: StatusCode, body: String) -> Self {
        Self {
            status,
            content_type: HTML_CONTENT_TYPE,
            body,
        }
    }

    /// Byte length of the UTF-8 encoded body
    pub fn content_length(&self) -> usize {
        self.body.len()
    }

    /// `HTTP/1.1 404 Not Found`
    pub fn status_line(&self) -> String {
        format!(
            "HTTP/1.1 {} {}",
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or("Unknown")
        )
    }

    /// Serialize as a raw HTTP response: status line, `Content-Type`,
    /// `Content-Length`, blank line, body
    pub fn to_wire(&self) -> Vec<u8> {
        let head = format!(
            "{}\r\nContent-Type: {}\r\nContent-Length: {}\r\n\r\n",
            self.status_line(),
            self.content_type,
            self.content_length()
        );
        let mut out = Vec::with_capacity(head.len() + self.body.len());
        out.extend_from_slice(head.as_bytes());
        out.extend_from_slice(self.body.as_bytes());
        out
    }

    /// Convert into a hyper response carrying the `Server` header
    pub fn into_response(self, server_name: &str) -> Response<Full<Bytes>> {
        let status = self.status;
        Response::builder()
            .status(status)
            .header("Content-Type", self.content_type)
            .header("Content-Length", self.content_length())
            .header("Server", server_name)
            .body(Full::new(Bytes::from(self.body)))
            .unwrap_or_else(|e| {
                log_build_error(status.as_str(), &e);
                Response::new(Full::new(Bytes::new()))
            })
    }
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(413)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("413 Payload Too Large")))
        .unwrap_or_else(|e| {
            log_build_error("413", &e);
            Response::new(Full::new(Bytes::from("413 Payload Too Large")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
