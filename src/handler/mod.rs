//! Request handler module
//!
//! The greeter and deleter are plain functions from a [`CgiRequest`] to a
//! [`crate::http::ResponseDocument`]. The router adapts them to hyper for
//! serve mode; `main` feeds them the CGI environment directly.

pub mod deleter;
pub mod greeter;
mod pages;
pub mod request;
pub mod router;

// Re-export main entry point
pub use request::CgiRequest;
pub use router::handle_request;
