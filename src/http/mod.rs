//! HTTP protocol layer module
//!
//! Response documents and form decoding shared by both run modes.

pub mod form;
pub mod response;

// Re-export commonly used types
pub use form::FormFields;
pub use response::{build_404_response, build_413_response, ResponseDocument};
