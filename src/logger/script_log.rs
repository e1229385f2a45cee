//! Best-effort script error log
//!
//! One line per error: `<ISO-8601 timestamp> <message>`. Failures to open or
//! write the file are dropped; the caller's response never depends on them.

use super::writer::open_log_file;
use chrono::Local;
use std::io::Write;
use std::path::Path;

/// Timestamp layout, e.g. `2025-08-23T23:43:00.123456`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Append `message` to the log at `path`, ignoring any I/O error
pub fn append(path: &Path, message: &str) {
    if message.is_empty() {
        return;
    }

    let line = format!("{} {message}\n", Local::now().format(TIMESTAMP_FORMAT));
    if let Ok(mut file) = open_log_file(path) {
        let _ = file.write_all(line.as_bytes());
    }
}
