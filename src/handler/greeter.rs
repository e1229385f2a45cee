//! Greeting page handler
//!
//! Never fails: a missing or rejected `name` degrades to `Guest`.

use super::pages;
use super::request::CgiRequest;
use crate::http::ResponseDocument;
use crate::sanitize::SanitizedName;
use hyper::StatusCode;

/// Render the greeting for the request's `name` query parameter
pub fn handle(request: &CgiRequest) -> ResponseDocument {
    let fields = request.query_fields();
    let name = SanitizedName::new(fields.get("name"));
    ResponseDocument::html(StatusCode::OK, pages::greeting(name.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::Method;

    fn greet(query: &str) -> ResponseDocument {
        handle(&CgiRequest::new(Method::GET, query))
    }

    #[test]
    fn test_greets_whitelisted_name() {
        let doc = greet("name=Mary-Jane+O%27Neil");
        assert_eq!(doc.status, StatusCode::OK);
        assert!(doc.body.contains("Hello, Mary-Jane O&#x27;Neil!"));
    }

    #[test]
    fn test_script_injection_falls_back_to_guest() {
        let doc = greet("name=%3Cscript%3Ealert(1)%3C%2Fscript%3E");
        assert_eq!(doc.status, StatusCode::OK);
        assert!(doc.body.contains("Hello, Guest!"));
        assert!(!doc.body.contains("<script>"));
    }

    #[test]
    fn test_missing_name_is_guest() {
        assert!(greet("").body.contains("Hello, Guest!"));
        assert!(greet("other=1").body.contains("Hello, Guest!"));
        assert!(greet("name=").body.contains("Hello, Guest!"));
    }

    #[test]
    fn test_long_name_truncated_to_fifty() {
        let query = format!("name={}", "x".repeat(70));
        let doc = greet(&query);
        assert!(doc.body.contains(&format!("Hello, {}!", "x".repeat(50))));
        assert!(!doc.body.contains(&"x".repeat(51)));
    }

    #[test]
    fn test_content_length_matches_body_bytes() {
        let doc = greet("name=Zo%C3%AB");
        assert!(doc.body.contains("Hello, Zoë!"));
        let wire = doc.to_wire();
        let header = format!("Content-Length: {}\r\n", doc.body.len());
        assert!(String::from_utf8_lossy(&wire).contains(&header));
        assert!(wire.ends_with(doc.body.as_bytes()));
    }
}
