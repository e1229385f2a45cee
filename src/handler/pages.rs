//! HTML page templates
//!
//! Every value interpolated here must already be HTML-escaped.

const HEAD_LINKS: &str = r#"	<link rel="stylesheet" href="/styles.css" />
	<link rel="icon" type="image/x-icon" href="/favicon.png">"#;

const FLOATING_ELEMENTS: &str = r#"	<div class="floating-elements">
		<div class="floating-element"></div>
		<div class="floating-element"></div>
		<div class="floating-element"></div>
	</div>"#;

fn document_start(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
	<meta charset="UTF-8" />
	<meta name="viewport" content="width=device-width, initial-scale=1" />
	<title>{title}</title>
{HEAD_LINKS}
</head>
<body>
{FLOATING_ELEMENTS}

	<div class="container">"#
    )
}

/// Greeting page for an already escaped name
pub fn greeting(escaped_name: &str) -> String {
    let mut html = document_start("Greeting");
    html.push_str(&format!(
        r#"
		<h1 class="title">Hello, {escaped_name}!</h1>
		<p class="subtitle">Nice to meet you and welcome to WhateverX :)</p>

		<div class="form-row" style="justify-content: center; margin-top: 40px;">
			<a href="/index.html" class="button">Back to Home</a>
		</div>
	</div>
</body>
</html>"#
    ));
    html
}

/// Confirmation page after a successful deletion
pub fn delete_success(escaped_filename: &str, escaped_upload_page: &str) -> String {
    let mut html = document_start("File Deleted");
    html.push_str(&format!(
        r#"
		<div style="font-size: 3rem; margin-bottom: 1rem;">🗑️</div>
		<h1 class="title">File "{escaped_filename}" successfully deleted!</h1>
		<p class="subtitle">The file has been removed from the server</p>"#
    ));
    html.push_str(&back_to_upload(escaped_upload_page));
    html
}

/// Error page for a failed deletion
pub fn delete_failure(escaped_message: &str, escaped_upload_page: &str) -> String {
    let mut html = document_start("Delete Error");
    html.push_str(&format!(
        r#"
		<div style="font-size: 3rem; margin-bottom: 1rem;">❌</div>
		<h1 class="title">Deletion Failed</h1>
		<p class="subtitle">{escaped_message}</p>"#
    ));
    html.push_str(&back_to_upload(escaped_upload_page));
    html
}

fn back_to_upload(escaped_upload_page: &str) -> String {
    format!(
        r#"
		<div style="margin-top: 2rem;">
			<form method="POST" action="{escaped_upload_page}" style="display: inline;">
				<button type="submit" name="back" value="1" class="button">← Back to Upload</button>
			</form>
		</div>
	</div>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_embeds_name() {
        let html = greeting("Ann");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Greeting</title>"));
        assert!(html.contains(r#"<h1 class="title">Hello, Ann!</h1>"#));
        assert!(html.contains(r#"href="/index.html""#));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn test_delete_pages_link_back_to_upload() {
        let ok = delete_success("a.txt", "upload.py");
        assert!(ok.contains("<title>File Deleted</title>"));
        assert!(ok.contains(r#"File "a.txt" successfully deleted!"#));
        assert!(ok.contains(r#"action="upload.py""#));

        let err = delete_failure("Invalid request method", "upload.py");
        assert!(err.contains("<title>Delete Error</title>"));
        assert!(err.contains("<p class=\"subtitle\">Invalid request method</p>"));
        assert!(err.contains(r#"action="upload.py""#));
        assert!(err.ends_with("</html>"));
    }
}
