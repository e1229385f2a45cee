//! Request routing dispatch module
//!
//! Serve-mode entry point: maps the configured paths onto the greeter and
//! deleter, enforces the body size limit and writes the access log.

use super::deleter::{self, DeleteError};
use super::greeter;
use super::request::CgiRequest;
use crate::config::Config;
use crate::http::{self, FormFields, ResponseDocument};
use crate::logger::{self, AccessLogEntry};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE, REFERER, USER_AGENT};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::error::Error as StdError;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    config: Arc<Config>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    let started = Instant::now();
    let mut entry = AccessLogEntry::new(
        remote_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.referer = header_value(&req, REFERER.as_str());
    entry.user_agent = header_value(&req, USER_AGENT.as_str());

    let response = route_request(req, &config).await;

    if config.logging.access_log {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on path and configuration
async fn route_request<B>(req: Request<B>, config: &Config) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    let path = req.uri().path();

    if path == config.routes.greeter_path {
        let query = req.uri().query().unwrap_or_default();
        let request = CgiRequest::new(req.method().clone(), query);
        return greeter::handle(&request).into_response(&config.http.server_name);
    }

    if path == config.routes.deleter_path {
        return serve_deleter(req, config).await;
    }

    http::build_404_response()
}

/// Collect the form body (POST only) and run the deleter
async fn serve_deleter<B>(req: Request<B>, config: &Config) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    let method = req.method().clone();
    let query = req.uri().query().unwrap_or_default().to_string();
    let mut request = CgiRequest::new(method.clone(), query);

    if method == Method::POST {
        if let Some(resp) = check_body_size(&req, config.http.max_body_size) {
            return resp;
        }

        let content_type = header_value(&req, CONTENT_TYPE.as_str());
        let limit = usize::try_from(config.http.max_body_size).unwrap_or(usize::MAX);
        let body = match Limited::new(req.into_body(), limit).collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) if e.is::<LengthLimitError>() => {
                logger::log_warning(&format!("Request body exceeded {limit} bytes"));
                return http::build_413_response();
            }
            Err(e) => return processing_error(&e.to_string(), config),
        };

        match FormFields::from_body(content_type.as_deref(), body).await {
            Ok(form) => request = request.with_form(form),
            Err(e) => return processing_error(&e.to_string(), config),
        }
    }

    let doc: ResponseDocument = deleter::handle(&request, &config.cgi);
    doc.into_response(&config.http.server_name)
}

fn processing_error(detail: &str, config: &Config) -> Response<Full<Bytes>> {
    let outcome = Err(DeleteError::Processing(detail.to_string()));
    deleter::respond(&outcome, &config.cgi).into_response(&config.http.server_name)
}

/// Reject a declared Content-Length above the limit before reading the body
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let size_str = header_value(req, CONTENT_LENGTH.as_str())?;
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_error(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
        _ => None,
    }
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CgiConfig;
    use hyper::StatusCode;
    use std::fs;

    fn test_config(root: &std::path::Path) -> Arc<Config> {
        let mut config = Config::load_from("does-not-exist/config").unwrap();
        config.logging.access_log = false;
        config.http.max_body_size = 64;
        config.cgi = CgiConfig {
            upload_dir: root.join("uploads"),
            log_file: root.join("script.log"),
            upload_page: "upload.py".to_string(),
        };
        Arc::new(config)
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn form_post(path: &str, body: &'static str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(CONTENT_LENGTH, body.len())
            .body(Full::new(Bytes::from(body)))
            .unwrap()
    }

    #[tokio::test]
    async fn test_greeter_route() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let req = Request::builder()
            .uri("/cgi-bin/greet?name=Ada+Lovelace")
            .body(Full::new(Bytes::new()))
            .unwrap();

        let resp = handle_request(req, config, peer()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/html; charset=UTF-8");
        let declared: usize = resp.headers()[CONTENT_LENGTH]
            .to_str()
            .unwrap()
            .parse()
            .unwrap();
        let body = body_string(resp).await;
        assert_eq!(declared, body.len());
        assert!(body.contains("Hello, Ada Lovelace!"));
    }

    #[tokio::test]
    async fn test_deleter_route_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        fs::create_dir_all(&config.cgi.upload_dir).unwrap();
        let target = config.cgi.upload_dir.join("report.txt");
        fs::write(&target, b"data").unwrap();

        let req = form_post("/cgi-bin/delete", "filename=report.txt");
        let resp = handle_request(req, config, peer()).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_string(resp).await.contains("report.txt"));
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_deleter_route_accepts_multipart() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        fs::create_dir_all(&config.cgi.upload_dir).unwrap();
        let target = config.cgi.upload_dir.join("a.txt");
        fs::write(&target, b"data").unwrap();

        let body = "--b1\r\n\
                    Content-Disposition: form-data; name=\"filename\"\r\n\r\n\
                    a.txt\r\n--b1--\r\n";
        let req = Request::builder()
            .method(Method::POST)
            .uri("/cgi-bin/delete")
            .header(CONTENT_TYPE, "multipart/form-data; boundary=b1")
            .body(Full::new(Bytes::from(body)))
            .unwrap();

        let resp = handle_request(req, config, peer()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_deleter_route_reads_query_on_post() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        fs::create_dir_all(&config.cgi.upload_dir).unwrap();
        let target = config.cgi.upload_dir.join("report.txt");
        fs::write(&target, b"data").unwrap();

        let req = form_post("/cgi-bin/delete?filename=report.txt", "");
        let resp = handle_request(req, config, peer()).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_deleter_route_malformed_multipart_is_500() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let req = Request::builder()
            .method(Method::POST)
            .uri("/cgi-bin/delete")
            .header(CONTENT_TYPE, "multipart/form-data")
            .body(Full::new(Bytes::from_static(b"filename=a.txt")))
            .unwrap();

        let resp = handle_request(req, config, peer()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_string(resp).await.contains("Delete processing error"));
    }

    #[tokio::test]
    async fn test_deleter_route_rejects_get() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let req = Request::builder()
            .uri("/cgi-bin/delete?filename=report.txt")
            .body(Full::new(Bytes::new()))
            .unwrap();

        let resp = handle_request(req, Arc::clone(&config), peer()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(body_string(resp).await.contains("Invalid request method"));
        assert!(!config.cgi.upload_dir.exists());
    }

    #[tokio::test]
    async fn test_oversized_body_is_413() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        // 79 bytes against a 64 byte limit
        let body = "filename=aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa.txt";
        let req = form_post("/cgi-bin/delete", body);

        let resp = handle_request(req, config, peer()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_oversized_body_without_length_is_413() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let req = Request::builder()
            .method(Method::POST)
            .uri("/cgi-bin/delete")
            .body(Full::new(Bytes::from(vec![b'a'; 128])))
            .unwrap();

        let resp = handle_request(req, config, peer()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let req = Request::builder()
            .uri("/index.html")
            .body(Full::new(Bytes::new()))
            .unwrap();

        let resp = handle_request(req, config, peer()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
