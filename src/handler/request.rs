//! Per-invocation request data
//!
//! A [`CgiRequest`] is what both handlers consume, whether it was assembled
//! from CGI environment variables and stdin or from a hyper request.

use crate::http::FormFields;
use futures::executor::block_on;
use hyper::Method;
use std::env;
use std::io::{self, Read};

#[derive(Debug, Clone)]
pub struct CgiRequest {
    pub method: Method,
    /// Raw query string without the leading `?`
    pub query: String,
    /// Fields decoded from the request body
    pub form: FormFields,
}

impl CgiRequest {
    pub fn new(method: Method, query: impl Into<String>) -> Self {
        Self {
            method,
            query: query.into(),
            form: FormFields::default(),
        }
    }

    #[must_use]
    pub fn with_form(mut self, form: FormFields) -> Self {
        self.form = form;
        self
    }

    /// Assemble the request from the CGI environment
    ///
    /// `REQUEST_METHOD` defaults to GET. For POST, up to `CONTENT_LENGTH`
    /// bytes are read from `input` and decoded per `CONTENT_TYPE`.
    pub fn from_env(input: impl Read) -> io::Result<Self> {
        let method = env_string("REQUEST_METHOD")
            .and_then(|m| Method::from_bytes(m.as_bytes()).ok())
            .unwrap_or(Method::GET);
        let query = env_string("QUERY_STRING").unwrap_or_default();

        let mut request = Self::new(method, query);
        if request.method == Method::POST {
            let content_type = env_string("CONTENT_TYPE").filter(|ct| !ct.is_empty());
            let body = read_body(input, env_string("CONTENT_LENGTH").as_deref())?;
            let form = block_on(FormFields::from_body(content_type.as_deref(), body.into()))
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            request = request.with_form(form);
        }
        Ok(request)
    }

    /// Fields decoded from the query string
    pub fn query_fields(&self) -> FormFields {
        FormFields::parse(self.query.as_bytes())
    }

    /// Query string fields overlaid with the body fields
    pub fn form_fields(&self) -> FormFields {
        let mut fields = self.query_fields();
        fields.merge(self.form.clone());
        fields
    }
}

/// Read a CGI variable, replacing bytes that are not UTF-8
fn env_string(key: &str) -> Option<String> {
    env::var_os(key).map(|value| value.to_string_lossy().into_owned())
}

/// Read exactly the declared number of body bytes (or fewer on early EOF)
fn read_body(input: impl Read, content_length: Option<&str>) -> io::Result<Vec<u8>> {
    let Some(raw) = content_length.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(Vec::new());
    };
    let length: u64 = raw.parse().map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid CONTENT_LENGTH '{raw}'"),
        )
    })?;

    let mut body = Vec::new();
    input.take(length).read_to_end(&mut body)?;
    Ok(body)
}
