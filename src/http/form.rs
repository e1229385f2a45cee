//! Form field decoding
//!
//! Query strings and `application/x-www-form-urlencoded` bodies share one
//! decoder; `multipart/form-data` bodies go through `multer`. Repeated keys
//! keep the last value.

use hyper::body::Bytes;
use std::collections::HashMap;
use std::convert::Infallible;

pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Decoded form fields
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    /// Decode `key=value&...` pairs (`+` as space, percent escapes)
    pub fn parse(input: &[u8]) -> Self {
        Self(
            url::form_urlencoded::parse(input)
                .into_owned()
                .collect(),
        )
    }

    /// Decode a request body, honouring its content type
    ///
    /// A missing content type is treated as urlencoded, matching what
    /// browsers send for plain forms. Other content types carry no fields.
    pub async fn from_body(content_type: Option<&str>, body: Bytes) -> Result<Self, multer::Error> {
        match content_type {
            None => Ok(Self::parse(&body)),
            Some(ct) if mime_is(ct, FORM_URLENCODED) => Ok(Self::parse(&body)),
            Some(ct) if mime_is(ct, MULTIPART_FORM_DATA) => Self::from_multipart(ct, body).await,
            Some(_) => Ok(Self::default()),
        }
    }

    /// Text parts of a multipart body; uploaded file parts are skipped
    async fn from_multipart(content_type: &str, body: Bytes) -> Result<Self, multer::Error> {
        let boundary = multer::parse_boundary(content_type)?;
        let stream = futures::stream::once(async move { Ok::<_, Infallible>(body) });
        let mut multipart = multer::Multipart::new(stream, boundary);

        let mut fields = HashMap::new();
        while let Some(field) = multipart.next_field().await? {
            if field.file_name().is_some() {
                continue;
            }
            let Some(name) = field.name().map(ToString::to_string) else {
                continue;
            };
            let value = field.text().await?;
            fields.insert(name, value);
        }
        Ok(Self(fields))
    }

    /// Overlay `other` onto these fields; its values win on conflict
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

fn mime_is(content_type: &str, expected: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(expected))
}
