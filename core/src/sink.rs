//! The writer side of an HTTP response.

use http::{header::CONTENT_TYPE, HeaderMap, StatusCode};
use tracing::warn;

use crate::ContentType;

/// Where renderers write headers, the status line and body bytes, in that order.
///
/// Headers mutated after the status has been written are not guaranteed to reach the
/// client; implementations backed by a real connection are free to ignore them.
pub trait ResponseSink {
    /// Headers collected so far.
    fn headers(&self) -> &HeaderMap;

    /// Mutable access to the headers.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Commit the status line. Only the first call has an effect.
    fn write_status(&mut self, status: StatusCode);

    /// Append body bytes, committing `200 OK` if no status has been written yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying transport fails.
    fn write(&mut self, bytes: &[u8]) -> std::io::Result<()>;

    /// Set `Content-Type` to `content_type` unless a value is already present.
    fn ensure_content_type(&mut self, content_type: &ContentType) {
        if !self.headers().contains_key(CONTENT_TYPE) {
            self.headers_mut()
                .insert(CONTENT_TYPE, content_type.header_value());
        }
    }
}

/// An in-memory [`ResponseSink`].
///
/// Handy for tests, and for servers that want the whole response before sending it:
/// convert it with `http::Response::from(recorder)`.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Recorder {
    /// An empty recorder with no status committed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed status, if any.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Body bytes written so far.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body bytes written so far, as UTF-8 (lossy).
    #[must_use]
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Break the recorder into its parts. A missing status reads as `200 OK`.
    #[must_use]
    pub fn into_parts(self) -> (StatusCode, HeaderMap, Vec<u8>) {
        (self.status.unwrap_or(StatusCode::OK), self.headers, self.body)
    }
}

impl ResponseSink for Recorder {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_status(&mut self, status: StatusCode) {
        match self.status {
            Some(committed) if committed != status => {
                warn!(%committed, ignored = %status, "superfluous status write");
            }
            Some(_) => {}
            None => self.status = Some(status),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        if self.status.is_none() {
            self.status = Some(StatusCode::OK);
        }
        self.body.extend_from_slice(bytes);
        Ok(())
    }
}

impl From<Recorder> for http::Response<Vec<u8>> {
    fn from(recorder: Recorder) -> Self {
        let (status, headers, body) = recorder.into_parts();
        let mut response = Self::new(body);
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        response
    }
}
