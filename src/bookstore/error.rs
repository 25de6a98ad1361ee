//! Errors reported by the bookstore client.

use serde_json::Value;

/// Longest slice of a response body kept in an error message.
const BODY_PREVIEW_LIMIT: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookstoreErrorKind {
    /// HTTP 404
    NotFound,
    /// HTTP 400, or input rejected before sending
    Validation,
    /// Server unreachable
    Connect,
    /// No response in time
    Timeout,
    /// Any other non-2xx status
    Status,
    /// Response body was not the expected JSON
    Decode,
    /// Anything else reqwest reports
    Request,
}

impl BookstoreErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation => "validation",
            Self::Connect => "connect",
            Self::Timeout => "timeout",
            Self::Status => "status",
            Self::Decode => "decode",
            Self::Request => "request",
        }
    }
}

impl std::fmt::Display for BookstoreErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct BookstoreError {
    kind: BookstoreErrorKind,
    status: Option<u16>,
    message: String,
    source: Option<reqwest::Error>,
}

impl BookstoreError {
    pub fn kind(&self) -> BookstoreErrorKind {
        self.kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: BookstoreErrorKind::Validation,
            status: None,
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            BookstoreErrorKind::Timeout
        } else if err.is_connect() {
            BookstoreErrorKind::Connect
        } else if err.is_decode() {
            BookstoreErrorKind::Decode
        } else {
            BookstoreErrorKind::Request
        };
        let message = match kind {
            BookstoreErrorKind::Timeout => "request timed out, try again later".to_string(),
            BookstoreErrorKind::Connect => "could not connect to the server, check that it is running".to_string(),
            _ => err.to_string(),
        };
        Self {
            kind,
            status: err.status().map(|s| s.as_u16()),
            message,
            source: Some(err),
        }
    }

    /// Build the error for a non-2xx response.
    pub(crate) fn from_status(status: u16, body: &str, fallback: &str) -> Self {
        let kind = match status {
            404 => BookstoreErrorKind::NotFound,
            400 => BookstoreErrorKind::Validation,
            _ => BookstoreErrorKind::Status,
        };
        let message = server_message(body).unwrap_or_else(|| match kind {
            BookstoreErrorKind::Status => format!("server returned {}: {}", status, preview_body(body)),
            _ => fallback.to_string(),
        });
        Self {
            kind,
            status: Some(status),
            message,
            source: None,
        }
    }

    pub(crate) fn decode(status: u16, err: serde_json::Error, body: &str) -> Self {
        Self {
            kind: BookstoreErrorKind::Decode,
            status: Some(status),
            message: format!("invalid response from server: {} | body={}", err, preview_body(body)),
            source: None,
        }
    }
}

impl std::fmt::Display for BookstoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            BookstoreErrorKind::NotFound | BookstoreErrorKind::Validation => write!(f, "{}", self.message),
            _ => {
                write!(f, "{} error", self.kind)?;
                if let Some(status) = self.status {
                    write!(f, " ({})", status)?;
                }
                write!(f, ": {}", self.message)
            }
        }
    }
}

impl std::error::Error for BookstoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Pull `description` or `error` out of a JSON error body.
fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["description", "error", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    if trimmed.chars().count() > BODY_PREVIEW_LIMIT {
        out.push_str("...");
    }
    out
}
