//! Per-unit error taxonomy shared by both pipelines
//!
//! Every variant here is non-fatal to a batch: the executor converts it
//! into a `Failure` outcome for the one identity it belongs to. Fatal
//! configuration errors (unreadable spreadsheet, missing input directory)
//! are `anyhow` errors at the runner boundary instead and never appear
//! in this enum.

/// Error from processing a single work unit (download or extraction).
#[derive(Debug)]
pub enum UnitError {
    /// HTTP failure: timeout, connection error, or non-2xx status.
    Network {
        status: Option<u16>,
        message: String,
    },
    /// URL path does not look like a PDF — rejected before any network call.
    NotADocument { url: String },
    /// LLM response could not be parsed as the expected JSON structure.
    MalformedResponse { body: String },
    /// HTTP 429 from the hosted backend. Retried a bounded number of
    /// times, then surfaced as a per-unit failure.
    RateLimited { message: String },
    /// File stem is not a numeric identity.
    InvalidIdentity { name: String },
    /// PDF text extraction failed or yielded no text.
    Pdf { message: String },
    /// Local I/O failure while writing a downloaded file.
    Io(std::io::Error),
}

impl std::fmt::Display for UnitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network {
                status: Some(s),
                message,
            } => write!(f, "HTTP {s}: {message}"),
            Self::Network {
                status: None,
                message,
            } => write!(f, "HTTP error: {message}"),
            Self::NotADocument { url } => write!(f, "not a PDF link: {url}"),
            Self::MalformedResponse { body } => {
                write!(f, "unparseable LLM response: {body}")
            }
            Self::RateLimited { message } => write!(f, "rate limited: {message}"),
            Self::InvalidIdentity { name } => {
                write!(f, "file stem is not a row number: {name}")
            }
            Self::Pdf { message } => write!(f, "PDF extraction: {message}"),
            Self::Io(e) => write!(f, "IO: {e}"),
        }
    }
}

impl std::error::Error for UnitError {}

impl From<std::io::Error> for UnitError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl UnitError {
    /// Map a reqwest error, classifying HTTP 429 as a rate-limit signal.
    pub fn from_reqwest(e: &reqwest::Error) -> Self {
        let status = e.status().map(|s| s.as_u16());
        if status == Some(429) {
            Self::RateLimited {
                message: e.to_string(),
            }
        } else {
            Self::Network {
                status,
                message: e.to_string(),
            }
        }
    }

    /// Whether the bounded constant-interval retry applies.
    ///
    /// Only rate-limit signals from the hosted backend are retried; all
    /// other errors fail the unit on the first attempt.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_is_retryable() {
        let err = UnitError::RateLimited {
            message: "429".to_string(),
        };
        assert!(err.is_rate_limited());
    }

    #[test]
    fn network_is_not_retryable() {
        let err = UnitError::Network {
            status: Some(500),
            message: "server error".to_string(),
        };
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn not_a_document_is_not_retryable() {
        let err = UnitError::NotADocument {
            url: "https://example.com/page".to_string(),
        };
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn display_network_with_status() {
        let err = UnitError::Network {
            status: Some(404),
            message: "not found".to_string(),
        };
        assert_eq!(format!("{err}"), "HTTP 404: not found");
    }

    #[test]
    fn display_network_without_status() {
        let err = UnitError::Network {
            status: None,
            message: "connection refused".to_string(),
        };
        assert_eq!(format!("{err}"), "HTTP error: connection refused");
    }

    #[test]
    fn display_invalid_identity() {
        let err = UnitError::InvalidIdentity {
            name: "resume_final".to_string(),
        };
        assert!(format!("{err}").contains("resume_final"));
    }

    #[test]
    fn io_error_converts() {
        let err: UnitError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, UnitError::Io(_)));
    }
}
