use thiserror::Error;

/// Errors surfaced by backend adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Non-2xx response. The body text is preserved because signup error
    /// messages arrive as plain text.
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },

    /// The backend could not be reached at all: no connection, or the
    /// request timed out before a response arrived.
    #[error("backend unreachable")]
    Offline,

    /// Any other failure from the HTTP client, JSON decoding included.
    #[error(transparent)]
    Http(reqwest::Error),

    #[error("invalid API base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::Offline
        } else {
            Self::Http(err)
        }
    }
}

impl ApiError {
    /// The HTTP status, when the backend answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            Self::Offline | Self::InvalidBaseUrl(_) => None,
        }
    }

    /// True for 401/403 responses, which the session layer treats as an
    /// invalid or expired identity.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// User-facing message: the server's own text when it sent one,
    /// otherwise a status-derived line.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Status { status, body } => {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    format!("Request failed with status {status}")
                } else {
                    trimmed.to_string()
                }
            }
            Self::Offline | Self::Http(_) => "Network error. Please try again.".to_string(),
            Self::InvalidBaseUrl(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_prefers_server_body() {
        let err = ApiError::Status {
            status: 409,
            body: "Email already registered".into(),
        };
        assert_eq!(err.message(), "Email already registered");
    }

    #[test]
    fn empty_body_falls_back_to_status_line() {
        let err = ApiError::Status {
            status: 500,
            body: "  ".into(),
        };
        assert_eq!(err.message(), "Request failed with status 500");
    }

    #[test]
    fn offline_has_no_status_and_a_generic_message() {
        let err = ApiError::Offline;
        assert_eq!(err.status(), None);
        assert!(!err.is_unauthorized());
        assert_eq!(err.message(), "Network error. Please try again.");
    }

    #[test]
    fn unauthorized_detection() {
        let unauthorized = ApiError::Status {
            status: 401,
            body: String::new(),
        };
        let conflict = ApiError::Status {
            status: 409,
            body: String::new(),
        };
        assert!(unauthorized.is_unauthorized());
        assert!(!conflict.is_unauthorized());
    }
}
