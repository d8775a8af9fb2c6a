use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// What we show when the server doesn't tell us what went wrong.
pub const FALLBACK_MESSAGE: &str = "Invalid email or password";

/// Errors that can happen while logging in
#[derive(Debug, Error)]
pub enum Error {
    /// We couldn't parse a URL, for example if the base URL was invalid.
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// We couldn't reach the server, or it sent back something we couldn't
    /// read (for example a success without a token.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status. It may have told us why.
    #[error("server rejected login with {status}")]
    Rejected {
        /// The status the server sent
        status: StatusCode,

        /// The `message` field from the error body, if there was one
        message: Option<String>,
    },
}

impl Error {
    /// The one line of text to show the user. Every kind of failure ends up
    /// here; only the server's own message is more specific than the
    /// fallback.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ => FALLBACK_MESSAGE.to_string(),
        }
    }
}

/// The body of an error response. Everything is optional since we can't
/// count on the server (or a proxy in front of it) to send JSON at all.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResp {
    /// Human-readable explanation
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResp {
    /// Read an error body, treating anything unparseable as empty.
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    mod user_message {
        use super::*;

        #[test]
        fn uses_server_message() {
            let err = Error::Rejected {
                status: StatusCode::UNAUTHORIZED,
                message: Some("Account locked".to_string()),
            };

            assert_eq!(err.user_message(), "Account locked");
        }

        #[test]
        fn falls_back_without_message() {
            let err = Error::Rejected {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: None,
            };

            assert_eq!(err.user_message(), FALLBACK_MESSAGE);
        }

        #[test]
        fn falls_back_on_empty_message() {
            let err = Error::Rejected {
                status: StatusCode::BAD_REQUEST,
                message: Some(String::new()),
            };

            assert_eq!(err.user_message(), FALLBACK_MESSAGE);
        }

        #[test]
        fn falls_back_on_bad_url() {
            let err = Error::from(url::Url::parse("not a url").unwrap_err());

            assert_eq!(err.user_message(), FALLBACK_MESSAGE);
        }
    }

    mod error_resp {
        use super::*;

        #[test]
        fn reads_message() {
            let resp = ErrorResp::parse(br#"{"message": "nope"}"#);

            assert_eq!(resp.message.as_deref(), Some("nope"));
        }

        #[test]
        fn missing_message_is_none() {
            let resp = ErrorResp::parse(br#"{"error": "nope"}"#);

            assert_eq!(resp.message, None);
        }

        #[test]
        fn non_json_is_none() {
            let resp = ErrorResp::parse(b"<html>Bad Gateway</html>");

            assert_eq!(resp.message, None);
        }
    }
}
