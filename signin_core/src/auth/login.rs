use crate::credentials::Credentials;
use crate::token::SessionToken;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The request to log into the server.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Req {
    /// Email to log in with.
    pub email: String,

    /// Plaintext password to use for login.
    pub password: String,

    /// Whether the user asked to stay signed in. Passed through as-is.
    pub remember_me: bool,
}

impl From<&Credentials> for Req {
    fn from(credentials: &Credentials) -> Self {
        Self {
            email: credentials.email.clone(),
            password: credentials.password.clone(),
            remember_me: credentials.remember_me,
        }
    }
}

impl fmt::Debug for Req {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Req")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

/// Result of logging in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resp {
    /// Token to use for future requests.
    pub token: SessionToken,
}

/// Where the login endpoint lives.
pub const PATH: &str = "/api/users/login";
