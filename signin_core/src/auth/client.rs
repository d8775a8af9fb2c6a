use super::error::{self, Error, ErrorResp};
use super::login;
use async_trait::async_trait;
use url::Url;

/// Anything that can trade credentials for a session token. The form only
/// talks to this, so tests can swap in a fake.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Log into the server. One request, one response, no retries.
    ///
    /// ## Errors
    ///
    /// Any failure to get a token, including the server saying no.
    async fn login(&self, req: &login::Req) -> error::Result<login::Resp>;
}

/// Talks to the real login endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    /// The server to connect to. Should only be the protocol and domain, e.g.
    /// `https://learn.your-domain.com`.
    server: String,

    /// Shared HTTP client, for connection reuse.
    http: reqwest::Client,
}

impl HttpAuthClient {
    /// Construct a new client
    pub fn new(server: String, http: reqwest::Client) -> Self {
        Self { server, http }
    }

    /// Convert an HTTP response into a result, interpreting errors in a
    /// standard way.
    ///
    /// ## Errors
    ///
    /// - `Ok(..)` if the server returned a success (2xx) with a token
    /// - `Error::Rejected` for any other status, with the body's `message`
    ///   if it had one
    /// - `Error::Http` if we couldn't send the request or read the response
    async fn handle_response(resp: reqwest::RequestBuilder) -> error::Result<login::Resp> {
        let resp = resp.send().await?;

        let status = resp.status();

        if status.is_success() {
            Ok(resp.json().await?)
        } else {
            let body = resp.bytes().await?;
            let ErrorResp { message } = ErrorResp::parse(&body);

            tracing::debug!(%status, has_message = message.is_some(), "login rejected");

            Err(Error::Rejected { status, message })
        }
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    #[tracing::instrument(skip(self, req), fields(server = %self.server))]
    async fn login(&self, req: &login::Req) -> error::Result<login::Resp> {
        let url = Url::parse(&self.server)?.join(login::PATH)?;

        Self::handle_response(self.http.post(url).json(req)).await
    }
}
