use crate::auth::{self, AuthClient};
use crate::form::{Action, Effect};
use crate::token::{self, TokenStore};
use tokio::time;

/// Connections to external services that effects use. We keep these around
/// to share them (and their connection pools) for the app as a whole.
#[derive(Debug)]
pub struct EffectContext<A, S> {
    /// Trades credentials for tokens
    auth: A,

    /// Where the token ends up
    store: S,
}

impl<A: AuthClient, S: TokenStore> EffectContext<A, S> {
    /// Get a new `EffectContext`
    pub fn new(auth: A, store: S) -> Self {
        Self { auth, store }
    }

    /// The auth client effects log in with
    pub fn auth(&self) -> &A {
        &self.auth
    }

    /// The store effects save tokens into
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Perform the side-effectful portions of this effect, returning the next
    /// `Action` the form needs to handle
    pub async fn run(&self, effect: Effect) -> Option<Action> {
        match self.run_inner(effect).await {
            Ok(action) => action,
            Err(problem) => {
                tracing::error!(%problem, "problem running effect");
                Some(problem.into_action())
            }
        }
    }

    /// The actual implementation of `run`, but with a `Result` wrapper to make
    /// it more ergonomic to write.
    async fn run_inner(&self, effect: Effect) -> Result<Option<Action>, Problem> {
        match effect {
            Effect::LogIn(req) => {
                tracing::info!("logging in");

                let resp = self.auth.login(&req).await?;

                Ok(Some(Action::LoggedIn(resp.token)))
            }

            Effect::PersistToken(token) => {
                tracing::info!("saving session token");

                self.store.save(&token).await?;

                Ok(Some(Action::TokenSaved))
            }

            Effect::RedirectAfter(delay, route) => {
                tracing::debug!(?delay, path = route.path(), "redirect scheduled");

                time::sleep(delay).await;

                Ok(Some(Action::RedirectDue(route)))
            }
        }
    }
}

/// Problems that can happen while running an `Effect`.
#[derive(Debug, thiserror::Error)]
pub enum Problem {
    /// We couldn't log in, for whatever reason.
    #[error("Problem logging in: {0}")]
    LogIn(#[from] auth::Error),

    /// We got a token but couldn't keep it.
    #[error("Couldn't save your session: {0}")]
    Store(#[from] token::Error),
}

impl Problem {
    /// Turn this problem into something the form can show.
    fn into_action(self) -> Action {
        match self {
            Self::LogIn(err) => Action::LoginFailed(err.user_message()),
            store @ Self::Store(_) => Action::TokenSaveFailed(store.to_string()),
        }
    }
}
