use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tokio::{fs, io};

/// The fixed name the session token is stored under.
pub const TOKEN_KEY: &str = "token";

/// An opaque token issued by the server on login. We never look inside it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a token string
    pub fn new(token: String) -> Self {
        Self(token)
    }

    /// Get the token as a string, e.g. for a bearer header
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// Problems reading or writing the stored token
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// We had a problem with the disk, for example with permissions.
    #[error("IO error: {0}")]
    IO(#[from] io::Error),

    /// The stored token wasn't in the shape we expected.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single persistent slot for the session token. Written once on a
/// successful login.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Replace the stored token.
    ///
    /// ## Errors
    ///
    /// If the slot can't be written.
    async fn save(&self, token: &SessionToken) -> Result<()>;
}

/// Stores the token as JSON in `<dir>/token.json`.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    /// Directory holding the token file. Created on first save.
    dir: PathBuf,
}

impl FileTokenStore {
    /// Store tokens under the given directory.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Where the token lives on disk.
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{TOKEN_KEY}.json"))
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn save(&self, token: &SessionToken) -> Result<()> {
        tracing::info!(path = ?self.path(), "saving session token");

        fs::create_dir_all(&self.dir).await?;

        let data = serde_json::to_vec(token)?;
        fs::write(self.path(), &data).await?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    mod session_token {
        use super::*;

        #[test]
        fn debug_is_redacted() {
            let token = SessionToken::new("abc123".to_string());

            assert!(!format!("{token:?}").contains("abc123"));
        }

        #[test]
        fn serializes_as_plain_string() {
            let token = SessionToken::new("abc123".to_string());

            assert_eq!(serde_json::to_string(&token).unwrap(), r#""abc123""#);
        }
    }

    mod file_store {
        use super::*;

        /// What's on disk, read the way any other consumer of the slot would.
        async fn stored(store: &FileTokenStore) -> SessionToken {
            let data = fs::read(store.path()).await.unwrap();

            serde_json::from_slice(&data).unwrap()
        }

        #[test_log::test(tokio::test)]
        async fn nothing_written_until_save() {
            let dir = tempfile::tempdir().unwrap();
            let store = FileTokenStore::new(dir.path().to_owned());

            assert!(!fs::try_exists(store.path()).await.unwrap());
        }

        #[test_log::test(tokio::test)]
        async fn save_then_load() {
            let dir = tempfile::tempdir().unwrap();
            let store = FileTokenStore::new(dir.path().join("nested"));
            let token = SessionToken::new("abc123".to_string());

            store.save(&token).await.unwrap();

            assert_eq!(stored(&store).await, token);
            assert!(store.path().ends_with("token.json"));
        }

        #[test_log::test(tokio::test)]
        async fn save_overwrites() {
            let dir = tempfile::tempdir().unwrap();
            let store = FileTokenStore::new(dir.path().to_owned());

            store
                .save(&SessionToken::new("first".to_string()))
                .await
                .unwrap();
            store
                .save(&SessionToken::new("second".to_string()))
                .await
                .unwrap();

            assert_eq!(
                stored(&store).await,
                SessionToken::new("second".to_string())
            );
        }

        #[test_log::test(tokio::test)]
        async fn unwritable_dir_is_an_error() {
            let dir = tempfile::tempdir().unwrap();
            let blocker = dir.path().join("blocker");
            fs::write(&blocker, b"not a directory").await.unwrap();
            let store = FileTokenStore::new(blocker.join("nested"));

            let result = store.save(&SessionToken::new("abc123".to_string())).await;

            assert!(matches!(result, Err(Error::IO(_))));
        }
    }
}
