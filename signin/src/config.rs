use clap::Parser;
use std::path::PathBuf;

/// Sign in to your learning account from the terminal
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Config {
    /// Server to log into. Only the protocol and domain, e.g.
    /// `https://learn.example.com`.
    #[clap(long, env = "SIGNIN_SERVER", default_value = "http://localhost:5000")]
    pub server: String,

    /// Where should we store the session token and logs?
    #[clap(long, env = "SIGNIN_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

impl Config {
    /// Get either the configured or a default data directory. If no data
    /// directory can be found (e.g. because `$HOME` is unset) we will use the
    /// current directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("dev", "signin", "signin")
                    .map(|dirs| dirs.data_local_dir().to_owned())
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
