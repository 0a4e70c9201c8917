use std::{io, path::PathBuf, process::ExitStatus};
use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The possible errors raised while triggering a deploy
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("no such environment {0}")]
    MissingEnvironment(String),
    #[error("missing key {key} in environment {section}")]
    MissingKey { key: String, section: String },
    #[error("could not read configuration from {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },
    #[error("{command} failed ({status})")]
    Command { command: String, status: ExitStatus },
    #[error("{url} is not a valid URL")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("error connecting to Chief, did you connect to the VPN?")]
    Unreachable(#[source] reqwest::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to read answer from the terminal")]
    Prompt(#[source] dialoguer::Error),
    #[error("canceled!")]
    Canceled,
}

impl Error {
    /// The status code the process should terminate with
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingEnvironment(_) => 2,
            Self::MissingKey { .. } => 4,
            _ => 1,
        }
    }
}
