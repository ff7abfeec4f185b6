use std::path::PathBuf;
use thiserror::Error;

use crate::path::ROOT_MARKER;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong between the CLI/TUI and the remote tree store.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid path `{0}`: paths must be prefixed with {root}", root = ROOT_MARKER)]
    InvalidPath(String),

    #[error("{0} is not a directory. Tip: drop the trailing '/' to fetch it as a file")]
    NotADirectory(String),

    /// Network, TLS or body-read failure while talking to the store.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered, but not with a success status (bad credentials, missing path, ...).
    #[error("the store answered HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("could not decode the listing of {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("already at the root, there is no parent to go to")]
    AtRoot,

    #[error("breadcrumb stack is empty, there is no directory to return to")]
    EmptyStack,

    #[error(
        "incomplete configuration: set --publish-settings-file, or all of --user, --password and --publish-url"
    )]
    IncompleteConfiguration,

    #[error(
        "when using --publish-settings-file you cannot also specify --user, --password or --publish-url"
    )]
    ConflictingConfiguration,

    #[error("could not read publish settings file {path}: {source}")]
    ProfileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid publish settings: {0}")]
    Profile(String),
}
