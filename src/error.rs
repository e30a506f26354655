use std::path::PathBuf;

use thiserror::Error;

/// Errors returned while configuring the logger.
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument was empty or otherwise unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Resolving, creating or opening a log file failed.
    #[error("Unable to set up log file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Another `log` implementation was installed first.
    #[error("A global logger is already installed")]
    LoggerAlreadySet(#[from] log::SetLoggerError),
}

pub type Result<T> = std::result::Result<T, Error>;
