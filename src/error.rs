// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Errors raised at the edges of the toast system.
///
/// Toast operations themselves never fail; these only come from loading or
/// saving settings and from wiring timers to an async runtime.
#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Runtime(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Runtime(e) => write!(f, "Runtime Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<tokio::runtime::TryCurrentError> for Error {
    fn from(err: tokio::runtime::TryCurrentError) -> Self {
        Error::Runtime(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
