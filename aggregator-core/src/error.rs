use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy of the data-provider layer.
///
/// Nothing here is retried; every variant surfaces to the immediate caller
/// and aborts the run.
#[derive(Debug, Error)]
pub enum Error {
    /// Network-level failure reaching a remote source.
    #[error("request to {service} failed")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The remote source answered with a non-success status.
    #[error("{service} returned status {status}")]
    UnexpectedStatus {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    /// Payload arrived but does not decode into the expected shape.
    #[error("could not decode {service} payload: {detail}")]
    Parse {
        service: &'static str,
        detail: String,
    },

    #[error("{0}")]
    InvalidArgument(String),

    /// I/O failure against the cache snapshot, export file or config file.
    #[error("could not {op} {}", .path.display())]
    Persistence {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    pub(crate) fn parse(service: &'static str, detail: impl Into<String>) -> Self {
        Error::Parse { service, detail: detail.into() }
    }

    pub(crate) fn persistence(
        op: &'static str,
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Persistence { op, path: path.into(), source: source.into() }
    }

    /// True for both flavors of remote-source failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::UnexpectedStatus { .. })
    }
}
