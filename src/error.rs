use reqwest::StatusCode;
use thiserror::Error;

/// Boxed cause carried by transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read or written, or the home directory is unknown.
    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// A config file or response body was not the JSON shape we expected.
    #[error("could not decode {what}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized for writing or sending.
    #[error("could not encode {what}")]
    Encode {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid key: {0} (expected one of: api-url, api-key)")]
    InvalidKey(String),

    #[error("invalid api url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request never produced an HTTP response.
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The service answered with a status of 400 or above.
    #[error("server returned status {status}: {body}")]
    Api { status: StatusCode, body: String },
}

impl Error {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn decode(what: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            what: what.into(),
            source,
        }
    }

    pub(crate) fn encode(what: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Encode {
            what: what.into(),
            source,
        }
    }

    /// HTTP status for [`Error::Api`], `None` for everything else.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
