use crate::types::Location;
use derive_more::Display;
use std::io;
use thiserror::Error;

/// Boxed error returned by the storage and notification services.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed because {0} is not set")]
    MissingSetting(&'static str),

    #[error("Invalid configuration document ({0})")]
    InvalidConfig(#[from] serde_yaml::Error),

    #[error("Failed to retrieve log file {location}")]
    Retrieval {
        location: Location,
        #[source]
        source: BoxError,
    },

    #[error(
        "Encountered an IO error while decompressing the log file ({})",
        .0.kind()
    )]
    Decompress(#[source] io::Error),

    #[error("Failed to parse the log file ({0})")]
    Parse(#[source] serde_json::Error),

    #[error("Failed to encode the alert message ({0})")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to publish alert to '{topic_arn}'")]
    Delivery {
        topic_arn: String,
        #[source]
        source: BoxError,
    },
}

/// Failure classes of an invocation. None of them is retried.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display)]
pub enum ErrorKind {
    /// A required setting is missing or malformed, raised before any I/O.
    Configuration,
    /// The log file object is missing or inaccessible.
    Retrieval,
    /// Decompression or parsing of the log file failed.
    Format,
    /// The alert could not be handed to the notification service.
    Delivery,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingSetting(_) | Error::InvalidConfig(_) => ErrorKind::Configuration,
            Error::Retrieval { .. } => ErrorKind::Retrieval,
            Error::Decompress(_) | Error::Parse(_) => ErrorKind::Format,
            Error::Encode(_) | Error::Delivery { .. } => ErrorKind::Delivery,
        }
    }

    pub(crate) fn retrieval(location: &Location, source: BoxError) -> Self {
        Error::Retrieval {
            location: location.clone(),
            source,
        }
    }

    pub(crate) fn delivery<S: AsRef<str>>(topic_arn: S, source: BoxError) -> Self {
        Error::Delivery {
            topic_arn: topic_arn.as_ref().to_owned(),
            source,
        }
    }
}
