use crate::{
    error::Error,
    types::{Location, LogFile, Record},
};
use flate2::read::GzDecoder;
use itertools::Itertools;
use std::io::Read;
use tracing::debug;

pub use store::{LocalStore, ObjectStore};

pub mod store;

/// Loads CloudTrail log files from an [`ObjectStore`].
#[derive(Debug)]
pub struct RecordLoader<S> {
    store: S,
}

impl<S: ObjectStore> RecordLoader<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetches the log file at `location` and returns its records ordered by
    /// `eventTime`.
    ///
    /// Nothing is retried: a missing object yields [`Error::Retrieval`],
    /// a corrupt one [`Error::Decompress`] or [`Error::Parse`].
    pub async fn load(&self, location: &Location) -> Result<Vec<Record>, Error> {
        let content = self
            .store
            .get(location)
            .await
            .map_err(|e| Error::retrieval(location, e))?;
        debug!(%location, size = content.len(), "Fetched log file");
        decode_log_file(&content)
    }
}

/// Decompresses and parses a gzipped CloudTrail log file.
///
/// Records are stably sorted ascending by `eventTime`; lexical order is
/// chronological order for the ISO-8601 timestamps CloudTrail writes.
pub fn decode_log_file(content: &[u8]) -> Result<Vec<Record>, Error> {
    let mut json = Vec::new();
    GzDecoder::new(content)
        .read_to_end(&mut json)
        .map_err(Error::Decompress)?;

    let log_file: LogFile = serde_json::from_slice(&json).map_err(Error::Parse)?;
    Ok(log_file
        .records
        .into_iter()
        .sorted_by(|a, b| a.event_time.cmp(&b.event_time))
        .collect())
}
