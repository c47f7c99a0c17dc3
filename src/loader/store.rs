use crate::{error::BoxError, types::Location};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read access to the object storage holding the log files.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Returns the raw content of the object, failing if it is missing or
    /// inaccessible.
    async fn get(&self, location: &Location) -> Result<Bytes, BoxError>;
}

/// An [`ObjectStore`] backed by a local directory tree, where each bucket is
/// a sub-directory of the root and keys are paths relative to it.
#[derive(Clone, Debug)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn path_of(&self, location: &Location) -> PathBuf {
        self.root.join(&location.bucket).join(&location.key)
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn get(&self, location: &Location) -> Result<Bytes, BoxError> {
        let path = self.path_of(location);
        debug!(path = %path.display(), "Reading local object");
        let content = tokio::fs::read(&path).await?;
        Ok(Bytes::from(content))
    }
}
