use crate::{
    config::Config,
    error::Error,
    filter::should_alert,
    loader::{ObjectStore, RecordLoader},
    notify::{AlertMessage, Notifier},
    types::{Location, Notification, Record},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Outcome of one invocation.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct InvocationSummary {
    /// Log files loaded, in notification order.
    pub log_files: Vec<Location>,
    /// Records evaluated across all log files.
    pub records_scanned: usize,
    /// Alert messages published, at most one per log file.
    pub notifications_sent: usize,
    /// Records that raised an alert.
    pub alerts: usize,
}

/// Scans the log files named by a notification and publishes an alert for
/// each file holding records that [`should_alert`].
#[derive(Debug)]
pub struct AlertHandler<S, N> {
    loader: RecordLoader<S>,
    notifier: N,
}

impl<S: ObjectStore, N: Notifier> AlertHandler<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            loader: RecordLoader::new(store),
            notifier,
        }
    }

    pub fn loader(&self) -> &RecordLoader<S> {
        &self.loader
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Builds the configuration through `lookup` and handles `notification`.
    ///
    /// A missing setting fails the invocation before any log file is read.
    pub async fn invoke<F>(
        &self,
        lookup: F,
        notification: &Notification,
    ) -> Result<InvocationSummary, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Config::from_lookup(lookup)?;
        self.handle(&config, notification).await
    }

    /// Processes every log file of `notification` in order, one at a time.
    ///
    /// Matches are batched per log file and published as soon as that file is
    /// done. The first failure aborts the invocation; alerts already published
    /// for earlier files stand.
    pub async fn handle(
        &self,
        config: &Config,
        notification: &Notification,
    ) -> Result<InvocationSummary, Error> {
        info!("Starting CloudTrail logs analyzer");
        debug!(?notification, "Received notification");
        debug!(allowed_principals = ?config.allowed_principals, "Allowed principals");

        let mut summary = InvocationSummary::default();
        for location in notification.locations() {
            info!(%location, "Loading CloudTrail log file");
            let records = self.loader.load(&location).await?;
            info!(%location, records = records.len(), "Loaded CloudTrail log file");

            summary.records_scanned += records.len();
            let alerts: Vec<Record> = records
                .into_iter()
                .filter(|r| should_alert(r, config))
                .collect();

            if !alerts.is_empty() {
                warn!(
                    %location,
                    alerts = alerts.len(),
                    "Found KMS actions from principals not allowed, sending notification"
                );
                self.send(config, &alerts).await?;
                summary.notifications_sent += 1;
                summary.alerts += alerts.len();
            }
            summary.log_files.push(location);
        }

        Ok(summary)
    }

    async fn send(&self, config: &Config, alerts: &[Record]) -> Result<(), Error> {
        let message = AlertMessage::from_records(alerts)?;
        self.notifier
            .publish(&config.topic_arn, &message)
            .await
            .map_err(|e| Error::delivery(&config.topic_arn, e))
    }
}
