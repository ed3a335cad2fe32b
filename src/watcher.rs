//! Poll loop with review-status change detection.
//!
//! The watcher fetches recent submissions from an [`UpdateSource`], compares
//! the newest submission's status against the last one seen, and pushes a
//! formatted message through a [`Notifier`] when it changes. Every iteration
//! result is matched explicitly at the loop boundary so each failure kind
//! gets its own log line and the loop always survives to the next poll.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, error, info};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::WatcherConfig;
use crate::formatters::{format_status_message, FormatError};
use crate::review_client::{extract_submissions, FetchError, PayloadError, ReviewApiClient};
use crate::telegram_client::{NotifyError, TelegramClient};

/// Source of submission updates.
#[async_trait]
pub trait UpdateSource: Send + Sync {
    /// Fetch the raw payload of submissions updated since `from_date`.
    async fn fetch_updates(&self, from_date: i64) -> Result<Value, FetchError>;
}

/// Delivery channel for formatted status notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<(), NotifyError>;
}

#[async_trait]
impl UpdateSource for ReviewApiClient {
    async fn fetch_updates(&self, from_date: i64) -> Result<Value, FetchError> {
        ReviewApiClient::fetch_updates(self, from_date).await
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        TelegramClient::send_message(self, text).await
    }
}

/// Everything one poll iteration can fail with, tagged per operation.
#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// What a completed poll iteration observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The newest submission's status differs from the last one seen.
    StatusChanged { status: String },
    /// Same status as last time; nothing to report.
    Unchanged,
    /// The fetch window contained no submissions.
    NoSubmissions,
}

pub struct HomeworkWatcher<S, N> {
    source: S,
    notifier: N,
    poll_interval: Duration,
    advance_from_date: bool,
    from_date: i64,
    last_status: Option<String>,
}

impl<S: UpdateSource, N: Notifier> HomeworkWatcher<S, N> {
    pub fn new(source: S, notifier: N, config: &WatcherConfig) -> Self {
        Self {
            source,
            notifier,
            poll_interval: config.poll_interval,
            advance_from_date: config.advance_from_date,
            from_date: Utc::now().timestamp() - config.lookback_secs,
            last_status: None,
        }
    }

    /// Window anchor the next poll will request from.
    pub fn from_date(&self) -> i64 {
        self.from_date
    }

    /// Run one fetch/compare/notify cycle.
    ///
    /// A delivery failure is not an iteration failure: the new status is
    /// already recorded by then, the error is logged, and the outcome is
    /// still [`PollOutcome::StatusChanged`].
    pub async fn poll_once(&mut self) -> Result<PollOutcome, PollError> {
        let requested_at = Utc::now().timestamp();
        let payload = self.source.fetch_updates(self.from_date).await?;
        let submissions = extract_submissions(&payload)?;

        // The window was fetched and read cleanly; only now may it move.
        if self.advance_from_date {
            self.from_date = requested_at;
        }

        let newest = match submissions.first() {
            Some(first) => first,
            None => return Ok(PollOutcome::NoSubmissions),
        };

        let status = newest
            .get("status")
            .and_then(|v| v.as_str())
            .ok_or(FormatError::MissingField("status"))?;

        if self.last_status.as_deref() == Some(status) {
            return Ok(PollOutcome::Unchanged);
        }
        self.last_status = Some(status.to_string());

        let message = format_status_message(newest)?;
        if let Err(e) = self.notifier.send_message(&message).await {
            error!("failed to deliver notification: {e}");
        } else {
            info!("notification delivered: {message}");
        }

        Ok(PollOutcome::StatusChanged {
            status: status.to_string(),
        })
    }

    /// Poll forever. Returns only by process termination.
    pub async fn run(&mut self) -> Result<()> {
        info!(
            "watching for review-status changes every {}s (from_date={}, advance_from_date={})",
            self.poll_interval.as_secs(),
            self.from_date,
            self.advance_from_date
        );

        loop {
            match self.poll_once().await {
                Ok(PollOutcome::StatusChanged { status }) => {
                    info!("review status changed to `{status}`");
                }
                Ok(PollOutcome::Unchanged) => {
                    debug!("review status unchanged");
                }
                Ok(PollOutcome::NoSubmissions) => {
                    debug!("no submissions updated in the current window");
                }
                Err(PollError::Fetch(e)) => error!("fetch failed: {e}"),
                Err(PollError::Payload(e)) => error!("malformed response payload: {e}"),
                Err(PollError::Format(e)) => error!("cannot build notification: {e}"),
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
