//! Engine: polls the status API and forwards changes to the notifier

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio_util::sync::CancellationToken;

use crate::api::{check_response, PracticumClient};
use crate::homework::Homework;
use crate::notifier::Notifier;
use crate::report::Report;
use crate::state::{BotState, ERROR_STREAK_WARNING};

/// What a single poll iteration did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// A new report was delivered
    Notified,
    /// The report matched the last delivered one
    Unchanged,
    /// A new report was built but the notifier failed
    DeliveryFailed,
    /// The poll failed with an error that is only logged
    Logged,
}

/// The engine owns the poll loop state
#[derive(Debug)]
pub struct Engine {
    api: PracticumClient,
    notifier: Arc<dyn Notifier>,
    retry_period: Duration,
    state: BotState,
    cancel: CancellationToken,
}

impl Engine {
    pub fn new(
        api: PracticumClient,
        notifier: Arc<dyn Notifier>,
        retry_period: Duration,
        from_date: i64,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            api,
            notifier,
            retry_period,
            state: BotState::new(from_date),
            cancel,
        }
    }

    pub fn state(&self) -> &BotState {
        &self.state
    }

    /// Poll until the cancellation token is triggered, sleeping the retry
    /// period after every iteration whatever its outcome. An in-flight poll
    /// is abandoned on cancellation.
    pub async fn run(&mut self) {
        let cancel = self.cancel.clone();
        loop {
            let outcome = tokio::select! {
                outcome = self.poll_once() => outcome,
                _ = cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled during a poll");
                    break;
                }
            };
            tracing::debug!(
                "Poll finished: {:?}, next poll in {:?}",
                outcome,
                self.retry_period
            );

            tokio::select! {
                _ = tokio::time::sleep(self.retry_period) => {}
                _ = cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    break;
                }
            }
        }
    }

    /// Run one fetch-validate-notify iteration
    pub async fn poll_once(&mut self) -> PollOutcome {
        match self.check_statuses().await {
            Ok(report) => {
                self.state.record_success();
                self.deliver(report).await
            }
            Err(e) => {
                let errors = self.state.record_error();
                if errors == ERROR_STREAK_WARNING {
                    tracing::warn!("{} consecutive failed polls", errors);
                }
                tracing::error!("Poll failed: {}", e);

                if !e.is_for_sending() {
                    return PollOutcome::Logged;
                }
                let report = self.state.current_report().with_failure(&e);
                self.deliver(report).await
            }
        }
    }

    async fn check_statuses(&mut self) -> crate::Result<Report> {
        let response = self.api.get_api_answer(self.state.watermark()).await?;
        let page = check_response(&response)?;
        self.state.advance_watermark(page.current_date);

        match page.homeworks.first() {
            Some(record) => {
                let homework = Homework::from_value(record)?;
                let message = homework.message();
                Ok(Report::new(homework.name, message))
            }
            None => Ok(Report::no_new_statuses()),
        }
    }

    async fn deliver(&mut self, report: Report) -> PollOutcome {
        if !self.state.update_report(report) {
            tracing::debug!("Status unchanged");
            return PollOutcome::Unchanged;
        }

        let message = self.state.current_report().output().to_string();
        match self.notifier.notify(&message).await {
            Ok(()) => {
                self.state.mark_sent();
                PollOutcome::Notified
            }
            Err(e) => {
                tracing::error!("Notification via '{}' failed: {}", self.notifier.type_name(), e);
                PollOutcome::DeliveryFailed
            }
        }
    }
}

/// Current unix time in seconds, the default watermark
pub fn current_epoch_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
