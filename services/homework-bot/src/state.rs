//! In-memory state of the poll loop

use crate::report::Report;

/// Failure streak length that triggers a warning
pub const ERROR_STREAK_WARNING: u32 = 5;

/// Watermark, last reports and failure streak
#[derive(Debug, Clone)]
pub struct BotState {
    watermark: i64,
    current: Report,
    last_sent: Report,
    consecutive_errors: u32,
}

impl BotState {
    pub fn new(watermark: i64) -> Self {
        Self {
            watermark,
            current: Report::default(),
            last_sent: Report::default(),
            consecutive_errors: 0,
        }
    }

    /// Timestamp to request records from
    pub fn watermark(&self) -> i64 {
        self.watermark
    }

    /// Move the watermark to the server's `current_date`
    pub fn advance_watermark(&mut self, current_date: i64) {
        if current_date < self.watermark {
            tracing::warn!(
                "current_date {} is older than watermark {}",
                current_date,
                self.watermark
            );
        }
        self.watermark = current_date;
    }

    /// Report built by the most recent poll
    pub fn current_report(&self) -> &Report {
        &self.current
    }

    /// Last report that reached the chat
    pub fn last_sent(&self) -> &Report {
        &self.last_sent
    }

    /// Store `report` as current, returning true if it has not been sent yet
    pub fn update_report(&mut self, report: Report) -> bool {
        let changed = report != self.last_sent;
        self.current = report;
        changed
    }

    /// Remember the current report as delivered
    pub fn mark_sent(&mut self) {
        self.last_sent = self.current.clone();
    }

    pub fn record_success(&mut self) {
        self.consecutive_errors = 0;
    }

    /// Count a failed poll and return the new streak length
    pub fn record_error(&mut self) -> u32 {
        self.consecutive_errors += 1;
        self.consecutive_errors
    }

    pub fn consecutive_errors(&self) -> u32 {
        self.consecutive_errors
    }
}
