//! Notification report used to suppress duplicate messages

use serde::{Deserialize, Serialize};

/// Text sent when the API reports no changed homework
pub const NO_NEW_STATUSES: &str = "Нет новых статусов работ.";

/// Prefix for failures surfaced to the chat
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Name and text of a notification. Two reports are the same notification
/// when both fields match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    name: String,
    output: String,
}

impl Report {
    pub fn new(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            output: output.into(),
        }
    }

    /// Report for a poll that returned no records
    pub fn no_new_statuses() -> Self {
        Self::new("", NO_NEW_STATUSES)
    }

    /// Same report with its text replaced by a failure message
    pub fn with_failure(&self, error: &crate::BotError) -> Self {
        Self::new(self.name.clone(), format!("{}: {}", FAILURE_PREFIX, error))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn output(&self) -> &str {
        &self.output
    }
}
