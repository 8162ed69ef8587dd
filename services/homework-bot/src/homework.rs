//! Homework status records and their human-readable verdicts

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::BotError;

/// Review status reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Text sent to the chat for this status
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomeworkStatus {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(BotError::UnknownStatus(other.to_string())),
        }
    }
}

/// A single record from the `homeworks` list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Homework {
    pub name: String,
    pub status: HomeworkStatus,
}

impl Homework {
    /// Validate a raw record.
    ///
    /// Both `homework_name` and `status` are required. A `status` that is not
    /// a string is reported through its JSON form so the chat shows what the
    /// API actually sent.
    pub fn from_value(record: &Value) -> crate::Result<Self> {
        let name = match record.get("homework_name") {
            Some(Value::String(name)) => name.clone(),
            Some(other) => other.to_string(),
            None => return Err(BotError::MissingKey("homework_name".to_string())),
        };
        let status = match record.get("status") {
            Some(Value::String(status)) => status.parse()?,
            Some(other) => return Err(BotError::UnknownStatus(other.to_string())),
            None => return Err(BotError::MissingKey("status".to_string())),
        };
        Ok(Self { name, status })
    }

    /// Notification text for this record
    pub fn message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\" {}",
            self.name,
            self.status.verdict()
        )
    }
}

/// Map a raw record to its notification text
pub fn parse_status(record: &Value) -> crate::Result<String> {
    Ok(Homework::from_value(record)?.message())
}
