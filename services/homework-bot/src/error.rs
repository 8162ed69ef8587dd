//! Error types for the homework bot
//!
//! Display strings end up in the chat when a poll fails, so they are written
//! for the person reading the notification.

/// Errors that can occur while polling statuses or delivering messages
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Не удалось получить ответ API, ошибка: {status}, причина: {reason}, текст: {body}")]
    InvalidResponseCode {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("Ошибка запроса к API: {0}")]
    Connecting(String),

    #[error("Ошибка декодирования ответа API: {error}. Полученный ответ: {body}")]
    InvalidResponseFormat { error: String, body: String },

    #[error("Отсутствует ключ \"{0}\" в ответе API")]
    MissingKey(String),

    #[error("Неверный тип данных: {0}")]
    TypeMismatch(String),

    #[error("Неизвестный статус работы - {0}")]
    UnknownStatus(String),

    #[error("Отсутствует ключ \"current_date\" в ответе API")]
    MissingCurrentDate,

    #[error("Значение ключа \"current_date\" должно быть числом, получено: {0}")]
    InvalidCurrentDate(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Не удалось отправить сообщение: {0}")]
    Notifier(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BotError {
    /// Whether a poll failure should be surfaced to the chat.
    ///
    /// Problems with the `current_date` cursor only affect the watermark, so
    /// they are logged and never sent.
    pub fn is_for_sending(&self) -> bool {
        !matches!(
            self,
            BotError::MissingCurrentDate | BotError::InvalidCurrentDate(_)
        )
    }
}

/// Result type alias for homework bot operations
pub type Result<T> = std::result::Result<T, BotError>;
