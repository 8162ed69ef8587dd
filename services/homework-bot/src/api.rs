//! Homework status API client and response validation

use std::sync::Arc;

use serde_json::Value;

use crate::config::PracticumConfig;
use crate::io::HttpClient;
use crate::BotError;

/// Validated contents of a status response
#[derive(Debug, Clone, PartialEq)]
pub struct StatusPage {
    pub homeworks: Vec<Value>,
    pub current_date: i64,
}

/// Client for the homework status endpoint
pub struct PracticumClient {
    endpoint: String,
    token: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(config: &PracticumConfig, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", config.endpoint);
        Self {
            endpoint: config.endpoint.clone(),
            token: config.token.clone(),
            http,
        }
    }

    /// Fetch status records changed since `from_date`
    pub async fn get_api_answer(&self, from_date: i64) -> crate::Result<Value> {
        let from_date = from_date.to_string();
        let authorization = format!("OAuth {}", self.token);
        let query = [("from_date", from_date.as_str())];

        tracing::info!(
            "Requesting statuses: url={}, params={:?}",
            self.endpoint,
            query
        );

        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", authorization.as_str())],
                &query,
            )
            .await
            .map_err(|e| {
                BotError::Connecting(format!(
                    "{}. Параметры запроса: url = {}, params = {:?}",
                    e, self.endpoint, query
                ))
            })?;

        if response.status != 200 {
            return Err(BotError::InvalidResponseCode {
                status: response.status,
                reason: response.reason,
                body: response.body,
            });
        }

        serde_json::from_str(&response.body).map_err(|e| BotError::InvalidResponseFormat {
            error: e.to_string(),
            body: response.body.clone(),
        })
    }
}

/// Check the shape of a status response
pub fn check_response(response: &Value) -> crate::Result<StatusPage> {
    tracing::info!("Checking API response");

    let Value::Object(fields) = response else {
        return Err(BotError::TypeMismatch(format!(
            "ответ API должен быть словарем, получено: {}",
            json_type(response)
        )));
    };

    let homeworks = fields
        .get("homeworks")
        .ok_or_else(|| BotError::MissingKey("homeworks".to_string()))?;
    let Value::Array(homeworks) = homeworks else {
        return Err(BotError::TypeMismatch(format!(
            "значение ключа \"homeworks\" должно быть списком, получено: {}",
            json_type(homeworks)
        )));
    };

    let current_date = fields
        .get("current_date")
        .ok_or(BotError::MissingCurrentDate)?;
    let current_date = current_date
        .as_i64()
        .ok_or_else(|| BotError::InvalidCurrentDate(current_date.to_string()))?;

    Ok(StatusPage {
        homeworks: homeworks.clone(),
        current_date,
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
