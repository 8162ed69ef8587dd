//! Scripted HTTP client shared by the status API and Telegram steps

use std::collections::VecDeque;
use std::sync::Mutex;

use homework_bot::io::{HttpClient, HttpResponse};
use homework_bot::BotError;

/// Answers GETs from a queue and records every POSTed body
#[derive(Debug)]
pub struct ScriptedHttpClient {
    gets: Mutex<VecDeque<homework_bot::Result<HttpResponse>>>,
    posts: Mutex<Vec<serde_json::Value>>,
    post_status: Mutex<u16>,
}

impl Default for ScriptedHttpClient {
    fn default() -> Self {
        Self {
            gets: Mutex::new(VecDeque::new()),
            posts: Mutex::new(Vec::new()),
            post_status: Mutex::new(200),
        }
    }
}

impl ScriptedHttpClient {
    pub fn push_response(&self, status: u16, body: &str) {
        self.gets
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    pub fn push_failure(&self, message: &str) {
        self.gets
            .lock()
            .unwrap()
            .push_back(Err(BotError::Http(message.to_string())));
    }

    pub fn set_post_status(&self, status: u16) {
        *self.post_status.lock().unwrap() = status;
    }

    /// Texts of all messages posted so far
    pub fn posted_texts(&self) -> Vec<String> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .map(|body| body["text"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

#[async_trait::async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn get(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        _query: &[(&str, &str)],
    ) -> homework_bot::Result<HttpResponse> {
        self.gets
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BotError::Http("no scripted response".to_string())))
    }

    async fn post_json(
        &self,
        _url: &str,
        body: &serde_json::Value,
    ) -> homework_bot::Result<HttpResponse> {
        self.posts.lock().unwrap().push(body.clone());
        let status = *self.post_status.lock().unwrap();
        let body = if status == 200 {
            r#"{"ok":true}"#
        } else {
            r#"{"ok":false,"description":"Forbidden: bot was blocked by the user"}"#
        };
        Ok(HttpResponse::new(status, body))
    }
}
