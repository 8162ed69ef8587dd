//! Homework bot - review status poller
//!
//! Polls the homework status API, detects status changes, and sends
//! notifications to a Telegram chat.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod homework;
pub mod io;
pub mod notifier;
pub mod report;
pub mod state;
pub mod telegram;

pub use config::{check_tokens, load_config, Config};
pub use error::{BotError, Result};

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api::PracticumClient;
use crate::engine::Engine;
use crate::io::ReqwestHttpClient;
use crate::notifier::Notifier;
use crate::telegram::TelegramNotifier;

/// Run the bot with the given configuration, starting from `from_date`
pub async fn run(config: Config, from_date: i64) -> Result<()> {
    if !check_tokens(&config) {
        return Err(BotError::Config(format!(
            "missing required secrets: {}",
            config.missing_secrets().join(", ")
        )));
    }

    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::new(Duration::from_secs(
        config.polling.request_timeout_seconds,
    ))?);
    let cancel = CancellationToken::new();

    let api = PracticumClient::new(&config.practicum, Arc::clone(&http));
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(&config.telegram, http));

    let mut engine = Engine::new(
        api,
        notifier,
        Duration::from_secs(config.polling.retry_period_seconds),
        from_date,
        cancel.clone(),
    );

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    tracing::info!("Homework bot started, watching statuses since {}", from_date);

    // Run the engine (blocks until cancelled)
    engine.run().await;

    tracing::info!("Homework bot stopped");
    Ok(())
}
