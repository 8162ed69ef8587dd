//! BDD step definitions for the poll loop

use std::sync::Arc;
use std::time::Duration;

use cucumber::{given, then, when};
use tokio_util::sync::CancellationToken;

use homework_bot::api::PracticumClient;
use homework_bot::config::{PracticumConfig, TelegramConfig};
use homework_bot::engine::{Engine, PollOutcome};
use homework_bot::io::HttpClient;
use homework_bot::notifier::Notifier;
use homework_bot::report::Report;
use homework_bot::telegram::TelegramNotifier;

use crate::world::HomeworkBotWorld;

fn build_engine(world: &HomeworkBotWorld) -> Engine {
    let http: Arc<dyn HttpClient> = world.http.clone();
    let api = PracticumClient::new(
        &PracticumConfig {
            endpoint: "http://practicum.test/statuses/".to_string(),
            token: "practicum-token".to_string(),
        },
        Arc::clone(&http),
    );
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(
        &TelegramConfig {
            api_url: "http://telegram.test".to_string(),
            token: "bot-token".to_string(),
            chat_id: "42".to_string(),
        },
        http,
    ));
    Engine::new(
        api,
        notifier,
        Duration::from_millis(10),
        world.from_date,
        CancellationToken::new(),
    )
}

#[given(expr = "the status API answers {int} with {string}")]
fn api_answers(world: &mut HomeworkBotWorld, status: u16, body: String) {
    world.http.push_response(status, &body);
}

#[given(expr = "the status API answers {int} with a body of {int} characters")]
fn api_answers_long_body(world: &mut HomeworkBotWorld, status: u16, length: usize) {
    world.http.push_response(status, &"x".repeat(length));
}

#[given("the status API is unreachable")]
fn api_unreachable(world: &mut HomeworkBotWorld) {
    world.http.push_failure("connection refused");
}

#[given("Telegram rejects messages")]
fn telegram_rejects(world: &mut HomeworkBotWorld) {
    world.http.set_post_status(403);
}

#[given(expr = "the bot starts watching from {int}")]
fn starts_from(world: &mut HomeworkBotWorld, from_date: i64) {
    world.from_date = from_date;
}

#[when(expr = "the bot polls {int} time(s)")]
async fn bot_polls(world: &mut HomeworkBotWorld, times: usize) {
    if world.engine.is_none() {
        world.engine = Some(build_engine(world));
    }
    let engine = world.engine.as_mut().expect("engine not built");
    for _ in 0..times {
        let outcome = engine.poll_once().await;
        world.outcomes.push(outcome);
    }
}

#[then(expr = "{int} message(s) should have been sent")]
fn messages_sent(world: &mut HomeworkBotWorld, count: usize) {
    let texts = world.http.posted_texts();
    assert_eq!(texts.len(), count, "posted: {texts:?}");
}

#[then(expr = "message {int} should be {string}")]
fn message_is(world: &mut HomeworkBotWorld, index: usize, expected: String) {
    let texts = world.http.posted_texts();
    let text = texts
        .get(index - 1)
        .unwrap_or_else(|| panic!("only {} messages sent", texts.len()));
    assert_eq!(text, &expected);
}

#[then(expr = "message {int} should contain {string}")]
fn message_contains(world: &mut HomeworkBotWorld, index: usize, expected: String) {
    let texts = world.http.posted_texts();
    let text = texts
        .get(index - 1)
        .unwrap_or_else(|| panic!("only {} messages sent", texts.len()));
    assert!(text.contains(&expected), "{text:?} lacks {expected:?}");
}

#[then(expr = "message {int} should be at most {int} characters long")]
fn message_length_at_most(world: &mut HomeworkBotWorld, index: usize, limit: usize) {
    let texts = world.http.posted_texts();
    let text = texts
        .get(index - 1)
        .unwrap_or_else(|| panic!("only {} messages sent", texts.len()));
    assert!(text.chars().count() <= limit, "{} characters", text.chars().count());
}

#[then(expr = "the watermark should be {int}")]
fn watermark_is(world: &mut HomeworkBotWorld, expected: i64) {
    let engine = world.engine.as_ref().expect("engine not built");
    assert_eq!(engine.state().watermark(), expected);
}

#[then(expr = "the last poll should be {string}")]
fn last_outcome(world: &mut HomeworkBotWorld, expected: String) {
    let outcome = world.outcomes.last().expect("no polls ran");
    let expected = match expected.as_str() {
        "notified" => PollOutcome::Notified,
        "unchanged" => PollOutcome::Unchanged,
        "delivery failed" => PollOutcome::DeliveryFailed,
        "logged" => PollOutcome::Logged,
        other => panic!("Unknown outcome: {}", other),
    };
    assert_eq!(*outcome, expected);
}

#[then("nothing should be remembered as delivered")]
fn nothing_delivered(world: &mut HomeworkBotWorld) {
    let engine = world.engine.as_ref().expect("engine not built");
    assert_eq!(engine.state().last_sent(), &Report::default());
}
