//! BDD step definitions for required secrets

use cucumber::{given, then, when};

use homework_bot::{check_tokens, Config};

use crate::world::HomeworkBotWorld;

#[given(expr = "the environment variable {string} is {string}")]
fn env_var(world: &mut HomeworkBotWorld, key: String, value: String) {
    world.env.insert(key, value);
}

#[when("the secrets are resolved")]
fn resolve(world: &mut HomeworkBotWorld) {
    let mut config = Config::default();
    let env = world.env.clone();
    config.resolve_secrets_with(|key| env.get(key).cloned());
    world.config = Some(config);
}

#[then("the tokens should be valid")]
fn tokens_valid(world: &mut HomeworkBotWorld) {
    let config = world.config.as_ref().expect("secrets not resolved");
    assert!(check_tokens(config), "missing: {:?}", config.missing_secrets());
}

#[then(expr = "the tokens should be invalid because {string} is missing")]
fn tokens_invalid(world: &mut HomeworkBotWorld, missing: String) {
    let config = world.config.as_ref().expect("secrets not resolved");
    assert!(!check_tokens(config));
    assert_eq!(config.missing_secrets(), vec![missing.as_str()]);
}
