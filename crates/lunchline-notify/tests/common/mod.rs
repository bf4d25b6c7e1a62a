//! Shared mock server setup.

use lunchline_notify::{Mailgun, TelegramBot};
use wiremock::MockServer;

pub const TOKEN: &str = "123456:test-token";
pub const MAILGUN_KEY: &str = "key-test";
pub const MAILGUN_DOMAIN: &str = "mg.example.org";

/// Starts a mock server.
pub async fn server() -> MockServer {
    MockServer::start().await
}

/// A bot pointed at `server`.
pub fn telegram(server: &MockServer) -> TelegramBot {
    TelegramBot::new(reqwest::Client::new(), TOKEN)
        .expect("token is valid")
        .with_api_base(server.uri())
}

/// A Mailgun client pointed at `server`.
pub fn mailgun(server: &MockServer) -> Mailgun {
    Mailgun::new(reqwest::Client::new(), MAILGUN_KEY, MAILGUN_DOMAIN)
        .expect("credentials are valid")
        .with_api_base(server.uri())
}
