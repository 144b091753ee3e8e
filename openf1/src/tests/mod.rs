use std::time::Duration;

use crate::Client;


/// Build a client against a mockito server with all delays zeroed out.
fn test_client(server: &mockito::ServerGuard) -> Client {
    Client::builder()
        .base_url(&server.url())
        .user_agent("openf1-rs-tests")
        .max_retries(2)
        .initial_backoff(Duration::from_millis(0))
        .window_cooldown(Duration::from_millis(0))
        .build()
        .unwrap()
}

/// Expect the builder to cap the window cooldown at one second.
#[test]
fn window_cooldown_is_capped() {
    let client = Client::builder()
        .window_cooldown(Duration::from_secs(30))
        .build()
        .unwrap();

    assert_eq!(client.window_cooldown(), Duration::from_secs(1));
}
