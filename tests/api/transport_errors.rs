use claim::assert_err;
use std::time::Duration;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::{connect_agent_with_timeout, TestAgent};
use membership_sync::domain::membership::Membership;
use membership_sync::domain::subscriber_attributes::SubscriberAttributes;
use membership_sync::{Agent, AgentError};

const MUTATING_CALLS: [&str; 8] = [
    "add_subscriber",
    "update_subscriber",
    "unsubscribe",
    "signup",
    "signin",
    "expired",
    "paid",
    "cancel",
];

async fn call(agent: &Agent, name: &str) -> Result<(), AgentError> {
    let email = "frank@test.com";
    let attributes = SubscriberAttributes {
        membership: Some(Membership::Premium),
        ..Default::default()
    };

    match name {
        "add_subscriber" => agent.add_subscriber(email, &attributes).await,
        "update_subscriber" => agent.update_subscriber(email, &attributes).await,
        "unsubscribe" => agent.unsubscribe(email).await,
        "signup" => agent.signup(email, "2024-01-01").await,
        "signin" => agent.signin(email).await,
        "expired" => agent.expired(email).await,
        "paid" => agent.paid(email, "2025-01-01").await,
        _ => agent.cancel(email).await,
    }
}

#[tokio::test]
async fn remote_failures_reach_the_caller_unchanged() {
    // A client error and a server error for every call that talks to the list API.
    let test_cases = vec![
        (400, "HTTP status client error (400 Bad Request)"),
        (503, "HTTP status server error (503 Service Unavailable)"),
    ];

    for (status, expected_message) in test_cases {
        for name in MUTATING_CALLS {
            let test_agent = TestAgent::spawn().await;

            Mock::given(any())
                .respond_with(ResponseTemplate::new(status))
                .named("Failing list API")
                .expect(1)
                .mount(&test_agent.list_server)
                .await;

            let err = assert_err!(call(&test_agent.agent, name).await);
            let message = err.to_string();

            let transport_err = match err {
                AgentError::Transport(transport_err) => transport_err,
                other => panic!("{} returned {:?} instead of a transport error", name, other),
            };

            assert!(transport_err.is_status());
            assert_eq!(
                transport_err.status().map(|status| status.as_u16()),
                Some(status)
            );
            assert_eq!(
                message,
                transport_err.to_string(),
                "{} changed the error message",
                name
            );
            assert!(
                message.starts_with(expected_message),
                "{} returned an unexpected message: {}",
                name,
                message
            );
            assert!(
                message.contains(&test_agent.list_server.uri()),
                "{} lost the request url in its message: {}",
                name,
                message
            );
        }
    }
}

#[tokio::test]
async fn timeouts_reach_the_caller_as_transport_errors() {
    let list_server = MockServer::start().await;
    let agent = connect_agent_with_timeout(&list_server, Duration::from_millis(100)).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .expect(1)
        .mount(&list_server)
        .await;

    let err = assert_err!(agent.signin("frank@test.com").await);

    match err {
        AgentError::Transport(transport_err) => assert!(transport_err.is_timeout()),
        other => panic!("signin returned {:?} instead of a timeout", other),
    }
}
