use claim::{assert_err, assert_ok};
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{custom_fields, TestAgent, LIST_ID};

async fn mount_create(test_agent: &TestAgent) {
    Mock::given(path(format!("/subscribers/{}.json", LIST_ID)))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .named("Create subscriber")
        .expect(1)
        .mount(&test_agent.list_server)
        .await;
}

async fn mount_update(test_agent: &TestAgent, email: &str, expected_calls: u64) {
    Mock::given(path(format!("/subscribers/{}.json", LIST_ID)))
        .and(method("PUT"))
        .and(query_param("email", email))
        .respond_with(ResponseTemplate::new(200))
        .named("Update subscriber")
        .expect(expected_calls)
        .mount(&test_agent.list_server)
        .await;
}

#[tokio::test]
async fn signup_creates_a_free_trial_subscriber() {
    let test_agent = TestAgent::spawn().await;
    mount_create(&test_agent).await;

    assert_ok!(test_agent.agent.signup("a@x.com", "2024-01-01").await);

    let bodies = test_agent.received_bodies().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["EmailAddress"], "a@x.com");
    assert_eq!(bodies[0]["Resubscribe"], false);
    assert_eq!(
        serde_json::Value::Object(custom_fields(&bodies[0])),
        serde_json::json!({
            "membership": "freetrial",
            "trialexpireddate": "2024-01-01",
            "signupdate": "2023-06-15",
            "lastactivitydate": "2023-06-15"
        })
    );
}

#[tokio::test]
async fn paid_upgrades_the_subscriber_to_premium() {
    let test_agent = TestAgent::spawn().await;
    mount_update(&test_agent, "a@x.com", 1).await;

    assert_ok!(test_agent.agent.paid("a@x.com", "2025-01-01").await);

    let bodies = test_agent.received_bodies().await;
    assert_eq!(
        serde_json::Value::Object(custom_fields(&bodies[0])),
        serde_json::json!({
            "membership": "premium",
            "paidexpireddate": "2025-01-01",
            "upgradedate": "2023-06-15"
        })
    );
}

#[tokio::test]
async fn update_events_send_their_fixed_attributes() {
    let test_cases = vec![
        ("signin", serde_json::json!({ "lastactivitydate": "2023-06-15" })),
        ("expired", serde_json::json!({ "membership": "expired" })),
        ("cancel", serde_json::json!({ "cancellationdate": "2023-06-15" })),
    ];

    for (event, expected_fields) in test_cases {
        let test_agent = TestAgent::spawn().await;
        mount_update(&test_agent, "frank@test.com", 1).await;

        let result = match event {
            "signin" => test_agent.agent.signin("frank@test.com").await,
            "expired" => test_agent.agent.expired("frank@test.com").await,
            _ => test_agent.agent.cancel("frank@test.com").await,
        };
        assert_ok!(result);

        let bodies = test_agent.received_bodies().await;
        assert_eq!(
            serde_json::Value::Object(custom_fields(&bodies[0])),
            expected_fields,
            "Unexpected custom fields for the {} event",
            event
        );
    }
}

#[tokio::test]
async fn update_events_fail_without_a_list_id() {
    let test_agent = TestAgent::spawn_with_lists(serde_json::json!([])).await;

    let err = assert_err!(test_agent.agent.expired("frank@test.com").await);

    assert!(err.is_invalid_input());
    assert_eq!(test_agent.received_requests().await.len(), 1);
}

#[tokio::test]
async fn shared_agent_serves_concurrent_calls() {
    let test_agent = TestAgent::spawn().await;
    mount_update(&test_agent, "frank@test.com", 2).await;

    let agent = Arc::new(test_agent.agent);
    let first = tokio::spawn({
        let agent = Arc::clone(&agent);
        async move { agent.signin("frank@test.com").await }
    });
    let second = tokio::spawn({
        let agent = Arc::clone(&agent);
        async move { agent.cancel("frank@test.com").await }
    });

    assert_ok!(first.await.unwrap());
    assert_ok!(second.await.unwrap());
    assert_eq!(test_agent.list_server.received_requests().await.unwrap().len(), 3);
}
