use std::time::Duration;

use dataseed_batch::Caller;
use dataseed_core::{CallOutcome, WorkItem};
use dataseed_remote::{DescriptionAgent, DescriptionAgentConfig, Registrar, RegistrarConfig};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_item() -> WorkItem {
    WorkItem::new(
        "john.smith@gmail.com",
        json!({
            "username": "john.smith",
            "userMail": "john.smith@gmail.com",
            "userPhoneNumber": "1000000001",
            "password": "s3cret!pw"
        }),
    )
}

fn registrar(server: &MockServer, timeout: Duration) -> Registrar {
    Registrar::new(RegistrarConfig {
        endpoint: format!("{}/apiGateway/member/register", server.uri()),
        timeout,
    })
    .expect("build registrar")
}

fn agent(server: &MockServer) -> DescriptionAgent {
    DescriptionAgent::new(DescriptionAgentConfig {
        endpoint: format!("{}/v1/conversations", server.uri()),
        agent_id: "ag_test".to_string(),
        api_key: "test-key-0123456789".to_string(),
        timeout: Duration::from_secs(5),
    })
    .expect("build agent")
}

#[tokio::test]
async fn registrar_posts_user_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apiGateway/member/register"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({
            "username": "john.smith",
            "userMail": "john.smith@gmail.com",
            "userPhoneNumber": "1000000001",
            "password": "s3cret!pw"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = registrar(&server, Duration::from_secs(5))
        .call(&user_item())
        .await;

    assert_eq!(outcome, CallOutcome::success(json!({ "status": 201 })));
}

#[tokio::test]
async fn registrar_treats_conflict_as_permanent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(409).set_body_string("duplicate username"))
        .mount(&server)
        .await;

    let outcome = registrar(&server, Duration::from_secs(5))
        .call(&user_item())
        .await;

    assert_eq!(
        outcome,
        CallOutcome::permanent("User already exists: duplicate username")
    );
}

#[tokio::test]
async fn registrar_retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let outcome = registrar(&server, Duration::from_secs(5))
        .call(&user_item())
        .await;

    assert_eq!(outcome, CallOutcome::transient("HTTP 503: unavailable"));
}

#[tokio::test]
async fn registrar_times_out_as_transient() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let outcome = registrar(&server, Duration::from_millis(100))
        .call(&user_item())
        .await;

    assert_eq!(outcome, CallOutcome::transient("Request timeout"));
}

#[tokio::test]
async fn registrar_rejects_items_without_user_fields() {
    let server = MockServer::start().await;
    let outcome = registrar(&server, Duration::from_secs(5))
        .call(&WorkItem::bare("nobody"))
        .await;

    assert!(matches!(outcome, CallOutcome::PermanentFailure { .. }));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn agent_extracts_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/conversations"))
        .and(header("x-api-key", "test-key-0123456789"))
        .and(body_json(json!({
            "agent_id": "ag_test",
            "inputs": "Generate product description for: Sony Alpha Camera"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "conversation_id": "conv_1",
            "outputs": [{ "type": "message.output", "content": "A sharp mirrorless camera." }],
            "usage": { "total_tokens": 42 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = agent(&server)
        .call(&WorkItem::bare("Sony Alpha Camera"))
        .await;

    assert_eq!(
        outcome,
        CallOutcome::success(json!({
            "description": "A sharp mirrorless camera.",
            "conversation_id": "conv_1",
            "tokens_used": 42
        }))
    );
}

#[tokio::test]
async fn agent_without_outputs_is_permanent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "outputs": [] })))
        .mount(&server)
        .await;

    let outcome = agent(&server).call(&WorkItem::bare("Lamp")).await;

    assert_eq!(outcome, CallOutcome::permanent("No output in response"));
}

#[tokio::test]
async fn agent_rate_limit_is_transient_and_auth_failure_is_permanent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/conversations"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/conversations"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let agent = agent(&server);
    let first = agent.call(&WorkItem::bare("Lamp")).await;
    let second = agent.call(&WorkItem::bare("Lamp")).await;

    assert!(matches!(first, CallOutcome::TransientFailure { .. }));
    assert_eq!(second, CallOutcome::permanent("HTTP 401: bad key"));
}
