use crate::common::{client_for, mount_rpc, API_PATH};
use piazza_api::rpc::{ApiResponse, UserStatus, API_CONTENT_TYPE};
use piazza_api::PiazzaError;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_call_sends_method_and_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(query_param("method", "network.get_my_feed"))
        .and(header("content-type", API_CONTENT_TYPE))
        .and(body_json(json!({
            "method": "network.get_my_feed",
            "params": {"nid": "cls1"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"feed": [{"id": "p1", "subject": "Welcome"}]},
            "error": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let feed = client.feed("cls1").await.expect("feed call failed");

    assert_eq!(feed.feed.len(), 1);
    assert_eq!(feed.feed[0].subject, "Welcome");
}

#[tokio::test]
async fn test_aid_attached_only_after_status() {
    let mock_server = MockServer::start().await;

    mount_rpc(
        &mock_server,
        "user.status",
        json!({"aid": "aid-123", "error": null, "result": {"networks": []}}),
    )
    .await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(query_param("method", "content.get"))
        .and(query_param("aid", "aid-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"id": "p1", "history": [{"content": "hello"}]},
            "error": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    assert_eq!(client.session().state().aid(), None);

    client.user_status().await.expect("status call failed");
    assert_eq!(client.session().state().aid(), Some("aid-123"));

    let post = client.content("cls1", "p1").await.expect("content call failed");
    assert_eq!(post.history[0].content, "hello");

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].url.query_pairs().all(|(key, _)| key != "aid"));
}

#[tokio::test]
async fn test_status_overwrites_aid() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(query_param("method", "user.status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "aid": "first", "error": null, "result": {}
        })))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    mount_rpc(
        &mock_server,
        "user.status",
        json!({"aid": "second", "error": null, "result": {}}),
    )
    .await;

    let mut client = client_for(&mock_server);
    client.user_status().await.unwrap();
    assert_eq!(client.session().state().aid(), Some("first"));
    client.user_status().await.unwrap();
    assert_eq!(client.session().state().aid(), Some("second"));
}

#[tokio::test]
async fn test_http_500_is_a_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("not json at all"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result: Result<ApiResponse<UserStatus>, _> =
        client.call_into("user.status", &json!({})).await;

    match result {
        Err(PiazzaError::Status { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_decode_error_names_method() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result: Result<ApiResponse<UserStatus>, _> =
        client.call_into("user.status", &json!({})).await;

    match result {
        Err(PiazzaError::Decode { context, .. }) => assert!(context.contains("user.status")),
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_service_error_is_left_to_caller() {
    let mock_server = MockServer::start().await;

    mount_rpc(
        &mock_server,
        "network.get_my_feed",
        json!({"result": null, "error": "Not authorized"}),
    )
    .await;

    let client = client_for(&mock_server);

    let raw: ApiResponse<serde_json::Value> = client
        .call_into("network.get_my_feed", &json!({"nid": "cls1"}))
        .await
        .expect("typed call should succeed");
    assert_eq!(raw.service_error(), Some("Not authorized".to_string()));

    match client.feed("cls1").await {
        Err(PiazzaError::Service { method, message }) => {
            assert_eq!(method, "network.get_my_feed");
            assert_eq!(message, "Not authorized");
        }
        other => panic!("expected service error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_untyped_call_returns_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(query_param("method", "user.update"))
        .respond_with(ResponseTemplate::new(200).set_body_string("anything"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let body = client.call("user.update", &json!({})).await.unwrap();
    assert_eq!(body, "anything");
}

#[tokio::test]
async fn test_opt_out_of_emails() {
    let mock_server = MockServer::start().await;

    mount_rpc(
        &mock_server,
        "user.status",
        json!({
            "aid": "aid-9",
            "error": null,
            "result": {"config": {"email_prefs": {
                "career": {"new": "all"},
                "cls1": {"new": "all", "updates": "real-time"}
            }}}
        }),
    )
    .await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(query_param("method", "user.update"))
        .and(query_param("aid", "aid-9"))
        .and(body_json(json!({
            "method": "user.update",
            "params": {"email_prefs": {
                "cls1": {"new": "no-emails", "updates": "real-time"}
            }}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "OK"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    assert_eq!(client.opt_out_of_emails().await.unwrap(), 1);
}
