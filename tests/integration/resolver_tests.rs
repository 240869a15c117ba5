use crate::common::{anchor, mount_rpc, resolver_for, API_PATH};
use piazza_api::PiazzaError;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RESOURCE_PATH: &str = "/ubc.ca/winterterm12016/cpsc416/resources";

fn status_with_networks(networks: serde_json::Value) -> serde_json::Value {
    json!({"aid": "aid-1", "error": null, "result": {"networks": networks}})
}

fn cpsc416() -> serde_json::Value {
    json!({
        "id": "cls1",
        "name": "Distributed Systems",
        "school_ext": "ubc.ca",
        "term": "Winter Term 1 2016",
        "course_number": "CPSC 416"
    })
}

#[tokio::test]
async fn test_root_lists_sorted_unique_classes() {
    let mock_server = MockServer::start().await;
    mount_rpc(
        &mock_server,
        "user.status",
        status_with_networks(json!([
            {"id": "zeta"},
            {"id": "alpha"},
            {"id": ""},
            {"id": "zeta"}
        ])),
    )
    .await;

    let mut resolver = resolver_for(&mock_server);
    let html = resolver.get("piazza://").await.expect("root resolve failed");

    assert_eq!(html, anchor("piazza://alpha") + &anchor("piazza://zeta"));
    assert!(resolver.network("alpha").is_some());
    assert!(resolver.network("").is_none());
}

#[tokio::test]
async fn test_root_without_classes_is_empty() {
    let mock_server = MockServer::start().await;
    mount_rpc(&mock_server, "user.status", status_with_networks(json!([]))).await;

    let mut resolver = resolver_for(&mock_server);
    assert_eq!(resolver.get("piazza://").await.unwrap(), "");
}

#[tokio::test]
async fn test_class_before_root_makes_no_requests() {
    let mock_server = MockServer::start().await;

    let mut resolver = resolver_for(&mock_server);
    let result = resolver.get("piazza://cls1").await;

    assert!(matches!(result, Err(PiazzaError::NotResolved { .. })));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_wrong_scheme_makes_no_requests() {
    let mock_server = MockServer::start().await;

    let mut resolver = resolver_for(&mock_server);
    for address in ["https://cls1/p1", "https://", "http://"] {
        let result = resolver.get(address).await;
        assert!(
            matches!(result, Err(PiazzaError::Scheme { .. })),
            "{} gave {:?}",
            address,
            result
        );
    }
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_class_lists_resource_page_then_threads() {
    let mock_server = MockServer::start().await;
    mount_rpc(&mock_server, "user.status", status_with_networks(json!([cpsc416()]))).await;

    let resource_page =
        r#"<html><body><a href="https://example.com/syllabus.pdf">Syllabus</a></body></html>"#;
    Mock::given(method("GET"))
        .and(path(RESOURCE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(resource_page))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(query_param("method", "network.get_my_feed"))
        .and(query_param("aid", "aid-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": null,
            "result": {"feed": [
                {"id": "p1", "subject": "Welcome"},
                {"id": "", "subject": "broken"},
                {"id": "p2", "subject": "Assignment 1"}
            ]}
        })))
        .mount(&mock_server)
        .await;

    let mut resolver = resolver_for(&mock_server);
    resolver.get("piazza://").await.unwrap();
    let html = resolver.get("piazza://cls1").await.expect("class resolve failed");

    let expected = format!(
        "{}{}{}{}",
        resource_page,
        anchor("https://example.com/syllabus.pdf"),
        anchor("piazza://cls1/p1"),
        anchor("piazza://cls1/p2")
    );
    assert_eq!(html, expected);
}

#[tokio::test]
async fn test_class_tolerates_missing_resource_page() {
    let mock_server = MockServer::start().await;
    mount_rpc(&mock_server, "user.status", status_with_networks(json!([cpsc416()]))).await;
    mount_rpc(
        &mock_server,
        "network.get_my_feed",
        json!({"error": null, "result": {"feed": [{"id": "p1"}]}}),
    )
    .await;

    let mut resolver = resolver_for(&mock_server);
    resolver.get("piazza://").await.unwrap();
    let html = resolver.get("piazza://cls1").await.expect("class resolve failed");

    assert_eq!(html, anchor("piazza://cls1/p1"));
}

#[tokio::test]
async fn test_class_keeps_resource_page_bytes_as_served() {
    let mock_server = MockServer::start().await;
    mount_rpc(&mock_server, "user.status", status_with_networks(json!([cpsc416()]))).await;
    mount_rpc(
        &mock_server,
        "network.get_my_feed",
        json!({"error": null, "result": {"feed": []}}),
    )
    .await;

    // UTF-8 bytes under a Latin-1 label must not be transcoded.
    let resource_page = "<p>Caf\u{e9} r\u{e9}sum\u{e9}s</p>";
    Mock::given(method("GET"))
        .and(path(RESOURCE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            resource_page.as_bytes().to_vec(),
            "text/html; charset=iso-8859-1",
        ))
        .mount(&mock_server)
        .await;

    let mut resolver = resolver_for(&mock_server);
    resolver.get("piazza://").await.unwrap();
    let html = resolver.get("piazza://cls1").await.expect("class resolve failed");

    assert_eq!(html, resource_page);
}

#[tokio::test]
async fn test_class_feed_failure_aborts() {
    let mock_server = MockServer::start().await;
    mount_rpc(&mock_server, "user.status", status_with_networks(json!([cpsc416()]))).await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(query_param("method", "network.get_my_feed"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let mut resolver = resolver_for(&mock_server);
    resolver.get("piazza://").await.unwrap();
    let result = resolver.get("piazza://cls1").await;

    assert!(matches!(result, Err(PiazzaError::Status { status: 500, .. })));
}

#[tokio::test]
async fn test_post_renders_whole_reply_tree() {
    let mock_server = MockServer::start().await;
    mount_rpc(&mock_server, "user.status", status_with_networks(json!([cpsc416()]))).await;
    mount_rpc(
        &mock_server,
        "content.get",
        json!({
            "error": null,
            "result": {
                "id": "p1",
                "history": [
                    {"content": "Q2 see http://q.com/v2"},
                    {"content": "Q1"}
                ],
                "children": [
                    {
                        "id": "b",
                        "history": [{"content": "B\\nhttp://b.com"}],
                        "children": [
                            {"id": "d", "history": [{"content": "D"}], "children": []}
                        ]
                    },
                    {"id": "followup", "type": "followup", "subject": "no history"},
                    {"id": "c", "history": [{"content": "C"}]}
                ]
            }
        }),
    )
    .await;

    let mut resolver = resolver_for(&mock_server);
    resolver.get("piazza://").await.unwrap();
    let html = resolver.get("piazza://cls1/p1").await.expect("post resolve failed");

    let expected = format!(
        "Q2 see http://q.com/v2{}Q1B\\nhttp://b.com{}DC",
        anchor("http://q.com/v2"),
        anchor("http://b.com")
    );
    assert_eq!(html, expected);

    let requests = mock_server.received_requests().await.unwrap();
    let content_request = requests
        .iter()
        .find(|r| r.url.query_pairs().any(|(k, v)| k == "method" && v == "content.get"))
        .expect("no content.get request");
    let body: serde_json::Value = serde_json::from_slice(&content_request.body).unwrap();
    assert_eq!(body["params"], json!({"cid": "p1", "nid": "cls1"}));
}

#[tokio::test]
async fn test_post_of_unknown_class_fails() {
    let mock_server = MockServer::start().await;
    mount_rpc(&mock_server, "user.status", status_with_networks(json!([cpsc416()]))).await;

    let mut resolver = resolver_for(&mock_server);
    resolver.get("piazza://").await.unwrap();
    let result = resolver.get("piazza://other/p1").await;

    match result {
        Err(PiazzaError::NotResolved { class_id }) => assert_eq!(class_id, "other"),
        other => panic!("expected NotResolved, got {:?}", other),
    }
}
