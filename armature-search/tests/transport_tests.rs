//! Exercises the OpenSearch-backed client against a mock HTTP server.

use armature_action::{ActionError, ActionFuture, ListenableActionFuture};
use armature_search::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenSearchClient {
    OpenSearchClient::new(ClientConfig::new(server.uri())).unwrap()
}

async fn wait<T>(future: ListenableActionFuture<T>) -> armature_action::Result<T>
where
    T: Clone + Send + Sync + 'static,
{
    tokio::task::spawn_blocking(move || future.action_get_str("5s"))
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_index_document() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/posts/_doc/1"))
        .and(body_json(json!({ "title": "hi" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_index": "posts", "_id": "1", "_version": 1, "result": "created"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut request = Requests::index_request();
    request.index("posts").doc_type("article").id("1");
    request.source = Some(json!({ "title": "hi" }));

    let future = ListenableActionFuture::<IndexResponse>::new();
    client.execute_index(request, Box::new(future.clone()));

    let response = wait(future).await.unwrap();
    assert!(response.created());
    assert_eq!(response.id(), Some("1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_missing_document_is_a_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/_doc/7"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "_index": "posts", "_id": "7", "found": false
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut request = Requests::get_request("posts");
    request.id("7");

    let future = ListenableActionFuture::<GetResponse>::new();
    client.execute_get(request, Box::new(future.clone()));

    let response = wait(future).await.unwrap();
    assert!(!response.exists());
    assert_eq!(response.source(), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remote_error_reaches_failure_channel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts/_search"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "type": "parsing_exception", "reason": "unknown query [nope]" },
            "status": 400
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut request = Requests::search_request();
    request.indices(["posts"]).source(json!({ "query": { "nope": {} } }));

    let future = ListenableActionFuture::<SearchResponse>::new();
    client.execute_search(request, Box::new(future.clone()));

    assert_eq!(
        wait(future).await.unwrap_err(),
        ActionError::Remote {
            status: 400,
            reason: "unknown query [nope]".to_string()
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_request_never_reaches_the_cluster() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let future = ListenableActionFuture::<GetResponse>::new();
    client.execute_get(Requests::get_request("posts"), Box::new(future.clone()));

    assert_eq!(
        wait(future).await.unwrap_err(),
        ActionError::Validation(vec!["id is missing".to_string()])
    );
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bulk_sends_ndjson() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_bulk"))
        .and(header("content-type", "application/x-ndjson"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "took": 2,
            "errors": false,
            "items": [{ "index": { "_id": "1", "status": 201 } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut item = IndexRequest::default();
    item.index("posts").id("1");
    item.source = Some(json!({ "n": 1 }));
    let mut request = BulkRequest::default();
    request.add(item);

    let future = ListenableActionFuture::<BulkResponse>::new();
    client.execute_bulk(request, Box::new(future.clone()));

    let response = wait(future).await.unwrap();
    assert!(!response.has_failures());
    assert_eq!(response.items().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_admin_cluster_health_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_cluster/health"))
        .and(query_param("wait_for_status", "yellow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cluster_name": "dev", "status": "yellow", "timed_out": false, "number_of_nodes": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut request = ClusterHealthRequest::default();
    request.wait_for_status("yellow");

    let future = ListenableActionFuture::<ClusterHealthResponse>::new();
    client
        .admin_client()
        .execute_cluster_health(request, Box::new(future.clone()));

    let response = wait(future).await.unwrap();
    assert_eq!(response.status(), Some("yellow"));
    assert_eq!(response.cluster_name(), Some("dev"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_missing_document_is_a_response() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/posts/_doc/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "_index": "posts", "_id": "9", "result": "not_found"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut request = DeleteRequest::default();
    request.index("posts").id("9");

    let future = ListenableActionFuture::<DeleteResponse>::new();
    client.execute_delete(request, Box::new(future.clone()));

    assert!(!wait(future).await.unwrap().found());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_json_error_page_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts/_search"))
        .respond_with(
            ResponseTemplate::new(503).set_body_string("<html>Service Unavailable</html>"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut request = Requests::search_request();
    request.indices(["posts"]);

    let future = ListenableActionFuture::<SearchResponse>::new();
    client.execute_search(request, Box::new(future.clone()));

    assert_eq!(
        wait(future).await.unwrap_err(),
        ActionError::Remote {
            status: 503,
            reason: "Service Unavailable".to_string()
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_error_body_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_refresh"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let future = ListenableActionFuture::<RefreshResponse>::new();
    client
        .admin_client()
        .execute_refresh(RefreshRequest::default(), Box::new(future.clone()));

    assert!(matches!(
        wait(future).await.unwrap_err(),
        ActionError::Remote { status: 502, .. }
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_compression_disabled_asks_for_identity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_cluster/health"))
        .and(header("accept-encoding", "identity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cluster_name": "dev", "status": "green"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        OpenSearchClient::new(ClientConfig::new(server.uri()).with_compression(false)).unwrap();
    let future = ListenableActionFuture::<ClusterHealthResponse>::new();
    client
        .admin_client()
        .execute_cluster_health(ClusterHealthRequest::default(), Box::new(future.clone()));

    assert_eq!(wait(future).await.unwrap().status(), Some("green"));
}
