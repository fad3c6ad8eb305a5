mod harness;

use harness::config::ConfigBuilder;
use harness::server::TestServer;

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server.client().get(server.url("/health")).send().await.unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers().get("content-type").unwrap(), "application/json");

    let body: serde_json::Value = serde_json::from_str(&resp.text().await.unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({ "status": "ok", "error_reporting": true }));
}

#[tokio::test]
async fn health_shows_reporting_disabled() {
    let server = TestServer::start(ConfigBuilder::new().without_reporting().build())
        .await
        .unwrap();

    let resp = server.client().get(server.url("/health")).send().await.unwrap();
    let body: serde_json::Value = serde_json::from_str(&resp.text().await.unwrap()).unwrap();

    assert_eq!(body["error_reporting"], false);
}

#[tokio::test]
async fn health_endpoint_disabled_is_reported_as_not_found() {
    let config = ConfigBuilder::new().without_health().build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server.client().get(server.url("/health")).send().await.unwrap();

    assert_eq!(resp.status(), 404);
    let body = resp.text().await.unwrap();
    assert_eq!(body, r#"{"errors":[{"status":"404","title":"Not Found"}]}"#);
}
