//! Integration tests for `CuelinksClient` using wiremock HTTP mocks.

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vaani_cuelinks::{CuelinksClient, CuelinksError};

fn test_client(base_url: &str) -> CuelinksClient {
    CuelinksClient::with_base_url("test-key", 5, "vaani-test/0.1", base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn search_products_sends_auth_and_keyword() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/product_feeds.json"))
        .and(query_param("keyword", "running shoes"))
        .and(header("authorization", "Token token=\"test-key\""))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [
                {"name": "A", "price": "20", "url": "https://a", "merchant_name": "Amazon"},
                {"title": "B", "price": "10", "affiliate_link": "https://b"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let products = client
        .search_products("running shoes")
        .await
        .expect("should parse products");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].merchant_name.as_ref().and_then(Value::as_str), Some("Amazon"));
    assert_eq!(products[1].affiliate_link.as_ref().and_then(Value::as_str), Some("https://b"));
}

#[tokio::test]
async fn search_products_reads_items_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/product_feeds.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"name": "Only", "price": 99}]
        })))
        .mount(&server)
        .await;

    let products = test_client(&server.uri())
        .search_products("phone")
        .await
        .expect("should parse items");

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name.as_ref().and_then(Value::as_str), Some("Only"));
}

#[tokio::test]
async fn search_products_returns_empty_when_no_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/product_feeds.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 0})))
        .mount(&server)
        .await;

    let products = test_client(&server.uri())
        .search_products("nothing")
        .await
        .expect("missing collection is not an error");

    assert!(products.is_empty());
}

#[tokio::test]
async fn search_products_non_json_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/product_feeds.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .search_products("shoes")
        .await
        .expect_err("html body should fail");

    assert!(
        matches!(err, CuelinksError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn search_products_non_2xx_json_body_is_read_as_feed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/product_feeds.json"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "invalid token"})),
        )
        .mount(&server)
        .await;

    let products = test_client(&server.uri())
        .search_products("shoes")
        .await
        .expect("a JSON error body is not a client error");

    assert!(products.is_empty());
}

#[tokio::test]
async fn search_products_non_2xx_non_json_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/product_feeds.json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .search_products("shoes")
        .await
        .expect_err("plain-text 503 should fail");

    assert!(
        matches!(err, CuelinksError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn search_products_tolerates_non_string_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/product_feeds.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [
                {"name": "Good", "price": "10", "url": "u"},
                {"name": 12345, "price": "20", "merchant_name": {"id": 7}}
            ]
        })))
        .mount(&server)
        .await;

    let products = test_client(&server.uri())
        .search_products("shoes")
        .await
        .expect("odd field types should not fail the search");

    assert_eq!(products.len(), 2);
    assert_eq!(products[1].name, Some(json!(12345)));
}

#[tokio::test]
async fn search_products_respects_base_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/product_feeds.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .expect(1)
        .mount(&server)
        .await;

    let products = test_client(&format!("{}/v2", server.uri()))
        .search_products("shoes")
        .await
        .expect("should reach nested path");

    assert!(products.is_empty());
}

#[tokio::test]
async fn search_products_connection_refused_is_http_error() {
    // Nothing listens on port 9 on loopback in test environments.
    let err = test_client("http://127.0.0.1:9")
        .search_products("shoes")
        .await
        .expect_err("no server");

    assert!(matches!(err, CuelinksError::Http(_)), "got: {err:?}");
}
