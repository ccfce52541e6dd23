//! Tests for [`web_search::TavilySearch`] against a mocked Tavily endpoint.

use mockito::{Matcher, Server};
use web_search::{TavilySearch, WebSearch};

/// **Test: Results are parsed and the request carries query, limit and bearer key.**
///
/// **Setup:** Mock `/search` expecting `{"query": "...", "max_results": 2}`.
/// **Action:** `search("ipl final score")`.
/// **Expected:** Two results in provider order with title/url/content/score.
#[tokio::test]
async fn test_search_parses_results() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/search")
        .match_header("authorization", "Bearer tvly-test")
        .match_body(Matcher::PartialJsonString(
            r#"{"query":"ipl final score","max_results":2}"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"query":"ipl final score","results":[
                {"title":"Final","url":"https://a.example/final","content":"Team A won.","score":0.91},
                {"title":"Recap","url":"https://b.example/recap","content":"Highlights.","score":0.5}
            ]}"#,
        )
        .create_async()
        .await;

    let search = TavilySearch::new("tvly-test".to_string())
        .with_base_url(server.url())
        .with_max_results(2);
    let results = search.search("ipl final score").await.unwrap();

    mock.assert_async().await;
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Final");
    assert_eq!(results[0].url, "https://a.example/final");
    assert_eq!(results[0].content, "Team A won.");
    assert!((results[0].score - 0.91).abs() < 1e-9);
}

/// **Test: Empty result list and blank snippets yield an empty Vec, not an error.**
#[tokio::test]
async fn test_search_empty_results() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/search")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"results":[{"title":"x","url":"u","content":"   "}]}"#)
        .create_async()
        .await;

    let search = TavilySearch::new("k".to_string()).with_base_url(server.url());
    assert!(search.search("anything").await.unwrap().is_empty());
}

/// **Test: Non-success status is surfaced as an error with the status code.**
#[tokio::test]
async fn test_search_http_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/search")
        .with_status(401)
        .with_body(r#"{"detail":"invalid api key"}"#)
        .create_async()
        .await;

    let search = TavilySearch::new("bad".to_string()).with_base_url(server.url());
    let err = search.search("weather today").await.unwrap_err();
    assert!(err.to_string().contains("401"), "{}", err);
}
