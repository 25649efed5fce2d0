use crate::helpers::test_client;

use models::ArticleQuery;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn article(id: &str, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "slug": title.to_lowercase().replace(' ', "-"),
        "content": "Isi berita yang cukup panjang untuk dipotong.",
        "published": true,
        "featured": false,
        "viewCount": 12,
        "createdAt": "2025-03-01T08:00:00Z",
        "author": { "id": "a1", "name": "Rina" },
        "category": { "id": "c1", "name": "Nasional", "slug": "nasional" }
    })
}

/// **VALUE**: The listing query is sent as URL parameters and the page is
/// decoded.
///
/// **WHY THIS MATTERS**: The public listing and the admin table both use it.
///
/// **BUG THIS CATCHES**: Would catch `None` filters serialized as empty
/// strings, which the server treats as "match nothing".
#[tokio::test]
async fn given_filtered_query_when_listing_then_params_sent_and_page_decoded() {
    // GIVEN
    let t = test_client().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .and(query_param("search", "banjir"))
        .and(query_param("published", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [article("1", "Banjir Jakarta"), article("2", "Banjir Bekasi")],
            "totalPages": 3
        })))
        .expect(1)
        .mount(&t.server)
        .await;

    let query = ArticleQuery::builder()
        .with_page(2)
        .with_limit(5)
        .with_search("banjir")
        .with_category("  ")
        .with_published(true)
        .build()
        .unwrap();

    // WHEN
    let page = t.client.list_articles(&query).await.unwrap();

    // THEN
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.data[0].title, "Banjir Jakarta");
    assert!(page.has_next(2));

    let received = t.server.received_requests().await.unwrap();
    let sent_query = received[0].url.query().unwrap_or_default().to_string();
    assert!(!sent_query.contains("category"));
}

#[tokio::test]
async fn given_empty_listing_when_listing_then_empty_page() {
    let t = test_client().await;
    Mock::given(path("/api/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&t.server)
        .await;

    let page = t
        .client
        .list_articles(&ArticleQuery::published())
        .await
        .unwrap();

    assert!(page.is_empty());
    assert_eq!(page.total_pages, 1);
}
