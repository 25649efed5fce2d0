use crate::{Article, ArticlePage};

fn article_with_content(content: &str) -> Article {
    Article {
        id: String::from("a-1"),
        title: String::from("Judul"),
        slug: String::from("judul"),
        content: content.to_string(),
        image: None,
        image_url: None,
        published: true,
        featured: false,
        view_count: 0,
        published_at: None,
        created_at: String::from("2024-05-01T08:00:00.000Z"),
        author: None,
        category: None,
    }
}

/// **VALUE**: Verifies the wire format of the listing endpoint.
///
/// **WHY THIS MATTERS**: The server sends camelCase keys (`totalPages`,
/// `viewCount`, `imageUrl`). A missing rename silently yields defaults and
/// the console shows a single page of zero-view articles.
#[test]
fn given_camel_case_listing_when_deserialized_then_maps_all_fields() {
    // GIVEN: A listing payload as the API returns it
    let json = serde_json::json!({
        "data": [{
            "id": "a-1",
            "title": "Banjir di Kota",
            "slug": "banjir-di-kota",
            "content": "Isi berita",
            "imageUrl": "/uploads/banjir.jpg",
            "published": true,
            "featured": true,
            "viewCount": 42,
            "publishedAt": "2024-05-02T10:00:00.000Z",
            "createdAt": "2024-05-01T08:00:00.000Z",
            "author": { "id": "u-1", "name": "Sari" },
            "category": { "id": "c-1", "name": "Lokal", "slug": "lokal" }
        }],
        "totalPages": 4
    });

    // WHEN: Deserializing
    let page: ArticlePage = serde_json::from_value(json).unwrap();

    // THEN: Every field is populated
    assert_eq!(page.total_pages, 4);
    let article = &page.data[0];
    assert_eq!(article.image_url.as_deref(), Some("/uploads/banjir.jpg"));
    assert_eq!(article.view_count, 42);
    assert!(article.featured);
    assert_eq!(article.author.as_ref().unwrap().name, "Sari");
    assert_eq!(article.category.as_ref().unwrap().slug, "lokal");
    assert_eq!(article.display_date(), "2024-05-02T10:00:00.000Z");
    assert!(page.has_next(3));
    assert!(!page.has_next(4));
}

/// **VALUE**: A payload without `totalPages` still yields one page.
#[test]
fn given_listing_without_total_pages_when_deserialized_then_defaults_to_one() {
    let page: ArticlePage = serde_json::from_value(serde_json::json!({ "data": [] })).unwrap();

    assert!(page.is_empty());
    assert_eq!(page.total_pages, 1);
}

#[test]
fn given_short_content_when_excerpted_then_returned_unchanged() {
    let article = article_with_content("Singkat.");

    assert_eq!(article.excerpt(150), "Singkat.");
}

/// **VALUE**: Verifies truncation counts characters, not bytes.
///
/// **BUG THIS CATCHES**: Would catch byte slicing, which panics on multi-byte
/// characters at the cut point.
#[test]
fn given_long_multibyte_content_when_excerpted_then_cuts_on_char_boundary() {
    let article = article_with_content("éééééé");

    assert_eq!(article.excerpt(4), "éééé...");
    assert_eq!(article.display_date(), "2024-05-01T08:00:00.000Z");
}
