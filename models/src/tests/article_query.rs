use crate::article::query::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::{ArticleQuery, ModelError};

/// **VALUE**: Verifies that the builder rejects page zero.
///
/// **WHY THIS MATTERS**: Pages are 1-based on the server. Page 0 returns an
/// empty listing that looks like "no articles" instead of a caller bug.
///
/// **BUG THIS CATCHES**: Would catch the page check being removed or the
/// default changing to 0.
#[test]
fn given_zero_page_when_building_query_then_returns_validation_error() {
    // GIVEN: Builder with page set to zero
    let builder = ArticleQuery::builder().with_page(0);

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Page must be at least 1");
        }
        Ok(query) => panic!("Expected validation error, got {query:?}"),
    }
}

/// **VALUE**: Verifies the limit bounds.
///
/// **BUG THIS CATCHES**: Would catch an unbounded limit that lets a caller
/// request the whole table in one page.
#[test]
fn given_out_of_range_limit_when_building_query_then_returns_validation_error() {
    assert!(ArticleQuery::builder().with_limit(0).build().is_err());
    assert!(
        ArticleQuery::builder()
            .with_limit(MAX_PAGE_SIZE + 1)
            .build()
            .is_err()
    );
    assert!(
        ArticleQuery::builder()
            .with_limit(MAX_PAGE_SIZE)
            .build()
            .is_ok()
    );
}

/// **VALUE**: Verifies that blank filters are dropped.
///
/// **WHY THIS MATTERS**: A cleared search box yields `""`. Sending `search=`
/// makes some backends match nothing; the filter must simply be omitted.
#[test]
fn given_blank_search_and_category_when_building_then_filters_are_none() {
    // GIVEN: Blank and whitespace-only filters
    let query = ArticleQuery::builder()
        .with_search("   ")
        .with_category("")
        .build()
        .unwrap();

    // THEN: Both are omitted, defaults applied
    assert_eq!(query.search, None);
    assert_eq!(query.category, None);
    assert_eq!(query.page, 1);
    assert_eq!(query.limit, DEFAULT_PAGE_SIZE);
    assert_eq!(query.published, None);
}

#[test]
fn given_search_with_padding_when_building_then_is_trimmed() {
    let query = ArticleQuery::builder()
        .with_page(3)
        .with_search("  pemilu ")
        .with_category("politik")
        .with_published(true)
        .build()
        .unwrap();

    assert_eq!(query.page, 3);
    assert_eq!(query.search.as_deref(), Some("pemilu"));
    assert_eq!(query.category.as_deref(), Some("politik"));
    assert_eq!(query.published, Some(true));
}

/// **VALUE**: Verifies that absent filters are not serialized.
///
/// **WHY THIS MATTERS**: The query struct is serialized straight into the URL.
/// `search=null` would be sent as a literal search term.
#[test]
fn given_public_listing_query_when_serialized_then_omits_absent_filters() {
    let query = ArticleQuery::published();

    let json = serde_json::to_value(&query).unwrap();

    assert_eq!(
        json,
        serde_json::json!({ "page": 1, "limit": 12, "published": true })
    );
}
