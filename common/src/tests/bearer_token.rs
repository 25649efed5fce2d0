use crate::BearerToken;

/// **VALUE**: Verifies that the token never leaks through `Debug` or `Display`.
///
/// **WHY THIS MATTERS**: Sessions are logged at info/debug level all over the
/// client. A `{:?}` on a struct holding the token must not write the credential
/// into `newsdesk.log`.
///
/// **BUG THIS CATCHES**: Would catch a derived `Debug` replacing the manual impl.
#[test]
fn given_token_when_formatted_then_value_is_redacted() {
    // GIVEN: A token with a recognizable value
    let token = BearerToken::new("eyJhbGciOiJIUzI1NiJ9.secret-claims.sig");

    // WHEN: Formatting with Debug and Display
    let debug = format!("{:?}", token);
    let display = format!("{}", token);

    // THEN: Neither contains the raw value
    assert!(!debug.contains("secret-claims"));
    assert!(!display.contains("secret-claims"));
    assert!(debug.contains("REDACTED"));
}

/// **VALUE**: Verifies the `Authorization` header value format.
///
/// **WHY THIS MATTERS**: The API only accepts `Bearer <token>`; any other
/// prefix is an instant 401 and a forced logout.
#[test]
fn given_token_when_building_authorization_value_then_uses_bearer_scheme() {
    let token = BearerToken::new("abc.def.ghi");

    assert_eq!(token.authorization_value(), "Bearer abc.def.ghi");
    assert_eq!(token.expose(), "abc.def.ghi");
    assert_eq!(token.len(), 11);
}

/// **VALUE**: Whitespace-only tokens count as empty.
///
/// **BUG THIS CATCHES**: Would catch a session being stored from a blank
/// storage entry, which would send `Bearer    ` on every request.
#[test]
fn given_blank_token_when_checked_then_is_empty() {
    assert!(BearerToken::new("").is_empty());
    assert!(BearerToken::new("   ").is_empty());
    assert!(!BearerToken::new("t").is_empty());
}

/// **VALUE**: Implicit serialization is refused.
///
/// **WHY THIS MATTERS**: Persisting a session must go through `expose()` so
/// every write of the raw token is visible in code review.
#[test]
fn given_token_when_serialized_then_fails() {
    let token = BearerToken::new("abc");

    let result = serde_json::to_string(&token);

    assert!(result.is_err(), "BearerToken must not serialize implicitly");
}
