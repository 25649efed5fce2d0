use crate::UserIdentity;

#[test]
fn given_admin_role_when_checked_then_is_admin() {
    let admin = UserIdentity::new("u-1", "Rina").with_role("admin");
    let editor = UserIdentity::new("u-2", "Budi").with_role("editor");
    let unknown = UserIdentity::new("u-3", "Tono");

    assert!(admin.is_admin());
    assert!(!editor.is_admin());
    assert!(!unknown.is_admin());
}

/// **VALUE**: Verifies that the login response's user payload deserializes
/// with optional fields absent.
#[test]
fn given_user_without_email_or_role_when_deserialized_then_fields_are_none() {
    let user: UserIdentity =
        serde_json::from_value(serde_json::json!({ "id": "u-1", "name": "Rina" })).unwrap();

    assert_eq!(user, UserIdentity::new("u-1", "Rina"));
}
