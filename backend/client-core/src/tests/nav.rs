use crate::session::nav::{DASHBOARD_PATH, USER_MANAGEMENT_PATH};
use crate::session::{AdminNav, GuardPolicy};

use models::UserIdentity;

/// **VALUE**: Only the admin role sees the user-management entry.
///
/// **WHY THIS MATTERS**: Editors must not be offered a page the server will
/// refuse.
///
/// **BUG THIS CATCHES**: Would catch the menu ignoring the role claim.
#[test]
fn given_admin_role_when_building_nav_then_user_management_listed() {
    let user = UserIdentity::new("1", "Dewi");

    let nav = AdminNav::for_route(
        "/admin/dashboard",
        &GuardPolicy::default(),
        Some(&user),
        Some("admin"),
    )
    .unwrap();

    assert!(nav.has_entry(DASHBOARD_PATH));
    assert!(nav.has_entry(USER_MANAGEMENT_PATH));
    assert_eq!(nav.user_label, "Dewi (admin)");
}

#[test]
fn given_editor_role_when_building_nav_then_only_dashboard() {
    let user = UserIdentity::new("2", "Budi");

    let nav = AdminNav::for_route(
        "/admin/dashboard",
        &GuardPolicy::default(),
        Some(&user),
        Some("editor"),
    )
    .unwrap();

    assert!(nav.has_entry(DASHBOARD_PATH));
    assert!(!nav.has_entry(USER_MANAGEMENT_PATH));
    assert_eq!(nav.user_label, "Budi (editor)");
}

#[test]
fn given_no_role_when_building_nav_then_label_is_name_only() {
    let user = UserIdentity::new("3", "Sari");

    let nav = AdminNav::for_route("/admin", &GuardPolicy::default(), Some(&user), None).unwrap();

    assert_eq!(nav.entries.len(), 1);
    assert_eq!(nav.user_label, "Sari");
}

#[test]
fn given_login_route_when_building_nav_then_no_shell() {
    let nav = AdminNav::for_route("/admin/login", &GuardPolicy::default(), None, Some("admin"));

    assert_eq!(nav, None);
}
