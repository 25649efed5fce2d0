use super::guard::GuardPolicy;

use models::user::ADMIN_ROLE;
use models::UserIdentity;

use const_format::concatcp;

pub const DASHBOARD_PATH: &str = concatcp!(crate::ADMIN_ROUTE_PREFIX, "/dashboard");
pub const USER_MANAGEMENT_PATH: &str = concatcp!(crate::ADMIN_ROUTE_PREFIX, "/user-management");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub label: &'static str,
    pub path: &'static str,
}

/// The admin shell's header: menu entries gated by role, plus the user label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminNav {
    pub entries: Vec<NavEntry>,
    pub user_label: String,
}

impl AdminNav {
    /// Menu for `route`, or `None` on the login page, which renders no shell.
    pub fn for_route(
        route: &str,
        policy: &GuardPolicy,
        user: Option<&UserIdentity>,
        role: Option<&str>,
    ) -> Option<Self> {
        if policy.is_login(route) {
            return None;
        }

        let mut entries = vec![NavEntry {
            label: "Dashboard",
            path: DASHBOARD_PATH,
        }];

        if role == Some(ADMIN_ROLE) {
            entries.push(NavEntry {
                label: "User Management",
                path: USER_MANAGEMENT_PATH,
            });
        }

        let name = user.map(|u| u.name.as_str()).unwrap_or_default();
        let user_label = match role {
            Some(role) => format!("{name} ({role})"),
            None => name.to_string(),
        };

        Some(Self {
            entries,
            user_label,
        })
    }

    pub fn has_entry(&self, path: &str) -> bool {
        self.entries.iter().any(|e| e.path == path)
    }
}
