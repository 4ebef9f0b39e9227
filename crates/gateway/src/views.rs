//! View routing.
//!
//! Maps a requested view path and the current session to the view that
//! should be shown. Access outside the caller's role never yields an error
//! page: it redirects to `/login`, which in turn sends an authenticated
//! caller to the home view of their role.

use serde::Serialize;
use utoipa::ToSchema;

use domain::{Role, User};

/// Every screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    EmployeeData,
    FamilyData,
    EducationData,
    OwnSearch,
    Dashboard,
    AllRecords,
    UserManagement,
    Reports,
}

const USER_NAV: [View; 4] = [
    View::EmployeeData,
    View::FamilyData,
    View::EducationData,
    View::OwnSearch,
];

const ADMIN_NAV: [View; 4] = [
    View::Dashboard,
    View::AllRecords,
    View::UserManagement,
    View::Reports,
];

impl View {
    pub const ALL: [View; 9] = [
        View::Login,
        View::EmployeeData,
        View::FamilyData,
        View::EducationData,
        View::OwnSearch,
        View::Dashboard,
        View::AllRecords,
        View::UserManagement,
        View::Reports,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            View::Login => "/login",
            View::EmployeeData => "/user/data-pegawai",
            View::FamilyData => "/user/data-keluarga",
            View::EducationData => "/user/data-pendidikan",
            View::OwnSearch => "/user/pencarian",
            View::Dashboard => "/admin/dashboard",
            View::AllRecords => "/admin/semua-data",
            View::UserManagement => "/admin/manajemen-user",
            View::Reports => "/admin/laporan",
        }
    }

    /// Navigation label
    pub fn title(&self) -> &'static str {
        match self {
            View::Login => "Login",
            View::EmployeeData => "Data Pegawai",
            View::FamilyData => "Data Keluarga",
            View::EducationData => "Data Pendidikan",
            View::OwnSearch => "Pencarian Data",
            View::Dashboard => "Dashboard",
            View::AllRecords => "Lihat Semua Data",
            View::UserManagement => "Manajemen User",
            View::Reports => "Laporan & Export",
        }
    }

    /// Look up a view by path. A trailing slash is ignored.
    pub fn from_path(path: &str) -> Option<View> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        View::ALL.into_iter().find(|view| view.path() == path)
    }

    /// Role allowed to open the view; `None` for the public login view.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            View::Login => None,
            View::EmployeeData | View::FamilyData | View::EducationData | View::OwnSearch => {
                Some(Role::User)
            }
            View::Dashboard | View::AllRecords | View::UserManagement | View::Reports => {
                Some(Role::Admin)
            }
        }
    }

    pub fn home_for(role: Role) -> View {
        match role {
            Role::User => View::EmployeeData,
            Role::Admin => View::Dashboard,
        }
    }

    pub fn nav_items(role: Role) -> &'static [View] {
        match role {
            Role::User => &USER_NAV,
            Role::Admin => &ADMIN_NAV,
        }
    }
}

/// Result of routing one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Render(View),
    Redirect(View),
}

impl RouteOutcome {
    /// View that ends up on screen.
    pub fn view(&self) -> View {
        match self {
            RouteOutcome::Render(view) | RouteOutcome::Redirect(view) => *view,
        }
    }
}

/// Decide what to show for `path` given the current session.
pub fn resolve(path: &str, user: Option<&User>) -> RouteOutcome {
    let role = user.map(|u| u.role);

    let Some(view) = View::from_path(path) else {
        return RouteOutcome::Redirect(role.map_or(View::Login, View::home_for));
    };

    match (view.required_role(), role) {
        (None, Some(role)) => RouteOutcome::Redirect(View::home_for(role)),
        (None, None) => RouteOutcome::Render(view),
        (Some(required), Some(role)) if required == role => RouteOutcome::Render(view),
        (Some(_), _) => RouteOutcome::Redirect(View::Login),
    }
}

/// Serializable navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NavItem {
    pub name: &'static str,
    pub path: &'static str,
}

impl From<View> for NavItem {
    fn from(view: View) -> Self {
        Self {
            name: view.title(),
            path: view.path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{AccountId, EmployeeId};

    fn user(role: Role) -> User {
        User {
            id: AccountId::new("user-1"),
            username: "budi".to_string(),
            role,
            employee_id: match role {
                Role::User => Some(EmployeeId::new("pegawai-1")),
                Role::Admin => None,
            },
        }
    }

    #[test]
    fn test_anonymous_is_sent_to_login() {
        assert_eq!(
            resolve("/admin/dashboard", None),
            RouteOutcome::Redirect(View::Login)
        );
        assert_eq!(
            resolve("/user/data-pegawai", None),
            RouteOutcome::Redirect(View::Login)
        );
        assert_eq!(resolve("/login", None), RouteOutcome::Render(View::Login));
        assert_eq!(resolve("/nowhere", None), RouteOutcome::Redirect(View::Login));
    }

    #[test]
    fn test_wrong_role_goes_through_login() {
        let rina = user(Role::User);

        let first = resolve("/admin/manajemen-user", Some(&rina));
        assert_eq!(first, RouteOutcome::Redirect(View::Login));

        let second = resolve(first.view().path(), Some(&rina));
        assert_eq!(second, RouteOutcome::Redirect(View::EmployeeData));
    }

    #[test]
    fn test_role_views_render() {
        let admin = user(Role::Admin);
        let budi = user(Role::User);

        assert_eq!(
            resolve("/admin/laporan/", Some(&admin)),
            RouteOutcome::Render(View::Reports)
        );
        assert_eq!(
            resolve("/user/pencarian", Some(&budi)),
            RouteOutcome::Render(View::OwnSearch)
        );
        assert_eq!(
            resolve("/", Some(&admin)),
            RouteOutcome::Redirect(View::Dashboard)
        );
    }

    #[test]
    fn test_nav_items_match_required_role() {
        for role in [Role::User, Role::Admin] {
            let items = View::nav_items(role);
            assert_eq!(items.len(), 4);
            assert!(items.iter().all(|v| v.required_role() == Some(role)));
            assert!(items.contains(&View::home_for(role)));
        }
    }

    #[test]
    fn test_every_path_round_trips() {
        for view in View::ALL {
            assert_eq!(View::from_path(view.path()), Some(view));
        }
    }
}
