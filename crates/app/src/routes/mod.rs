pub mod dashboard;
pub mod login;
pub mod not_found;
pub mod register;

use dioxus::prelude::*;
use shared_types::Role;

use crate::auth::use_session;

use dashboard::{AdminDashboard, ManagerDashboard, UserDashboard};
use login::Login;
use not_found::NotFound;
use register::Register;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    Login {},
    #[route("/register")]
    Register {},
    #[layout(AuthGuard)]
    #[route("/admin")]
    AdminDashboard {},
    #[route("/manager")]
    ManagerDashboard {},
    #[route("/user")]
    UserDashboard {},
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Map a session role to its dashboard.
/// admin → /admin, manager → /manager, everything else → /user.
pub fn dashboard_for_role(role: Role) -> Route {
    match role {
        Role::Admin => Route::AdminDashboard {},
        Role::Manager => Route::ManagerDashboard {},
        Role::User => Route::UserDashboard {},
    }
}

/// Auth guard layout — redirects to the login page when no session
/// exists. Role fit is not checked here: the server authorizes every
/// request, the client only picks a landing page.
#[component]
fn AuthGuard() -> Element {
    let session = use_session();

    if !session.is_authenticated() {
        navigator().push(Route::Login {});
        return rsx! {
            div { class: "auth-guard-loading",
                p { "Redirecting to login..." }
            }
        };
    }

    rsx! { Outlet::<Route> {} }
}
