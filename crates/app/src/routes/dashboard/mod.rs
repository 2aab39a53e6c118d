mod admin;
mod manager;
mod user;

pub use admin::AdminDashboard;
pub use manager::ManagerDashboard;
pub use user::UserDashboard;

use dioxus::prelude::*;
use shared_types::{Project, ProjectStats, ProjectStatus, User};

use crate::api::use_api;
use crate::auth::use_session;
use crate::routes::Route;

pub const DASHBOARD_CSS: Asset = asset!("/assets/dashboard.css");

/// Badge CSS class for a project status.
fn status_class(status: ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::Pending => "status-badge status-pending",
        ProjectStatus::InProgress => "status-badge status-in-progress",
        ProjectStatus::Completed => "status-badge status-completed",
        ProjectStatus::Cancelled => "status-badge status-cancelled",
    }
}

/// Comma-separated assignee names, or a dash when unassigned.
fn assignee_names(project: &Project) -> String {
    if project.users.is_empty() {
        "—".to_string()
    } else {
        project
            .users
            .iter()
            .map(|u| u.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Colored project status label.
#[component]
fn StatusBadge(status: ProjectStatus) -> Element {
    rsx! {
        span { class: status_class(status), "{status.label()}" }
    }
}

/// A single stat card.
#[component]
fn StatCard(label: String, value: usize) -> Element {
    rsx! {
        div { class: "stat-card",
            span { class: "stat-value", "{value}" }
            span { class: "stat-label", "{label}" }
        }
    }
}

/// Per-status project counts, derived from the in-memory collection on
/// every render.
#[component]
fn ProjectStatsPanel(projects: Vec<Project>) -> Element {
    let stats = ProjectStats::from_projects(&projects);

    rsx! {
        div { class: "stats-grid",
            StatCard { label: "Total", value: stats.total }
            StatCard { label: "Pending", value: stats.pending }
            StatCard { label: "In Progress", value: stats.in_progress }
            StatCard { label: "Completed", value: stats.completed }
            StatCard { label: "Cancelled", value: stats.cancelled }
        }
    }
}

/// Modal confirmation dialog for destructive actions.
#[component]
fn ConfirmDialog(
    title: String,
    description: String,
    confirm_label: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "dialog-overlay",
            div { class: "dialog",
                h3 { class: "dialog-title", "{title}" }
                p { class: "dialog-description", "{description}" }
                div { class: "dialog-actions",
                    button {
                        class: "button button-ghost",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "button button-destructive",
                        onclick: move |_| on_confirm.call(()),
                        "{confirm_label}"
                    }
                }
            }
        }
    }
}

/// Dashboard header: title, the connected principal, and logout.
///
/// Logout asks for confirmation, notifies the server best-effort (a
/// failure is logged but never blocks), then clears the session and
/// returns to the login page.
#[component]
fn DashboardHeader(title: String, principal: User) -> Element {
    let api = use_api();
    let mut session = use_session();
    let mut confirm_logout = use_signal(|| false);

    let handle_logout = move |_| {
        let api = api.clone();
        confirm_logout.set(false);
        spawn(async move {
            if let Err(err) = api.logout().await {
                tracing::warn!("logout notification failed: {err}");
            }
            session.sign_out();
            navigator().push(Route::Login {});
        });
    };

    rsx! {
        header { class: "dashboard-header",
            div { class: "dashboard-heading",
                h1 { "{title}" }
                div { class: "dashboard-principal",
                    span { class: "principal-name", "{principal.name}" }
                    span { class: "principal-email", "{principal.email}" }
                }
            }
            button {
                class: "button button-ghost",
                onclick: move |_| confirm_logout.set(true),
                "Log out"
            }
        }

        if confirm_logout() {
            ConfirmDialog {
                title: "Log out",
                description: "End your session and return to the login page?",
                confirm_label: "Log out",
                on_confirm: handle_logout,
                on_cancel: move |_| confirm_logout.set(false),
            }
        }
    }
}

/// Full-page error state for a failed initial load, with a manual
/// retry that re-runs the combined fetch.
#[component]
fn LoadError(message: String, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div { class: "load-error",
            p { class: "load-error-message", "Error: {message}" }
            button {
                class: "button",
                onclick: move |_| on_retry.call(()),
                "Try again"
            }
        }
    }
}

/// Full-page loading state shown while the initial fetches settle.
#[component]
fn LoadingState() -> Element {
    rsx! {
        div { class: "load-pending",
            p { "Loading..." }
        }
    }
}
