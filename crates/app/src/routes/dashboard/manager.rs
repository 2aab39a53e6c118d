use std::collections::HashMap;

use dioxus::prelude::*;
use shared_types::{Admin, Project, User};

use crate::api::use_api;
use crate::forms::{AccountForm, EditAccountForm};

use super::{
    assignee_names, ConfirmDialog, DashboardHeader, LoadError, LoadingState, ProjectStatsPanel,
    StatusBadge, DASHBOARD_CSS,
};

/// Manager dashboard: admin account management and a read-only view of
/// every project with its assignees.
#[component]
pub fn ManagerDashboard() -> Element {
    let api = use_api();

    let mut principal = use_signal(|| Option::<User>::None);
    let mut admins = use_signal(Vec::<Admin>::new);
    let mut projects = use_signal(Vec::<Project>::new);
    let mut load_error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| true);

    let mut account_form = use_signal(AccountForm::default);
    let mut account_errors = use_signal(HashMap::<String, String>::new);
    let mut account_msg = use_signal(|| Option::<(bool, String)>::None);

    let mut editing_admin: Signal<Option<(i64, EditAccountForm)>> = use_signal(|| None);
    let mut edit_admin_errors = use_signal(HashMap::<String, String>::new);
    let mut confirm_delete_admin: Signal<Option<i64>> = use_signal(|| None);
    let mut admins_msg = use_signal(|| Option::<(bool, String)>::None);

    let api_for_load = api.clone();
    let mut load = use_future(move || {
        let api = api_for_load.clone();
        async move {
            loading.set(true);
            load_error.set(None);
            match futures::try_join!(
                api.connected_manager(),
                api.all_admins(),
                api.projects_with_users(),
            ) {
                Ok((me, admin_list, project_list)) => {
                    principal.set(Some(me));
                    admins.set(admin_list);
                    projects.set(project_list);
                }
                Err(err) => {
                    tracing::error!("manager dashboard load failed: {err}");
                    load_error.set(Some(err.message));
                }
            }
            loading.set(false);
        }
    });

    if loading() {
        return rsx! {
            document::Link { rel: "stylesheet", href: DASHBOARD_CSS }
            LoadingState {}
        };
    }
    if let Some(message) = load_error() {
        return rsx! {
            document::Link { rel: "stylesheet", href: DASHBOARD_CSS }
            LoadError { message, on_retry: move |_| load.restart() }
        };
    }
    let Some(me) = principal() else {
        return rsx! {
            document::Link { rel: "stylesheet", href: DASHBOARD_CSS }
            LoadingState {}
        };
    };

    let api_for_create = api.clone();
    let handle_create_admin = move |evt: FormEvent| {
        let api = api_for_create.clone();
        async move {
            evt.prevent_default();
            account_msg.set(None);

            let errors = account_form.read().validate();
            if !errors.is_empty() {
                account_errors.set(errors);
                return;
            }
            account_errors.set(HashMap::new());

            let req = account_form.read().to_request();
            match api.create_admin(&req).await {
                Ok(admin) => {
                    admins.write().push(admin);
                    account_form.set(AccountForm::default());
                    account_msg.set(Some((true, "Admin created".to_string())));
                }
                Err(err) => {
                    tracing::error!("admin create failed: {err}");
                    if err.field_errors.is_empty() {
                        account_msg.set(Some((false, err.message)));
                    } else {
                        account_errors.set(err.field_errors);
                    }
                }
            }
        }
    };

    let api_for_save = api.clone();
    let save_admin_edit = move |_| {
        let Some((id, form)) = editing_admin() else {
            return;
        };
        let errors = form.validate();
        if !errors.is_empty() {
            edit_admin_errors.set(errors);
            return;
        }
        edit_admin_errors.set(HashMap::new());

        let api = api_for_save.clone();
        spawn(async move {
            match api.update_admin(id, &form.to_request()).await {
                Ok(updated) => {
                    if let Some(slot) = admins.write().iter_mut().find(|a| a.id == id) {
                        *slot = updated;
                    }
                    editing_admin.set(None);
                    admins_msg.set(Some((true, "Admin updated".to_string())));
                }
                Err(err) => {
                    tracing::error!("admin update failed: {err}");
                    if err.field_errors.is_empty() {
                        admins_msg.set(Some((false, err.message)));
                    } else {
                        edit_admin_errors.set(err.field_errors);
                    }
                }
            }
        });
    };

    let api_for_delete = api.clone();
    let handle_delete_admin = move |_| {
        let Some(id) = confirm_delete_admin() else {
            return;
        };
        confirm_delete_admin.set(None);
        let api = api_for_delete.clone();
        spawn(async move {
            match api.delete_admin(id).await {
                Ok(()) => {
                    admins.write().retain(|a| a.id != id);
                    admins_msg.set(Some((true, "Admin deleted".to_string())));
                }
                Err(err) => {
                    tracing::error!("admin delete failed: {err}");
                    admins_msg.set(Some((false, err.message)));
                }
            }
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: DASHBOARD_CSS }

        div { class: "dashboard-page",
            DashboardHeader { title: "Manager Dashboard", principal: me }

            ProjectStatsPanel { projects: projects() }

            // ── Create admin ──
            section { class: "panel",
                h2 { "Create Admin" }
                if let Some((ok, msg)) = account_msg() {
                    div { class: if ok { "form-success" } else { "form-error" }, "{msg}" }
                }
                form { class: "entity-form", onsubmit: handle_create_admin,
                    div { class: "form-field",
                        label { r#for: "admin-name", "Name" }
                        input {
                            id: "admin-name",
                            value: account_form.read().name.clone(),
                            oninput: move |e: FormEvent| account_form.write().set_field("name", e.value()),
                        }
                        if let Some(err) = account_errors().get("name") {
                            div { class: "form-field-error", "{err}" }
                        }
                    }
                    div { class: "form-field",
                        label { r#for: "admin-email", "Email" }
                        input {
                            id: "admin-email",
                            r#type: "email",
                            value: account_form.read().email.clone(),
                            oninput: move |e: FormEvent| account_form.write().set_field("email", e.value()),
                        }
                        if let Some(err) = account_errors().get("email") {
                            div { class: "form-field-error", "{err}" }
                        }
                    }
                    div { class: "form-field",
                        label { r#for: "admin-password", "Password" }
                        input {
                            id: "admin-password",
                            r#type: "password",
                            value: account_form.read().password.clone(),
                            oninput: move |e: FormEvent| account_form.write().set_field("password", e.value()),
                        }
                        if let Some(err) = account_errors().get("password") {
                            div { class: "form-field-error", "{err}" }
                        }
                    }
                    div { class: "form-field",
                        label { r#for: "admin-password-confirmation", "Confirm Password" }
                        input {
                            id: "admin-password-confirmation",
                            r#type: "password",
                            value: account_form.read().password_confirmation.clone(),
                            oninput: move |e: FormEvent| {
                                account_form.write().set_field("password_confirmation", e.value())
                            },
                        }
                        if let Some(err) = account_errors().get("password_confirmation") {
                            div { class: "form-field-error", "{err}" }
                        }
                    }
                    button { r#type: "submit", class: "button", "Create Admin" }
                }
            }

            // ── Admins table ──
            section { class: "panel",
                h2 { "Admins" }
                if let Some((ok, msg)) = admins_msg() {
                    div { class: if ok { "form-success" } else { "form-error" }, "{msg}" }
                }
                if admins().is_empty() {
                    p { class: "empty-state", "No admins found." }
                } else {
                    table { class: "entity-table",
                        thead {
                            tr {
                                th { "Name" }
                                th { "Email" }
                                th { "Actions" }
                            }
                        }
                        tbody {
                            for admin in admins() {
                                {
                                    let admin_id = admin.id;
                                    let is_editing = editing_admin()
                                        .map(|(id, _)| id == admin_id)
                                        .unwrap_or(false);
                                    let admin_for_edit = admin.clone();

                                    rsx! {
                                        tr {
                                            if is_editing {
                                                td {
                                                    input {
                                                        value: editing_admin().map(|(_, f)| f.name).unwrap_or_default(),
                                                        oninput: move |e: FormEvent| {
                                                            if let Some((_, form)) = editing_admin.write().as_mut() {
                                                                form.set_field("name", e.value());
                                                            }
                                                        },
                                                    }
                                                    if let Some(err) = edit_admin_errors().get("name") {
                                                        div { class: "form-field-error", "{err}" }
                                                    }
                                                }
                                                td {
                                                    input {
                                                        r#type: "email",
                                                        value: editing_admin().map(|(_, f)| f.email).unwrap_or_default(),
                                                        oninput: move |e: FormEvent| {
                                                            if let Some((_, form)) = editing_admin.write().as_mut() {
                                                                form.set_field("email", e.value());
                                                            }
                                                        },
                                                    }
                                                    if let Some(err) = edit_admin_errors().get("email") {
                                                        div { class: "form-field-error", "{err}" }
                                                    }
                                                }
                                                td { class: "row-actions",
                                                    button { class: "button", onclick: save_admin_edit.clone(), "Save" }
                                                    button {
                                                        class: "button button-ghost",
                                                        onclick: move |_| {
                                                            editing_admin.set(None);
                                                            edit_admin_errors.set(HashMap::new());
                                                        },
                                                        "Cancel"
                                                    }
                                                }
                                            } else {
                                                td { "{admin.name}" }
                                                td { "{admin.email}" }
                                                td { class: "row-actions",
                                                    button {
                                                        class: "button button-ghost",
                                                        onclick: move |_| {
                                                            edit_admin_errors.set(HashMap::new());
                                                            editing_admin.set(Some((
                                                                admin_id,
                                                                EditAccountForm::from_account(&admin_for_edit),
                                                            )));
                                                        },
                                                        "Edit"
                                                    }
                                                    button {
                                                        class: "button button-destructive",
                                                        onclick: move |_| confirm_delete_admin.set(Some(admin_id)),
                                                        "Delete"
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            // ── Projects (read-only) ──
            section { class: "panel",
                h2 { "All Projects" }
                if projects().is_empty() {
                    p { class: "empty-state", "No projects yet." }
                } else {
                    table { class: "entity-table",
                        thead {
                            tr {
                                th { "Title" }
                                th { "Description" }
                                th { "Status" }
                                th { "Assignees" }
                            }
                        }
                        tbody {
                            for project in projects() {
                                {
                                    let names = assignee_names(&project);
                                    let description = project.description.clone().unwrap_or_default();
                                    rsx! {
                                        tr {
                                            td { "{project.title}" }
                                            td { "{description}" }
                                            td { StatusBadge { status: project.status } }
                                            td { "{names}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        if confirm_delete_admin().is_some() {
            ConfirmDialog {
                title: "Delete Admin",
                description: "Are you sure you want to delete this admin? This action cannot be undone.",
                confirm_label: "Delete",
                on_confirm: handle_delete_admin,
                on_cancel: move |_| confirm_delete_admin.set(None),
            }
        }
    }
}
