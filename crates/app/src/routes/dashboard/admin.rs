use std::collections::HashMap;

use dioxus::prelude::*;
use shared_types::{Project, ProjectStatus, User};

use crate::api::use_api;
use crate::forms::{AccountForm, EditAccountForm, EditProjectForm, ProjectForm};

use super::{
    assignee_names, ConfirmDialog, DashboardHeader, LoadError, LoadingState, ProjectStatsPanel,
    StatusBadge, DASHBOARD_CSS,
};

/// Admin dashboard: user management plus the full project pool.
///
/// Loads the connected admin, the user list and the project list
/// concurrently; a single failure aborts the combined load.
#[component]
pub fn AdminDashboard() -> Element {
    let api = use_api();

    let mut principal = use_signal(|| Option::<User>::None);
    let mut users = use_signal(Vec::<User>::new);
    let mut projects = use_signal(Vec::<Project>::new);
    let mut load_error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| true);

    // Create-user form state
    let mut account_form = use_signal(AccountForm::default);
    let mut account_errors = use_signal(HashMap::<String, String>::new);
    let mut account_msg = use_signal(|| Option::<(bool, String)>::None);

    // Create-project form state
    let mut project_form = use_signal(ProjectForm::default);
    let mut project_errors = use_signal(HashMap::<String, String>::new);
    let mut project_msg = use_signal(|| Option::<(bool, String)>::None);

    // Row edit state — one editable row per collection
    let mut editing_user: Signal<Option<(i64, EditAccountForm)>> = use_signal(|| None);
    let mut edit_user_errors = use_signal(HashMap::<String, String>::new);
    let mut editing_project: Signal<Option<(i64, EditProjectForm)>> = use_signal(|| None);
    let mut edit_project_errors = use_signal(HashMap::<String, String>::new);

    // Delete confirmations and table-level messages
    let mut confirm_delete_user: Signal<Option<i64>> = use_signal(|| None);
    let mut confirm_delete_project: Signal<Option<i64>> = use_signal(|| None);
    let mut users_msg = use_signal(|| Option::<(bool, String)>::None);
    let mut projects_msg = use_signal(|| Option::<(bool, String)>::None);

    let api_for_load = api.clone();
    let mut load = use_future(move || {
        let api = api_for_load.clone();
        async move {
            loading.set(true);
            load_error.set(None);
            match futures::try_join!(api.connected_admin(), api.all_users(), api.projects()) {
                Ok((me, user_list, project_list)) => {
                    principal.set(Some(me));
                    users.set(user_list);
                    projects.set(project_list);
                }
                Err(err) => {
                    tracing::error!("admin dashboard load failed: {err}");
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

    let api_for_create_user = api.clone();
    let handle_create_user = move |evt: FormEvent| {
        let api = api_for_create_user.clone();
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
            match api.create_user(&req).await {
                Ok(user) => {
                    users.write().push(user);
                    account_form.set(AccountForm::default());
                    account_msg.set(Some((true, "User created".to_string())));
                }
                Err(err) => {
                    tracing::error!("user create failed: {err}");
                    if err.field_errors.is_empty() {
                        account_msg.set(Some((false, err.message)));
                    } else {
                        account_errors.set(err.field_errors);
                    }
                }
            }
        }
    };

    let api_for_create_project = api.clone();
    let handle_create_project = move |evt: FormEvent| {
        let api = api_for_create_project.clone();
        async move {
            evt.prevent_default();
            project_msg.set(None);

            let errors = project_form.read().validate();
            if !errors.is_empty() {
                project_errors.set(errors);
                return;
            }
            project_errors.set(HashMap::new());

            let req = project_form.read().to_request();
            match api.create_project(&req).await {
                Ok(project) => {
                    projects.write().push(project);
                    project_form.set(ProjectForm::default());
                    project_msg.set(Some((true, "Project created".to_string())));
                }
                Err(err) => {
                    tracing::error!("project create failed: {err}");
                    if err.field_errors.is_empty() {
                        project_msg.set(Some((false, err.message)));
                    } else {
                        project_errors.set(err.field_errors);
                    }
                }
            }
        }
    };

    // Save the single in-flight user edit. A failed update leaves the
    // edit row open with its current values.
    let api_for_save_user = api.clone();
    let save_user_edit = move |_| {
        let Some((id, form)) = editing_user() else {
            return;
        };
        let errors = form.validate();
        if !errors.is_empty() {
            edit_user_errors.set(errors);
            return;
        }
        edit_user_errors.set(HashMap::new());

        let api = api_for_save_user.clone();
        spawn(async move {
            match api.update_user(id, &form.to_request()).await {
                Ok(updated) => {
                    if let Some(slot) = users.write().iter_mut().find(|u| u.id == id) {
                        *slot = updated;
                    }
                    editing_user.set(None);
                    users_msg.set(Some((true, "User updated".to_string())));
                }
                Err(err) => {
                    tracing::error!("user update failed: {err}");
                    if err.field_errors.is_empty() {
                        users_msg.set(Some((false, err.message)));
                    } else {
                        edit_user_errors.set(err.field_errors);
                    }
                }
            }
        });
    };

    let api_for_save_project = api.clone();
    let save_project_edit = move |_| {
        let Some((id, form)) = editing_project() else {
            return;
        };
        let errors = form.validate();
        if !errors.is_empty() {
            edit_project_errors.set(errors);
            return;
        }
        edit_project_errors.set(HashMap::new());

        let api = api_for_save_project.clone();
        spawn(async move {
            match api.update_project(id, &form.to_request()).await {
                Ok(updated) => {
                    if let Some(slot) = projects.write().iter_mut().find(|p| p.id == id) {
                        *slot = updated;
                    }
                    editing_project.set(None);
                    projects_msg.set(Some((true, "Project updated".to_string())));
                }
                Err(err) => {
                    tracing::error!("project update failed: {err}");
                    if err.field_errors.is_empty() {
                        projects_msg.set(Some((false, err.message)));
                    } else {
                        edit_project_errors.set(err.field_errors);
                    }
                }
            }
        });
    };

    let api_for_delete_user = api.clone();
    let handle_delete_user = move |_| {
        let Some(id) = confirm_delete_user() else {
            return;
        };
        confirm_delete_user.set(None);
        let api = api_for_delete_user.clone();
        spawn(async move {
            match api.delete_user(id).await {
                Ok(()) => {
                    users.write().retain(|u| u.id != id);
                    users_msg.set(Some((true, "User deleted".to_string())));
                }
                Err(err) => {
                    tracing::error!("user delete failed: {err}");
                    users_msg.set(Some((false, err.message)));
                }
            }
        });
    };

    let api_for_delete_project = api.clone();
    let handle_delete_project = move |_| {
        let Some(id) = confirm_delete_project() else {
            return;
        };
        confirm_delete_project.set(None);
        let api = api_for_delete_project.clone();
        spawn(async move {
            match api.delete_project(id).await {
                Ok(()) => {
                    projects.write().retain(|p| p.id != id);
                    projects_msg.set(Some((true, "Project deleted".to_string())));
                }
                Err(err) => {
                    tracing::error!("project delete failed: {err}");
                    projects_msg.set(Some((false, err.message)));
                }
            }
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: DASHBOARD_CSS }

        div { class: "dashboard-page",
            DashboardHeader { title: "Admin Dashboard", principal: me }

            ProjectStatsPanel { projects: projects() }

            // ── Create project ──
            section { class: "panel",
                h2 { "Create Project" }
                if let Some((ok, msg)) = project_msg() {
                    div { class: if ok { "form-success" } else { "form-error" }, "{msg}" }
                }
                form { class: "entity-form", onsubmit: handle_create_project,
                    div { class: "form-field",
                        label { r#for: "project-title", "Title" }
                        input {
                            id: "project-title",
                            value: project_form.read().title.clone(),
                            oninput: move |e: FormEvent| project_form.write().set_field("title", e.value()),
                        }
                        if let Some(err) = project_errors().get("title") {
                            div { class: "form-field-error", "{err}" }
                        }
                    }
                    div { class: "form-field",
                        label { r#for: "project-description", "Description" }
                        textarea {
                            id: "project-description",
                            rows: 3,
                            value: project_form.read().description.clone(),
                            oninput: move |e: FormEvent| project_form.write().set_field("description", e.value()),
                        }
                    }
                    div { class: "form-field",
                        label { r#for: "project-status", "Status" }
                        select {
                            id: "project-status",
                            value: project_form.read().status.as_str(),
                            onchange: move |e: FormEvent| project_form.write().set_field("status", e.value()),
                            for status in ProjectStatus::ALL {
                                option { value: status.as_str(), "{status.label()}" }
                            }
                        }
                    }
                    div { class: "form-field",
                        label { "Assignees" }
                        div { class: "assignee-list",
                            for user in users() {
                                {
                                    let uid = user.id;
                                    let checked = project_form.read().user_ids.contains(&uid);
                                    rsx! {
                                        label { class: "assignee-option",
                                            input {
                                                r#type: "checkbox",
                                                checked,
                                                onchange: move |_| project_form.write().toggle_assignee(uid),
                                            }
                                            "{user.name} ({user.email})"
                                        }
                                    }
                                }
                            }
                        }
                        if let Some(err) = project_errors().get("user_ids") {
                            div { class: "form-field-error", "{err}" }
                        }
                    }
                    button { r#type: "submit", class: "button", "Create Project" }
                }
            }

            // ── Projects table ──
            section { class: "panel",
                h2 { "Projects" }
                if let Some((ok, msg)) = projects_msg() {
                    div { class: if ok { "form-success" } else { "form-error" }, "{msg}" }
                }
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
                                th { "Actions" }
                            }
                        }
                        tbody {
                            for project in projects() {
                                {
                                    let project_id = project.id;
                                    let is_editing = editing_project()
                                        .map(|(id, _)| id == project_id)
                                        .unwrap_or(false);
                                    let project_for_edit = project.clone();
                                    let names = assignee_names(&project);
                                    let description = project.description.clone().unwrap_or_default();

                                    rsx! {
                                        tr {
                                            if is_editing {
                                                td {
                                                    input {
                                                        value: editing_project().map(|(_, f)| f.title).unwrap_or_default(),
                                                        oninput: move |e: FormEvent| {
                                                            if let Some((_, form)) = editing_project.write().as_mut() {
                                                                form.set_field("title", e.value());
                                                            }
                                                        },
                                                    }
                                                    if let Some(err) = edit_project_errors().get("title") {
                                                        div { class: "form-field-error", "{err}" }
                                                    }
                                                }
                                                td {
                                                    input {
                                                        value: editing_project().map(|(_, f)| f.description).unwrap_or_default(),
                                                        oninput: move |e: FormEvent| {
                                                            if let Some((_, form)) = editing_project.write().as_mut() {
                                                                form.set_field("description", e.value());
                                                            }
                                                        },
                                                    }
                                                }
                                                td {
                                                    select {
                                                        value: editing_project().map(|(_, f)| f.status.as_str()).unwrap_or_default(),
                                                        onchange: move |e: FormEvent| {
                                                            if let Some((_, form)) = editing_project.write().as_mut() {
                                                                form.set_field("status", e.value());
                                                            }
                                                        },
                                                        for status in ProjectStatus::ALL {
                                                            option { value: status.as_str(), "{status.label()}" }
                                                        }
                                                    }
                                                }
                                                td { "{names}" }
                                                td { class: "row-actions",
                                                    button { class: "button", onclick: save_project_edit.clone(), "Save" }
                                                    button {
                                                        class: "button button-ghost",
                                                        onclick: move |_| {
                                                            editing_project.set(None);
                                                            edit_project_errors.set(HashMap::new());
                                                        },
                                                        "Cancel"
                                                    }
                                                }
                                            } else {
                                                td { "{project.title}" }
                                                td { "{description}" }
                                                td { StatusBadge { status: project.status } }
                                                td { "{names}" }
                                                td { class: "row-actions",
                                                    button {
                                                        class: "button button-ghost",
                                                        onclick: move |_| {
                                                            edit_project_errors.set(HashMap::new());
                                                            editing_project.set(Some((
                                                                project_id,
                                                                EditProjectForm::from_project(&project_for_edit),
                                                            )));
                                                        },
                                                        "Edit"
                                                    }
                                                    button {
                                                        class: "button button-destructive",
                                                        onclick: move |_| confirm_delete_project.set(Some(project_id)),
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

            // ── Create user ──
            section { class: "panel",
                h2 { "Create User" }
                if let Some((ok, msg)) = account_msg() {
                    div { class: if ok { "form-success" } else { "form-error" }, "{msg}" }
                }
                form { class: "entity-form", onsubmit: handle_create_user,
                    div { class: "form-field",
                        label { r#for: "user-name", "Name" }
                        input {
                            id: "user-name",
                            value: account_form.read().name.clone(),
                            oninput: move |e: FormEvent| account_form.write().set_field("name", e.value()),
                        }
                        if let Some(err) = account_errors().get("name") {
                            div { class: "form-field-error", "{err}" }
                        }
                    }
                    div { class: "form-field",
                        label { r#for: "user-email", "Email" }
                        input {
                            id: "user-email",
                            r#type: "email",
                            value: account_form.read().email.clone(),
                            oninput: move |e: FormEvent| account_form.write().set_field("email", e.value()),
                        }
                        if let Some(err) = account_errors().get("email") {
                            div { class: "form-field-error", "{err}" }
                        }
                    }
                    div { class: "form-field",
                        label { r#for: "user-password", "Password" }
                        input {
                            id: "user-password",
                            r#type: "password",
                            value: account_form.read().password.clone(),
                            oninput: move |e: FormEvent| account_form.write().set_field("password", e.value()),
                        }
                        if let Some(err) = account_errors().get("password") {
                            div { class: "form-field-error", "{err}" }
                        }
                    }
                    div { class: "form-field",
                        label { r#for: "user-password-confirmation", "Confirm Password" }
                        input {
                            id: "user-password-confirmation",
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
                    button { r#type: "submit", class: "button", "Create User" }
                }
            }

            // ── Users table ──
            section { class: "panel",
                h2 { "Users" }
                if let Some((ok, msg)) = users_msg() {
                    div { class: if ok { "form-success" } else { "form-error" }, "{msg}" }
                }
                if users().is_empty() {
                    p { class: "empty-state", "No users found." }
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
                            for user in users() {
                                {
                                    let user_id = user.id;
                                    let is_editing = editing_user()
                                        .map(|(id, _)| id == user_id)
                                        .unwrap_or(false);
                                    let user_for_edit = user.clone();

                                    rsx! {
                                        tr {
                                            if is_editing {
                                                td {
                                                    input {
                                                        value: editing_user().map(|(_, f)| f.name).unwrap_or_default(),
                                                        oninput: move |e: FormEvent| {
                                                            if let Some((_, form)) = editing_user.write().as_mut() {
                                                                form.set_field("name", e.value());
                                                            }
                                                        },
                                                    }
                                                    if let Some(err) = edit_user_errors().get("name") {
                                                        div { class: "form-field-error", "{err}" }
                                                    }
                                                }
                                                td {
                                                    input {
                                                        r#type: "email",
                                                        value: editing_user().map(|(_, f)| f.email).unwrap_or_default(),
                                                        oninput: move |e: FormEvent| {
                                                            if let Some((_, form)) = editing_user.write().as_mut() {
                                                                form.set_field("email", e.value());
                                                            }
                                                        },
                                                    }
                                                    if let Some(err) = edit_user_errors().get("email") {
                                                        div { class: "form-field-error", "{err}" }
                                                    }
                                                }
                                                td { class: "row-actions",
                                                    button { class: "button", onclick: save_user_edit.clone(), "Save" }
                                                    button {
                                                        class: "button button-ghost",
                                                        onclick: move |_| {
                                                            editing_user.set(None);
                                                            edit_user_errors.set(HashMap::new());
                                                        },
                                                        "Cancel"
                                                    }
                                                }
                                            } else {
                                                td { "{user.name}" }
                                                td { "{user.email}" }
                                                td { class: "row-actions",
                                                    button {
                                                        class: "button button-ghost",
                                                        onclick: move |_| {
                                                            edit_user_errors.set(HashMap::new());
                                                            editing_user.set(Some((
                                                                user_id,
                                                                EditAccountForm::from_account(&user_for_edit),
                                                            )));
                                                        },
                                                        "Edit"
                                                    }
                                                    button {
                                                        class: "button button-destructive",
                                                        onclick: move |_| confirm_delete_user.set(Some(user_id)),
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
        }

        if confirm_delete_user().is_some() {
            ConfirmDialog {
                title: "Delete User",
                description: "Are you sure you want to delete this user? This action cannot be undone.",
                confirm_label: "Delete",
                on_confirm: handle_delete_user,
                on_cancel: move |_| confirm_delete_user.set(None),
            }
        }
        if confirm_delete_project().is_some() {
            ConfirmDialog {
                title: "Delete Project",
                description: "Are you sure you want to delete this project? This action cannot be undone.",
                confirm_label: "Delete",
                on_confirm: handle_delete_project,
                on_cancel: move |_| confirm_delete_project.set(None),
            }
        }
    }
}
