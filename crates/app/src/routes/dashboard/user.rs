use std::collections::HashMap;

use dioxus::prelude::*;
use shared_types::{Project, ProjectStatus, User};

use crate::api::use_api;
use crate::forms::{EditProjectForm, ProjectForm};

use super::{
    assignee_names, ConfirmDialog, DashboardHeader, LoadError, LoadingState, ProjectStatsPanel,
    StatusBadge, DASHBOARD_CSS,
};

/// User dashboard: the user's own projects with full CRUD, plus an
/// on-demand list of projects other people assigned to them.
///
/// The assigned list is not part of the initial load; it is fetched the
/// first time the toggle is switched on and refetched on every switch.
#[component]
pub fn UserDashboard() -> Element {
    let api = use_api();

    let mut principal = use_signal(|| Option::<User>::None);
    let mut peers = use_signal(Vec::<User>::new);
    let mut projects = use_signal(Vec::<Project>::new);
    let mut load_error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| true);

    let mut project_form = use_signal(ProjectForm::default);
    let mut project_errors = use_signal(HashMap::<String, String>::new);
    let mut project_msg = use_signal(|| Option::<(bool, String)>::None);

    let mut editing_project: Signal<Option<(i64, EditProjectForm)>> = use_signal(|| None);
    let mut edit_project_errors = use_signal(HashMap::<String, String>::new);
    let mut confirm_delete_project: Signal<Option<i64>> = use_signal(|| None);
    let mut projects_msg = use_signal(|| Option::<(bool, String)>::None);

    let mut show_assigned = use_signal(|| false);

    let api_for_load = api.clone();
    let mut load = use_future(move || {
        let api = api_for_load.clone();
        async move {
            loading.set(true);
            load_error.set(None);
            match futures::try_join!(api.connected_user(), api.users(), api.my_projects()) {
                Ok((me, peer_list, project_list)) => {
                    principal.set(Some(me));
                    peers.set(peer_list);
                    projects.set(project_list);
                }
                Err(err) => {
                    tracing::error!("user dashboard load failed: {err}");
                    load_error.set(Some(err.message));
                }
            }
            loading.set(false);
        }
    });

    // Deferred fetch, keyed on the toggle.
    let api_for_assigned = api.clone();
    let assigned = use_resource(move || {
        let api = api_for_assigned.clone();
        let wanted = show_assigned();
        async move {
            if wanted {
                Some(api.assigned_projects().await)
            } else {
                None
            }
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
    let handle_create_project = move |evt: FormEvent| {
        let api = api_for_create.clone();
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
            match api.create_own_project(&req).await {
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

    let api_for_save = api.clone();
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

        let api = api_for_save.clone();
        spawn(async move {
            match api.update_own_project(id, &form.to_request()).await {
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

    let api_for_delete = api.clone();
    let handle_delete_project = move |_| {
        let Some(id) = confirm_delete_project() else {
            return;
        };
        confirm_delete_project.set(None);
        let api = api_for_delete.clone();
        spawn(async move {
            match api.delete_own_project(id).await {
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
            DashboardHeader { title: "My Dashboard", principal: me }

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
                            for peer in peers() {
                                {
                                    let uid = peer.id;
                                    let checked = project_form.read().user_ids.contains(&uid);
                                    rsx! {
                                        label { class: "assignee-option",
                                            input {
                                                r#type: "checkbox",
                                                checked,
                                                onchange: move |_| project_form.write().toggle_assignee(uid),
                                            }
                                            "{peer.name} ({peer.email})"
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

            // ── My projects ──
            section { class: "panel",
                h2 { "My Projects" }
                if let Some((ok, msg)) = projects_msg() {
                    div { class: if ok { "form-success" } else { "form-error" }, "{msg}" }
                }
                if projects().is_empty() {
                    p { class: "empty-state", "You have no projects yet." }
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

            // ── Assigned to me ──
            section { class: "panel",
                div { class: "panel-heading",
                    h2 { "Assigned to Me" }
                    button {
                        class: "button button-ghost",
                        onclick: move |_| {
                            let next = !show_assigned();
                            show_assigned.set(next);
                        },
                        if show_assigned() { "Hide" } else { "Show" }
                    }
                }
                if show_assigned() {
                    match &*assigned.read() {
                        Some(Some(Ok(list))) => {
                            if list.is_empty() {
                                rsx! {
                                    p { class: "empty-state", "Nothing has been assigned to you." }
                                }
                            } else {
                                rsx! {
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
                                            for project in list.clone() {
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
                        Some(Some(Err(err))) => rsx! {
                            div { class: "form-error", "Error: {err.message}" }
                        },
                        _ => rsx! {
                            p { class: "empty-state", "Loading..." }
                        },
                    }
                }
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
