//! Thin authenticated HTTP client for the backend REST API.
//!
//! Every call is best-effort and fire-once: no retry, no timeout, no
//! backoff. 2xx responses are parsed as JSON; anything else becomes an
//! [`AppError`] carrying the server's `message` field when present.

use dioxus::prelude::*;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{
    Admin, AdminEnvelope, AppError, CreateAccountRequest, CreateProjectRequest, LoginRequest,
    LoginResponse, Project, ProjectEnvelope, UpdateAccountRequest, UpdateProjectRequest, User,
    UserEnvelope,
};

use crate::auth::use_session;
use crate::config;

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Attach the bearer token when a session token is present.
    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send(&self, req: RequestBuilder) -> Result<(u16, String), AppError> {
        let resp = self
            .authorize(req)
            .send()
            .await
            .map_err(|e| AppError::network(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| AppError::network(e.to_string()))?;
        Ok((status, body))
    }

    /// Issue a request and parse the 2xx body as JSON.
    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, AppError> {
        let (status, body) = self.send(req).await?;
        if (200..300).contains(&status) {
            serde_json::from_str(&body)
                .map_err(|e| AppError::internal(format!("Unexpected response body: {e}")))
        } else {
            Err(AppError::from_response(status, &body))
        }
    }

    /// Issue a request where only the status matters.
    async fn send_ok(&self, req: RequestBuilder) -> Result<(), AppError> {
        let (status, body) = self.send(req).await?;
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(AppError::from_response(status, &body))
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.send_json(self.http.get(self.url(path))).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        self.send_json(self.http.post(self.url(path)).json(body)).await
    }

    async fn put_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        self.send_json(self.http.put(self.url(path)).json(body)).await
    }

    async fn delete_ok(&self, path: &str) -> Result<(), AppError> {
        self.send_ok(self.http.delete(self.url(path))).await
    }

    // ── Auth ──

    pub async fn register(&self, req: &CreateAccountRequest) -> Result<(), AppError> {
        self.send_ok(self.http.post(self.url("register")).json(req))
            .await
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, AppError> {
        self.post_json("login", req).await
    }

    /// Server-side session invalidation. Best-effort; callers clear the
    /// local session regardless of the outcome.
    pub async fn logout(&self) -> Result<(), AppError> {
        self.send_ok(self.http.post(self.url("logout"))).await
    }

    // ── Connected principals ──

    pub async fn connected_admin(&self) -> Result<User, AppError> {
        self.get_json("admin-connected").await
    }

    pub async fn connected_manager(&self) -> Result<User, AppError> {
        self.get_json("manager-connected").await
    }

    pub async fn connected_user(&self) -> Result<User, AppError> {
        self.get_json("user-connected").await
    }

    // ── Collections ──

    pub async fn all_users(&self) -> Result<Vec<User>, AppError> {
        self.get_json("all-users").await
    }

    pub async fn all_admins(&self) -> Result<Vec<Admin>, AppError> {
        self.get_json("all-admins").await
    }

    /// Assignable users, visible to every authenticated role.
    pub async fn users(&self) -> Result<Vec<User>, AppError> {
        self.get_json("users").await
    }

    pub async fn projects(&self) -> Result<Vec<Project>, AppError> {
        self.get_json("projects").await
    }

    pub async fn projects_with_users(&self) -> Result<Vec<Project>, AppError> {
        self.get_json("projects-with-users").await
    }

    pub async fn my_projects(&self) -> Result<Vec<Project>, AppError> {
        self.get_json("my-projects").await
    }

    pub async fn assigned_projects(&self) -> Result<Vec<Project>, AppError> {
        self.get_json("assigned-projects").await
    }

    // ── User CRUD (admin dashboard) ──

    pub async fn create_user(&self, req: &CreateAccountRequest) -> Result<User, AppError> {
        let envelope: UserEnvelope = self.post_json("create-user", req).await?;
        Ok(envelope.user)
    }

    pub async fn update_user(
        &self,
        id: i64,
        req: &UpdateAccountRequest,
    ) -> Result<User, AppError> {
        let envelope: UserEnvelope = self.put_json(&format!("update-user/{id}"), req).await?;
        Ok(envelope.user)
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        self.delete_ok(&format!("delete-user/{id}")).await
    }

    // ── Admin CRUD (manager dashboard) ──

    pub async fn create_admin(&self, req: &CreateAccountRequest) -> Result<Admin, AppError> {
        let envelope: AdminEnvelope = self.post_json("create-admin", req).await?;
        Ok(envelope.admin)
    }

    pub async fn update_admin(
        &self,
        id: i64,
        req: &UpdateAccountRequest,
    ) -> Result<Admin, AppError> {
        let envelope: AdminEnvelope = self.put_json(&format!("update-admin/{id}"), req).await?;
        Ok(envelope.admin)
    }

    pub async fn delete_admin(&self, id: i64) -> Result<(), AppError> {
        self.delete_ok(&format!("delete-admin/{id}")).await
    }

    // ── Project CRUD (admin dashboard) ──

    pub async fn create_project(&self, req: &CreateProjectRequest) -> Result<Project, AppError> {
        let envelope: ProjectEnvelope = self.post_json("create-project", req).await?;
        Ok(envelope.project)
    }

    pub async fn update_project(
        &self,
        id: i64,
        req: &UpdateProjectRequest,
    ) -> Result<Project, AppError> {
        let envelope: ProjectEnvelope = self.put_json(&format!("update-project/{id}"), req).await?;
        Ok(envelope.project)
    }

    pub async fn delete_project(&self, id: i64) -> Result<(), AppError> {
        self.delete_ok(&format!("delete-project/{id}")).await
    }

    // ── Own projects (user dashboard) ──

    pub async fn create_own_project(
        &self,
        req: &CreateProjectRequest,
    ) -> Result<Project, AppError> {
        let envelope: ProjectEnvelope = self.post_json("user-projects", req).await?;
        Ok(envelope.project)
    }

    pub async fn update_own_project(
        &self,
        id: i64,
        req: &UpdateProjectRequest,
    ) -> Result<Project, AppError> {
        let envelope: ProjectEnvelope = self.put_json(&format!("user-projects/{id}"), req).await?;
        Ok(envelope.project)
    }

    pub async fn delete_own_project(&self, id: i64) -> Result<(), AppError> {
        self.delete_ok(&format!("user-projects/{id}")).await
    }
}

/// Hook building an API client that carries the current session's
/// bearer token. Signed-out contexts (login, register) get a client
/// without an `Authorization` header.
pub fn use_api() -> ApiClient {
    let session = use_session();
    ApiClient::new(config::api_base_url(), session.token())
}
