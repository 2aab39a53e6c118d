use std::sync::{Arc, Mutex};

use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use app::api::ApiClient;

/// Bearer token issued by the stub on every successful login.
pub const TOKEN: &str = "t1";

/// Password accepted for every seeded account.
pub const PASSWORD: &str = "secret123";

/// In-memory backend state. Collections hold the raw JSON shapes the
/// real API serves.
pub struct StubData {
    pub principals: Vec<Value>,
    pub users: Vec<Value>,
    pub admins: Vec<Value>,
    pub projects: Vec<Value>,
    pub my_projects: Vec<Value>,
    pub assigned_projects: Vec<Value>,
    pub registered: Vec<Value>,
    pub next_id: i64,
    pub logout_calls: usize,
}

pub type StubState = Arc<Mutex<StubData>>;

pub fn account(id: i64, name: &str, email: &str, role: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": email,
        "roles": [{"name": role}],
    })
}

pub fn project(id: i64, title: &str, status: &str, users: Vec<Value>) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{title} description"),
        "status": status,
        "creator": null,
        "users": users,
    })
}

impl StubData {
    fn seeded() -> Self {
        let alice = account(1, "Alice", "alice@example.com", "user");
        let bob = account(2, "Bob", "bob@example.com", "user");
        Self {
            principals: vec![
                account(10, "Ada Admin", "admin@example.com", "admin"),
                account(11, "Mara Manager", "manager@example.com", "manager"),
                account(1, "Alice", "alice@example.com", "user"),
            ],
            users: vec![alice.clone(), bob.clone()],
            admins: vec![account(10, "Ada Admin", "admin@example.com", "admin")],
            projects: vec![
                project(101, "Website", "pending", vec![alice.clone()]),
                project(102, "Migration", "in_progress", vec![alice.clone(), bob]),
                project(103, "Audit", "completed", vec![]),
            ],
            my_projects: vec![project(104, "Side Project", "pending", vec![alice.clone()])],
            assigned_projects: vec![project(102, "Migration", "in_progress", vec![alice])],
            registered: Vec::new(),
            next_id: 500,
            logout_calls: 0,
        }
    }

    fn take_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn unauthenticated() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Unauthenticated."})),
    )
        .into_response()
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": format!("{what} not found")})),
    )
        .into_response()
}

fn validation_error(field: &str, message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "message": "The given data was invalid.",
            "errors": { field: [message] },
        })),
    )
        .into_response()
}

async fn require_bearer(headers: HeaderMap, req: Request, next: Next) -> Response {
    let expected = format!("Bearer {TOKEN}");
    let authed = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == expected)
        .unwrap_or(false);
    if authed {
        next.run(req).await
    } else {
        unauthenticated()
    }
}

async fn register(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let mut data = state.lock().unwrap();
    let taken = data
        .principals
        .iter()
        .chain(data.users.iter())
        .any(|a| a["email"] == email.as_str());
    if taken {
        return validation_error("email", "The email has already been taken.");
    }
    let id = data.take_id();
    let user = account(id, body["name"].as_str().unwrap_or_default(), &email, "user");
    data.registered.push(user.clone());
    (StatusCode::CREATED, Json(json!({"user": user}))).into_response()
}

async fn login(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let data = state.lock().unwrap();
    match data.principals.iter().find(|a| a["email"] == email) {
        Some(user) if password == PASSWORD => (
            StatusCode::OK,
            Json(json!({"access_token": TOKEN, "user": user})),
        )
            .into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials"})),
        )
            .into_response(),
    }
}

async fn logout(State(state): State<StubState>) -> Response {
    state.lock().unwrap().logout_calls += 1;
    (StatusCode::OK, Json(json!({"message": "Logged out"}))).into_response()
}

fn connected(state: &StubState, role: &str) -> Response {
    let data = state.lock().unwrap();
    match data
        .principals
        .iter()
        .find(|a| a["roles"][0]["name"] == role)
    {
        Some(user) => Json(user.clone()).into_response(),
        None => not_found("Account"),
    }
}

async fn admin_connected(State(state): State<StubState>) -> Response {
    connected(&state, "admin")
}

async fn manager_connected(State(state): State<StubState>) -> Response {
    connected(&state, "manager")
}

async fn user_connected(State(state): State<StubState>) -> Response {
    connected(&state, "user")
}

async fn all_users(State(state): State<StubState>) -> Json<Vec<Value>> {
    Json(state.lock().unwrap().users.clone())
}

async fn all_admins(State(state): State<StubState>) -> Json<Vec<Value>> {
    Json(state.lock().unwrap().admins.clone())
}

async fn projects(State(state): State<StubState>) -> Json<Vec<Value>> {
    Json(state.lock().unwrap().projects.clone())
}

async fn my_projects(State(state): State<StubState>) -> Json<Vec<Value>> {
    Json(state.lock().unwrap().my_projects.clone())
}

async fn assigned_projects(State(state): State<StubState>) -> Json<Vec<Value>> {
    Json(state.lock().unwrap().assigned_projects.clone())
}

fn make_account(data: &mut StubData, body: &Value, role: &str) -> Value {
    let id = data.take_id();
    account(
        id,
        body["name"].as_str().unwrap_or_default(),
        body["email"].as_str().unwrap_or_default(),
        role,
    )
}

fn apply_account_update(entry: &mut Value, body: &Value) {
    entry["name"] = body["name"].clone();
    entry["email"] = body["email"].clone();
}

async fn create_user(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    let mut data = state.lock().unwrap();
    let user = make_account(&mut data, &body, "user");
    data.users.push(user.clone());
    (StatusCode::CREATED, Json(json!({"user": user}))).into_response()
}

async fn update_user(
    State(state): State<StubState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut data = state.lock().unwrap();
    match data.users.iter_mut().find(|u| u["id"] == id) {
        Some(user) => {
            apply_account_update(user, &body);
            Json(json!({"user": user.clone()})).into_response()
        }
        None => not_found("User"),
    }
}

async fn delete_user(State(state): State<StubState>, Path(id): Path<i64>) -> Response {
    let mut data = state.lock().unwrap();
    let before = data.users.len();
    data.users.retain(|u| u["id"] != id);
    if data.users.len() < before {
        Json(json!({"message": "User deleted"})).into_response()
    } else {
        not_found("User")
    }
}

async fn create_admin(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    let mut data = state.lock().unwrap();
    let admin = make_account(&mut data, &body, "admin");
    data.admins.push(admin.clone());
    (StatusCode::CREATED, Json(json!({"admin": admin}))).into_response()
}

async fn update_admin(
    State(state): State<StubState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut data = state.lock().unwrap();
    match data.admins.iter_mut().find(|a| a["id"] == id) {
        Some(admin) => {
            apply_account_update(admin, &body);
            Json(json!({"admin": admin.clone()})).into_response()
        }
        None => not_found("Admin"),
    }
}

async fn delete_admin(State(state): State<StubState>, Path(id): Path<i64>) -> Response {
    let mut data = state.lock().unwrap();
    let before = data.admins.len();
    data.admins.retain(|a| a["id"] != id);
    if data.admins.len() < before {
        Json(json!({"message": "Admin deleted"})).into_response()
    } else {
        not_found("Admin")
    }
}

fn make_project(data: &mut StubData, body: &Value) -> Result<Value, Response> {
    let title = body["title"].as_str().unwrap_or_default();
    if title.is_empty() {
        return Err(validation_error("title", "The title field is required."));
    }
    let users = resolve_assignees(data, body);
    let id = data.take_id();
    Ok(json!({
        "id": id,
        "title": title,
        "description": body["description"].clone(),
        "status": body["status"].clone(),
        "creator": null,
        "users": users,
    }))
}

fn resolve_assignees(data: &StubData, body: &Value) -> Vec<Value> {
    let ids: Vec<i64> = body["user_ids"]
        .as_array()
        .map(|a| a.iter().filter_map(Value::as_i64).collect())
        .unwrap_or_default();
    data.users
        .iter()
        .filter(|u| u["id"].as_i64().map(|id| ids.contains(&id)).unwrap_or(false))
        .cloned()
        .collect()
}

fn apply_project_update(data: &StubData, entry: &mut Value, body: &Value) {
    entry["title"] = body["title"].clone();
    entry["description"] = body.get("description").cloned().unwrap_or(Value::Null);
    entry["status"] = body["status"].clone();
    // Updates never touch assignees; only bodies carrying user_ids do.
    if body.get("user_ids").is_some() {
        entry["users"] = Value::Array(resolve_assignees(data, body));
    }
}

async fn create_project(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    let mut data = state.lock().unwrap();
    match make_project(&mut data, &body) {
        Ok(project) => {
            data.projects.push(project.clone());
            (StatusCode::CREATED, Json(json!({"project": project}))).into_response()
        }
        Err(resp) => resp,
    }
}

async fn update_project(
    State(state): State<StubState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut data = state.lock().unwrap();
    let Some(pos) = data.projects.iter().position(|p| p["id"] == id) else {
        return not_found("Project");
    };
    let mut entry = data.projects[pos].clone();
    apply_project_update(&data, &mut entry, &body);
    data.projects[pos] = entry.clone();
    Json(json!({"project": entry})).into_response()
}

async fn delete_project(State(state): State<StubState>, Path(id): Path<i64>) -> Response {
    let mut data = state.lock().unwrap();
    let before = data.projects.len();
    data.projects.retain(|p| p["id"] != id);
    if data.projects.len() < before {
        Json(json!({"message": "Project deleted"})).into_response()
    } else {
        not_found("Project")
    }
}

async fn create_own_project(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    let mut data = state.lock().unwrap();
    match make_project(&mut data, &body) {
        Ok(project) => {
            data.my_projects.push(project.clone());
            (StatusCode::CREATED, Json(json!({"project": project}))).into_response()
        }
        Err(resp) => resp,
    }
}

async fn update_own_project(
    State(state): State<StubState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut data = state.lock().unwrap();
    let Some(pos) = data.my_projects.iter().position(|p| p["id"] == id) else {
        return not_found("Project");
    };
    let mut entry = data.my_projects[pos].clone();
    apply_project_update(&data, &mut entry, &body);
    data.my_projects[pos] = entry.clone();
    Json(json!({"project": entry})).into_response()
}

async fn delete_own_project(State(state): State<StubState>, Path(id): Path<i64>) -> Response {
    let mut data = state.lock().unwrap();
    let before = data.my_projects.len();
    data.my_projects.retain(|p| p["id"] != id);
    if data.my_projects.len() < before {
        Json(json!({"message": "Project deleted"})).into_response()
    } else {
        not_found("Project")
    }
}

fn router(state: StubState) -> Router {
    let public = Router::new()
        .route("/register", post(register))
        .route("/login", post(login));

    let protected = Router::new()
        .route("/logout", post(logout))
        .route("/admin-connected", get(admin_connected))
        .route("/manager-connected", get(manager_connected))
        .route("/user-connected", get(user_connected))
        .route("/all-users", get(all_users))
        .route("/all-admins", get(all_admins))
        .route("/users", get(all_users))
        .route("/projects", get(projects))
        .route("/projects-with-users", get(projects))
        .route("/my-projects", get(my_projects))
        .route("/assigned-projects", get(assigned_projects))
        .route("/create-user", post(create_user))
        .route("/update-user/{id}", put(update_user))
        .route("/delete-user/{id}", delete(delete_user))
        .route("/create-admin", post(create_admin))
        .route("/update-admin/{id}", put(update_admin))
        .route("/delete-admin/{id}", delete(delete_admin))
        .route("/create-project", post(create_project))
        .route("/update-project/{id}", put(update_project))
        .route("/delete-project/{id}", delete(delete_project))
        .route("/user-projects", post(create_own_project))
        .route(
            "/user-projects/{id}",
            put(update_own_project).delete(delete_own_project),
        )
        .layer(middleware::from_fn(require_bearer));

    Router::new()
        .nest("/api", public.merge(protected))
        .with_state(state)
}

/// Spawn the stub backend on an ephemeral port. Returns the API base
/// URL and a handle to the in-memory state for assertions.
pub async fn spawn_stub() -> (String, StubState) {
    let state: StubState = Arc::new(Mutex::new(StubData::seeded()));
    let app = router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub listener addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });

    (format!("http://{addr}/api"), state)
}

/// Client carrying the stub's bearer token.
pub fn client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, Some(TOKEN.to_string()))
}

/// Client with no session, as used on the login and register pages.
pub fn anon_client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, None)
}
