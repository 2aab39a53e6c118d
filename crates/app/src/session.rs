//! Persistent session storage: two key-value entries (token and role).
//!
//! Browser builds persist to `window.localStorage` so the session
//! survives reloads. Native builds (unit and integration tests) keep the
//! same interface over an in-process map.

use shared_types::{Role, Session};

const TOKEN_KEY: &str = "auth_token";
const ROLE_KEY: &str = "auth_role";

/// Read the persisted session, if any. A missing or empty token means
/// no session; an unrecognized role string degrades to `Role::User`.
pub fn load() -> Option<Session> {
    let token = backend::get(TOKEN_KEY)?;
    if token.is_empty() {
        return None;
    }
    let role = backend::get(ROLE_KEY)
        .map(|r| Role::from_str_or_default(&r))
        .unwrap_or_default();
    Some(Session { token, role })
}

/// Persist both session entries.
pub fn store(session: &Session) {
    backend::set(TOKEN_KEY, &session.token);
    backend::set(ROLE_KEY, session.role.as_str());
}

/// Remove both session entries.
pub fn clear() {
    backend::remove(TOKEN_KEY);
    backend::remove(ROLE_KEY);
}

#[cfg(target_arch = "wasm32")]
mod backend {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }

    pub fn get(key: &str) -> Option<String> {
        storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    pub fn set(key: &str, value: &str) {
        if let Some(s) = storage() {
            let _ = s.set_item(key, value);
        }
    }

    pub fn remove(key: &str) {
        if let Some(s) = storage() {
            let _ = s.remove_item(key);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use std::cell::RefCell;
    use std::collections::HashMap;

    thread_local! {
        static STORE: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
    }

    pub fn get(key: &str) -> Option<String> {
        STORE.with(|s| s.borrow().get(key).cloned())
    }

    pub fn set(key: &str, value: &str) {
        STORE.with(|s| {
            s.borrow_mut().insert(key.to_string(), value.to_string());
        });
    }

    pub fn remove(key: &str) {
        STORE.with(|s| {
            s.borrow_mut().remove(key);
        });
    }
}
