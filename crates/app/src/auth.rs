use dioxus::prelude::*;
use shared_types::{Role, Session};

use crate::session;

/// Global session state, provided as context at the app root.
///
/// Views read and mutate the session only through this object; the
/// persistent storage behind it is an implementation detail of the
/// `session` module.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionState {
    pub session: Signal<Option<Session>>,
}

impl SessionState {
    /// Restore any persisted session from browser storage.
    pub fn restore() -> Self {
        Self {
            session: Signal::new(session::load()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }

    /// Role of the current session; `Role::User` when signed out.
    pub fn role(&self) -> Role {
        self.session
            .read()
            .as_ref()
            .map(|s| s.role)
            .unwrap_or_default()
    }

    /// Bearer token of the current session, if any.
    pub fn token(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.token.clone())
    }

    /// Persist a fresh session and make it current.
    pub fn sign_in(&mut self, token: String, role: Role) {
        let session = Session { token, role };
        session::store(&session);
        self.session.set(Some(session));
    }

    /// Clear the persisted session and the in-memory state.
    pub fn sign_out(&mut self) {
        session::clear();
        self.session.set(None);
    }
}

/// Hook to access session state.
pub fn use_session() -> SessionState {
    use_context::<SessionState>()
}
