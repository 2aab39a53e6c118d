use dioxus::prelude::*;

pub mod api;
pub mod auth;
pub mod config;
pub mod forms;
pub mod routes;
pub mod session;

use auth::SessionState;
use routes::Route;

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Root component: restores any persisted session into context and
/// mounts the router. Every view reaches the session through this
/// context object — there are no other reads of browser storage.
#[component]
pub fn App() -> Element {
    use_context_provider(SessionState::restore);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}
