//! Root application component.

use leptos::prelude::*;

use crate::components::annotation_board::AnnotationBoard;
use crate::components::portal::Portal;
use crate::state::session::SessionConfig;

/// Root component: builds the session from the page-injected configuration
/// and renders the live portal plus one annotation board per floorplan.
///
/// The session is constructed exactly once; boards are a fixed list that
/// lives for the page lifetime.
#[component]
pub fn App() -> impl IntoView {
    let session = SessionConfig::from_document().unwrap_or_default();

    view! {
        <main class="config-page">
            {session.portal.map(|portal| view! { <Portal config=portal/> })}
            {session
                .plans
                .into_iter()
                .map(|plan| view! { <AnnotationBoard config=plan/> })
                .collect::<Vec<_>>()}
        </main>
    }
}
