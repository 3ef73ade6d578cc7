//! Live portal image with periodic cache-busting reloads.

use gloo_timers::callback::Interval;
use leptos::prelude::*;

use crate::state::session::PortalConfig;

/// Milliseconds between portal reloads.
const RELOAD_INTERVAL_MS: u32 = 15_000;

/// Continuously refreshed overlay image. Each reload bumps a counter in
/// the URL path so the browser cannot serve the previous frame from cache.
/// The interval runs for the page lifetime.
#[component]
pub fn Portal(config: PortalConfig) -> impl IntoView {
    let base = config.image;
    let src = RwSignal::new(format!("{base}/0"));

    let mut counter = 0_u64;
    Interval::new(RELOAD_INTERVAL_MS, move || {
        counter += 1;
        src.set(format!("{base}/{counter}"));
    })
    .forget();

    view! { <img class="portal" src=move || src.get() alt="Live overlay"/> }
}
