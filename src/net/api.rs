//! HTTP helper for the mask-preview endpoint.
//!
//! ERROR HANDLING
//! ==============
//! Preview refreshes are fire-and-forget: callers get an `Option`, and a
//! `None` simply leaves the current image in place. There is no retry and
//! no user-visible failure state.

/// GET `url` and return the response body on a successful status.
///
/// The body is the URL (or data payload) the record assigns as its new
/// image source.
pub async fn fetch_preview(url: &str) -> Option<String> {
    let resp = gloo_net::http::Request::get(url).send().await.ok()?;
    if !resp.ok() {
        log::debug!("mask preview request failed with status {}", resp.status());
        return None;
    }
    resp.text().await.ok()
}
