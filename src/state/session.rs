//! Session bootstrap: the configuration the server embeds in the page.
//!
//! The page carries a JSON `<script>` block describing every annotatable
//! floorplan (image, mask-preview endpoint, pre-existing boxes) and the
//! optional live portal image. The session is parsed once at startup and
//! owned by the root component; a missing or malformed block degrades to
//! an empty page rather than a panic.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use overlay::geom::Rect;
use serde::Deserialize;

/// Id of the page element holding the JSON configuration.
pub const CONFIG_ELEMENT_ID: &str = "floormark-config";

/// Everything the page needs to build its records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// Annotatable floorplans, in display order.
    #[serde(default)]
    pub plans: Vec<PlanConfig>,
    /// Live overlay image, when the page shows one.
    #[serde(default)]
    pub portal: Option<PortalConfig>,
}

/// One annotatable floorplan.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanConfig {
    /// Stable id, used for the feedback form field name.
    pub id: String,
    /// Human-readable floorplan name.
    pub name: String,
    /// Initial overlay image URL.
    pub image: String,
    /// Mask-preview endpoint, parameterized with `?boxes=` on refresh.
    pub endpoint: String,
    /// Pre-existing boxes in canvas-relative CSS pixels, exactly as the
    /// server rendered them.
    #[serde(default)]
    pub boxes: Vec<Rect>,
}

/// The periodically refreshed portal image.
#[derive(Debug, Clone, Deserialize)]
pub struct PortalConfig {
    /// Base URL; a cache-busting counter is appended per reload.
    pub image: String,
}

impl SessionConfig {
    /// Parse a configuration from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error for malformed input.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read the configuration block out of the current document. Returns
    /// `None` when the block is missing, or (with a logged warning) when
    /// it does not parse.
    #[must_use]
    pub fn from_document() -> Option<Self> {
        let text = web_sys::window()?
            .document()?
            .get_element_by_id(CONFIG_ELEMENT_ID)?
            .text_content()?;
        match Self::parse(&text) {
            Ok(config) => Some(config),
            Err(err) => {
                log::warn!("ignoring malformed session configuration: {err}");
                None
            }
        }
    }
}
