//! Box bookkeeping: canonical keys and the per-record box list.
//!
//! A [`BoxKey`] identifies one annotated rectangle by its image-local
//! integer pixel extent. Keys render as `"{top}-{left}-{bottom}-{right}"`
//! only at the form/network boundary; everywhere else they are structured
//! values with field-wise equality and a total order.

#[cfg(test)]
#[path = "boxes_test.rs"]
mod boxes_test;

use std::fmt;

use crate::geom::{Point, Rect, trunc_px};

/// Image-local integer pixel extent of one annotated box.
///
/// Invariant: `top < bottom` and `left < right` for every key the engine
/// commits; degenerate extents are rejected before a key is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxKey {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl BoxKey {
    #[must_use]
    pub fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self { top, left, bottom, right }
    }

    /// Key for a pre-existing rectangle the server rendered in
    /// canvas-relative CSS pixels: subtract the image offset and truncate
    /// each field.
    #[must_use]
    pub fn from_css_rect(rect: Rect, offset: Point) -> Self {
        let top = trunc_px(rect.y - offset.y);
        let left = trunc_px(rect.x - offset.x);
        Self {
            top,
            left,
            bottom: top + trunc_px(rect.height),
            right: left + trunc_px(rect.width),
        }
    }
}

impl fmt::Display for BoxKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}-{}", self.top, self.left, self.bottom, self.right)
    }
}

/// Insertion-ordered list of unique box keys.
#[derive(Debug, Clone, Default)]
pub struct BoxSet {
    entries: Vec<BoxKey>,
}

impl BoxSet {
    #[must_use]
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Append a key unless an identical one is already present.
    /// Returns whether the key was added.
    pub fn insert(&mut self, key: BoxKey) -> bool {
        if self.entries.contains(&key) {
            return false;
        }
        self.entries.push(key);
        true
    }

    /// Remove a key. Returns whether it was present.
    pub fn remove(&mut self, key: &BoxKey) -> bool {
        let before = self.entries.len();
        self.entries.retain(|k| k != key);
        self.entries.len() != before
    }

    #[must_use]
    pub fn contains(&self, key: &BoxKey) -> bool {
        self.entries.contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &BoxKey> {
        self.entries.iter()
    }

    /// All keys joined with `-` — the wire and form-field encoding.
    /// Empty string when the set is empty.
    #[must_use]
    pub fn serialized(&self) -> String {
        self.entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("-")
    }
}
