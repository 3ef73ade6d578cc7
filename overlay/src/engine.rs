//! Per-record annotation engine.
//!
//! [`EngineCore`] owns everything one annotatable floorplan carries between
//! events: cached layout geometry, draw/erase mode, the in-progress drag,
//! the committed box list, and the refresh generation counter. It is pure
//! state-in/actions-out, so the whole gesture state machine is testable
//! without a browser; the component layer applies the returned [`Action`]s
//! to the DOM.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::boxes::{BoxKey, BoxSet};
use crate::geom::{Point, Rect, clamp, trunc_px};
use crate::input::{DragState, Mode};

/// Cached layout rectangles for one record, in viewport coordinates.
///
/// Stale after any scroll or resize; the host re-measures on pointer-down
/// and on window scroll.
#[derive(Debug, Clone, Copy, Default)]
pub struct Geometry {
    /// Bounding rectangle of the canvas container.
    pub canvas: Rect,
    /// Bounding rectangle of the annotated image.
    pub image: Rect,
}

impl Geometry {
    /// Offset of the image's origin within the canvas.
    #[must_use]
    pub fn offset(&self) -> Point {
        Point::new(self.image.x - self.canvas.x, self.image.y - self.canvas.y)
    }
}

/// What the host should do to the page after an input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Nothing to apply.
    None,
    /// A drag opened; show a zero-sized overlay and start tracking moves.
    DragStarted(Rect),
    /// The drag rectangle changed.
    DragMoved(Rect),
    /// The drag committed a new box.
    BoxAdded(BoxKey),
    /// The drag resolved to a key that already exists; drop the overlay
    /// silently.
    DuplicateDiscarded,
    /// The drag clamped down to nothing; flash the overlay before dropping
    /// it.
    DegenerateRejected,
    /// An in-progress drag was abandoned.
    DragCancelled,
    /// A box was erased.
    BoxRemoved(BoxKey),
    /// Draw/erase mode flipped.
    ModeChanged(Mode),
}

/// One mask-preview request: the serialized box list for the feedback
/// field and the URL to fetch, tagged with the generation that must still
/// be current when the response lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshRequest {
    pub generation: u64,
    pub url: String,
    pub feedback: String,
}

/// Annotation state machine for a single floorplan.
pub struct EngineCore {
    endpoint: String,
    geometry: Geometry,
    mode: Mode,
    drag: DragState,
    boxes: BoxSet,
    refresh_seq: u64,
}

impl EngineCore {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            geometry: Geometry::default(),
            mode: Mode::default(),
            drag: DragState::default(),
            boxes: BoxSet::new(),
            refresh_seq: 0,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// The committed boxes, in insertion order.
    #[must_use]
    pub fn boxes(&self) -> &BoxSet {
        &self.boxes
    }

    // --- Layout ---

    /// Replace the cached layout rectangles.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    /// Seed the box list from rectangles the server rendered into the page,
    /// given in canvas-relative CSS pixels. Duplicates are dropped.
    pub fn load_existing(&mut self, rects: &[Rect]) {
        let offset = self.geometry.offset();
        for rect in rects {
            self.boxes.insert(BoxKey::from_css_rect(*rect, offset));
        }
    }

    // --- Pointer gestures ---

    /// Open a drag at `client` (viewport coordinates). Only meaningful in
    /// Draw mode. The host must re-measure geometry immediately before
    /// calling, since the canvas may have moved since the last event.
    pub fn pointer_down(&mut self, client: Point) -> Action {
        if self.mode != Mode::Draw {
            return Action::None;
        }
        let origin = self.geometry.canvas.relative(client);
        let rect = Rect::zero_at(origin);
        self.drag = DragState::Dragging { origin, rect };
        Action::DragStarted(rect)
    }

    /// Track a pointer move while a drag is open.
    pub fn pointer_move(&mut self, client: Point) -> Action {
        let DragState::Dragging { origin, .. } = self.drag else {
            return Action::None;
        };
        let rect = Rect::from_corners(origin, self.geometry.canvas.relative(client));
        self.drag = DragState::Dragging { origin, rect };
        Action::DragMoved(rect)
    }

    /// Resolve the open drag: convert to image-local pixels, clamp every
    /// edge to the image, and commit unless degenerate or duplicate.
    pub fn pointer_up(&mut self) -> Action {
        let DragState::Dragging { rect, .. } = self.drag else {
            return Action::None;
        };
        self.drag = DragState::Idle;

        let offset = self.geometry.offset();
        let im_w = trunc_px(self.geometry.image.width);
        let im_h = trunc_px(self.geometry.image.height);
        let top = clamp(0, trunc_px(rect.y - offset.y), im_h);
        let left = clamp(0, trunc_px(rect.x - offset.x), im_w);
        let bottom = clamp(0, trunc_px(rect.y + rect.height - offset.y), im_h);
        let right = clamp(0, trunc_px(rect.x + rect.width - offset.x), im_w);

        if top == bottom || left == right {
            return Action::DegenerateRejected;
        }
        let key = BoxKey::new(top, left, bottom, right);
        if self.boxes.insert(key) {
            Action::BoxAdded(key)
        } else {
            Action::DuplicateDiscarded
        }
    }

    // --- Mode / erase ---

    /// Flip draw/erase mode. An open drag is cancelled before the flip so
    /// the host drops its overlay along with the move listener.
    pub fn toggle_mode(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if matches!(self.drag, DragState::Dragging { .. }) {
            self.drag = DragState::Idle;
            actions.push(Action::DragCancelled);
        }
        self.mode = self.mode.toggled();
        actions.push(Action::ModeChanged(self.mode));
        actions
    }

    /// Remove a box in Erase mode. In Draw mode clicking a box does
    /// nothing.
    pub fn erase(&mut self, key: BoxKey) -> Action {
        if self.mode != Mode::Erase {
            return Action::None;
        }
        if self.boxes.remove(&key) {
            Action::BoxRemoved(key)
        } else {
            Action::None
        }
    }

    // --- Refresh ---

    /// Start a mask-preview refresh: serialize the boxes for the feedback
    /// field, build the request URL (no query parameter when the set is
    /// empty), and supersede any request still in flight.
    pub fn begin_refresh(&mut self) -> RefreshRequest {
        self.refresh_seq += 1;
        let feedback = self.boxes.serialized();
        let url = if self.boxes.is_empty() {
            self.endpoint.clone()
        } else {
            format!("{}?boxes={}", self.endpoint, feedback)
        };
        RefreshRequest { generation: self.refresh_seq, url, feedback }
    }

    /// Whether a response for `generation` is still the latest request.
    /// Stale responses are dropped instead of overwriting the image.
    #[must_use]
    pub fn accept_refresh(&self, generation: u64) -> bool {
        generation == self.refresh_seq
    }
}
