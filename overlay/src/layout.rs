//! Layout measurement: the only module in this crate that touches the DOM.
//!
//! Reads bounding rectangles and pointer positions out of `web_sys` types
//! and hands them to the engine as plain geometry. Overlay positions are
//! only meaningful against fresh layout, so hosts call [`measure`] on
//! pointer-down and again whenever the window scrolls.

use web_sys::{Element, MouseEvent};

use crate::engine::Geometry;
use crate::geom::{Point, Rect};

fn bounding_rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

/// Measure the canvas container and its image into a fresh [`Geometry`].
#[must_use]
pub fn measure(canvas: &Element, image: &Element) -> Geometry {
    Geometry { canvas: bounding_rect(canvas), image: bounding_rect(image) }
}

/// Viewport-relative pointer position of a mouse event.
#[must_use]
pub fn event_point(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}
