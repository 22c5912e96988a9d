/// A position in surface-local coordinates: origin at the canvas
/// top-left, sub-pixel precision preserved as received.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Translates absolute client coordinates into surface-local ones by
/// subtracting the reference element's document offset. The caller must
/// guarantee the reference element is attached to the document.
pub fn map_position(client_x: f64, client_y: f64, origin_left: f64, origin_top: f64) -> Point {
    Point {
        x: client_x - origin_left,
        y: client_y - origin_top,
    }
}
