use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement, PointerEvent, Window};

use crate::geometry::{map_position, Point};

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

/// Maps a pointer event's absolute client coordinates into the canvas's
/// surface-local coordinate space.
pub fn event_to_point(event: &PointerEvent, canvas: &HtmlCanvasElement) -> Point {
    map_position(
        f64::from(event.client_x()),
        f64::from(event.client_y()),
        f64::from(canvas.offset_left()),
        f64::from(canvas.offset_top()),
    )
}

pub fn viewport_size(window: &Window) -> Result<(u32, u32), JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((width as u32, height as u32))
}

pub fn debug_enabled(window: &Window) -> bool {
    let search = window.location().search().ok().unwrap_or_default();
    search.contains("debug=1") || search.contains("debug=true")
}
