use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, HtmlElement, PointerEvent};

use crate::debounce::Debouncer;
use crate::dom::{debug_enabled, event_to_point, get_element, viewport_size};
use crate::palette::{color_from_event, render_palette};
use crate::state::{transition, Action, InteractionState, DEFAULT_PEN_WIDTH, RESIZE_DEBOUNCE_MS};
use crate::surface::Surface;

fn document_ready_state(document: &web_sys::Document) -> Option<String> {
    Reflect::get(document.as_ref(), &JsValue::from_str("readyState"))
        .ok()?
        .as_string()
}

/// Runs one interaction event through the state machine and applies the
/// resulting paint, if any. Painting before the canvas has produced a
/// context is skipped; the drawing simply does not occur until the
/// context is ready.
fn dispatch(
    state: &Rc<RefCell<InteractionState>>,
    surface: &Rc<RefCell<Surface>>,
    action: Action,
    debug: bool,
) {
    let paint = transition(&mut state.borrow_mut(), action);
    let Some(paint) = paint else {
        return;
    };
    if let Err(error) = surface.borrow_mut().apply(paint) {
        if debug {
            web_sys::console::warn_1(&format!("Paint skipped: {error}").into());
        }
    }
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let started = Rc::new(Cell::new(false));

    if document_ready_state(&document).as_deref() == Some("complete") {
        started.set(true);
        return start_app();
    }

    let onload_started = started.clone();
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        if onload_started.replace(true) {
            return;
        }
        if let Err(err) = start_app() {
            web_sys::console::error_1(&err);
        }
    });
    window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();

    Ok(())
}

fn start_app() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let debug = debug_enabled(&window);

    let canvas: HtmlCanvasElement = get_element(&document, "surface")?;
    let palette_el: HtmlElement = get_element(&document, "palette")?;

    // Size to the full viewport before any drawing can occur; waiting
    // for the first resize event would leave the default backing store.
    let mut surface = Surface::attach(canvas.clone());
    let (width, height) = viewport_size(&window)?;
    surface.resize(width, height)?;
    surface.configure(DEFAULT_PEN_WIDTH)?;
    if debug {
        web_sys::console::log_1(&format!("Surface attached at {width}x{height}").into());
    }

    let surface = Rc::new(RefCell::new(surface));
    let state = Rc::new(RefCell::new(InteractionState::new()));
    let selected = Rc::new(Cell::new(0usize));

    render_palette(&document, &palette_el, selected.get());

    {
        let down_state = state.clone();
        let down_surface = surface.clone();
        let down_canvas = canvas.clone();
        let ondown = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            if event.button() != 0 {
                return;
            }
            event.prevent_default();
            let point = event_to_point(&event, &down_canvas);
            dispatch(&down_state, &down_surface, Action::SetAxis(point), debug);
            dispatch(&down_state, &down_surface, Action::Press, debug);
            let _ = down_canvas.set_pointer_capture(event.pointer_id());
        });
        canvas.add_event_listener_with_callback("pointerdown", ondown.as_ref().unchecked_ref())?;
        ondown.forget();
    }

    {
        let move_state = state.clone();
        let move_surface = surface.clone();
        let move_canvas = canvas.clone();
        let onmove = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let point = event_to_point(&event, &move_canvas);
            dispatch(&move_state, &move_surface, Action::SetAxis(point), debug);
        });
        canvas.add_event_listener_with_callback("pointermove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    {
        let up_state = state.clone();
        let up_surface = surface.clone();
        let up_canvas = canvas.clone();
        let onup = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            dispatch(&up_state, &up_surface, Action::Depress, debug);
            let _ = up_canvas.release_pointer_capture(event.pointer_id());
        });
        canvas.add_event_listener_with_callback("pointerup", onup.as_ref().unchecked_ref())?;
        onup.forget();
    }

    {
        // A cancelled pointer (tab switch, capture loss) ends the stroke
        // the same way a release does.
        let cancel_state = state.clone();
        let cancel_surface = surface.clone();
        let oncancel = Closure::<dyn FnMut(PointerEvent)>::new(move |_| {
            dispatch(&cancel_state, &cancel_surface, Action::Depress, debug);
        });
        canvas
            .add_event_listener_with_callback("pointercancel", oncancel.as_ref().unchecked_ref())?;
        oncancel.forget();
    }

    {
        let palette_state = state.clone();
        let palette_surface = surface.clone();
        let palette_el_cb = palette_el.clone();
        let palette_document = document.clone();
        let selected_cb = selected.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some((index, value)) = color_from_event(&event) else {
                return;
            };
            selected_cb.set(index);
            dispatch(
                &palette_state,
                &palette_surface,
                Action::ChangeColor(value.to_string()),
                debug,
            );
            render_palette(&palette_document, &palette_el_cb, index);
        });
        palette_el.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let resize_surface = surface.clone();
        let resize_window = window.clone();
        let debouncer = Debouncer::new(window.clone(), RESIZE_DEBOUNCE_MS);
        let onresize = Closure::<dyn FnMut()>::new(move || {
            let resize_surface = resize_surface.clone();
            let resize_window = resize_window.clone();
            let result = debouncer.schedule(move || {
                let Ok((width, height)) = viewport_size(&resize_window) else {
                    return;
                };
                if debug {
                    web_sys::console::log_1(&format!("Resizing surface to {width}x{height}").into());
                }
                if let Err(error) = resize_surface.borrow_mut().resize(width, height) {
                    web_sys::console::error_1(&format!("Resize failed: {error}").into());
                }
            });
            if let Err(error) = result {
                web_sys::console::error_1(&error);
            }
        });
        window.add_event_listener_with_callback("resize", onresize.as_ref().unchecked_ref())?;
        onresize.forget();
    }

    Ok(())
}
