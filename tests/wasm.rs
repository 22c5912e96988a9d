use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

use inkpad::debounce::Debouncer;
use inkpad::geometry::Point;
use inkpad::palette::{render_palette, PALETTE};
use inkpad::surface::{Surface, SurfaceError};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn make_canvas() -> HtmlCanvasElement {
    document()
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap()
}

fn context_of(canvas: &HtmlCanvasElement) -> CanvasRenderingContext2d {
    canvas
        .get_context("2d")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap()
}

fn pixel(ctx: &CanvasRenderingContext2d, x: u32, y: u32) -> [u8; 4] {
    let image = ctx
        .get_image_data(f64::from(x), f64::from(y), 1.0, 1.0)
        .unwrap();
    let data = image.data();
    [data[0], data[1], data[2], data[3]]
}

async fn sleep(ms: i32) {
    let window = web_sys::window().unwrap();
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

#[wasm_bindgen_test]
fn segments_paint_in_the_requested_color() {
    let canvas = make_canvas();
    let mut surface = Surface::attach(canvas.clone());
    surface.resize(80, 60).unwrap();
    surface.configure(6.0).unwrap();

    surface
        .paint_segment(Point::new(10.0, 10.0), Point::new(40.0, 10.0), "#ff0000")
        .unwrap();
    surface
        .paint_segment(Point::new(40.0, 30.0), Point::new(60.0, 30.0), "#0000ff")
        .unwrap();

    let ctx = context_of(&canvas);
    let red = pixel(&ctx, 20, 10);
    assert_eq!(red[3], 255);
    assert_eq!(red[0], 255);
    assert_eq!(red[2], 0);

    // The later blue segment must not restroke the red one.
    let still_red = pixel(&ctx, 20, 10);
    assert_eq!(still_red[0], 255);
    let blue = pixel(&ctx, 50, 30);
    assert_eq!(blue[2], 255);
    assert_eq!(blue[0], 0);
}

#[wasm_bindgen_test]
fn growing_resize_preserves_painted_content() {
    let canvas = make_canvas();
    let mut surface = Surface::attach(canvas.clone());
    surface.resize(80, 60).unwrap();
    surface.configure(6.0).unwrap();
    surface
        .paint_segment(Point::new(10.0, 10.0), Point::new(40.0, 10.0), "#ff0000")
        .unwrap();

    surface.resize(160, 120).unwrap();
    assert_eq!((surface.width(), surface.height()), (160, 120));

    let ctx = context_of(&canvas);
    let kept = pixel(&ctx, 20, 10);
    assert_eq!(kept[3], 255);
    assert_eq!(kept[0], 255);
    // Newly allocated region starts blank.
    let fresh = pixel(&ctx, 120, 90);
    assert_eq!(fresh[3], 0);
}

#[wasm_bindgen_test]
fn unchanged_dimensions_are_a_no_op() {
    let canvas = make_canvas();
    let mut surface = Surface::attach(canvas.clone());
    surface.resize(80, 60).unwrap();
    surface.configure(6.0).unwrap();
    surface
        .paint_segment(Point::new(10.0, 10.0), Point::new(40.0, 10.0), "#ff0000")
        .unwrap();

    // A same-size resize must not run the capture/restore cycle; the
    // cheapest observable proof is that content survives untouched.
    surface.resize(80, 60).unwrap();
    let kept = pixel(&context_of(&canvas), 20, 10);
    assert_eq!(kept[0], 255);
}

#[wasm_bindgen_test]
fn configure_skips_the_context_when_width_is_unchanged() {
    let canvas = make_canvas();
    let mut surface = Surface::attach(canvas.clone());
    surface.configure(5.0).unwrap();
    assert_eq!(surface.applied_pen_width(), Some(5.0));

    // Perturb the context behind the surface's back; an idempotent
    // re-configure must not touch it.
    let ctx = context_of(&canvas);
    ctx.set_line_width(1.0);
    surface.configure(5.0).unwrap();
    assert_eq!(ctx.line_width(), 1.0);

    surface.configure(7.0).unwrap();
    assert_eq!(ctx.line_width(), 7.0);
}

#[wasm_bindgen_test]
fn painting_without_a_context_reports_invalid_context() {
    let canvas = make_canvas();
    // Claim the canvas for a non-2d context so a 2d one can never be
    // produced. Skip silently where the test browser lacks webgl.
    let claimed = canvas.get_context("webgl").ok().flatten().is_some();
    let mut surface = Surface::attach(canvas);
    let result = surface.paint_segment(Point::new(0.0, 0.0), Point::new(1.0, 1.0), "#ff0000");
    if claimed {
        assert!(matches!(result, Err(SurfaceError::InvalidContext)));
    } else {
        assert!(result.is_ok());
    }
}

#[wasm_bindgen_test]
async fn debounce_collapses_a_burst_into_the_trailing_call() {
    let window = web_sys::window().unwrap();
    let debouncer = Debouncer::new(window, 50);
    let fired = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));

    for value in [1, 2, 3] {
        let fired = fired.clone();
        debouncer.schedule(move || fired.borrow_mut().push(value)).unwrap();
    }
    assert!(debouncer.is_pending());

    sleep(150).await;
    assert_eq!(*fired.borrow(), vec![3]);
    assert!(!debouncer.is_pending());
}

#[wasm_bindgen_test]
async fn cancel_means_never_invoked() {
    let window = web_sys::window().unwrap();
    let debouncer = Debouncer::new(window, 50);
    let fired = std::rc::Rc::new(std::cell::Cell::new(false));

    let fired_cb = fired.clone();
    debouncer.schedule(move || fired_cb.set(true)).unwrap();
    debouncer.cancel();

    sleep(150).await;
    assert!(!fired.get());
}

#[wasm_bindgen_test]
fn palette_renders_one_swatch_per_color() {
    let document = document();
    let palette_el: HtmlElement = document
        .create_element("div")
        .unwrap()
        .dyn_into()
        .unwrap();

    render_palette(&document, &palette_el, 2);
    assert_eq!(palette_el.child_element_count() as usize, PALETTE.len());

    let active = palette_el.query_selector(".swatch.active").unwrap().unwrap();
    assert_eq!(active.get_attribute("data-index").as_deref(), Some("2"));

    // Re-rendering with a new selection replaces, not appends.
    render_palette(&document, &palette_el, 0);
    assert_eq!(palette_el.child_element_count() as usize, PALETTE.len());
    let active = palette_el.query_selector(".swatch.active").unwrap().unwrap();
    assert_eq!(active.get_attribute("data-index").as_deref(), Some("0"));
}
