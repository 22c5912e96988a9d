use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use crate::geometry::Point;
use crate::state::Paint;

#[derive(Debug, Error)]
pub enum SurfaceError {
    /// A paint was requested before the canvas produced a usable 2d
    /// context. Legitimate for a brief window between mount and the
    /// first layout pass; callers skip the paint instead of failing.
    #[error("drawing context not yet available")]
    InvalidContext,
    #[error("backing store operation failed: {0}")]
    Backing(String),
}

impl From<SurfaceError> for JsValue {
    fn from(error: SurfaceError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

fn js_error(value: JsValue) -> SurfaceError {
    SurfaceError::Backing(format!("{value:?}"))
}

/// Owns the backing pixel store and its live painting context. Painting
/// callers borrow it per event; nothing else resizes or holds the canvas.
pub struct Surface {
    canvas: HtmlCanvasElement,
    ctx: Option<CanvasRenderingContext2d>,
    applied_pen_width: Option<f64>,
}

impl Surface {
    pub fn attach(canvas: HtmlCanvasElement) -> Self {
        let mut surface = Self {
            canvas,
            ctx: None,
            applied_pen_width: None,
        };
        // Best effort; a missing context surfaces later as InvalidContext.
        let _ = surface.ensure_context();
        surface
    }

    fn acquire_context(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
        let ctx = canvas.get_context("2d").ok().flatten()?;
        let ctx = ctx.dyn_into::<CanvasRenderingContext2d>().ok()?;
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        Some(ctx)
    }

    fn ensure_context(&mut self) -> Result<&CanvasRenderingContext2d, SurfaceError> {
        if self.ctx.is_none() {
            self.ctx = Self::acquire_context(&self.canvas);
        }
        self.ctx.as_ref().ok_or(SurfaceError::InvalidContext)
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    pub fn applied_pen_width(&self) -> Option<f64> {
        self.applied_pen_width
    }

    /// Sets the context stroke width. Idempotent: re-applying the width
    /// already in effect never touches the context.
    pub fn configure(&mut self, pen_width: f64) -> Result<(), SurfaceError> {
        if self.applied_pen_width == Some(pen_width) {
            return Ok(());
        }
        let ctx = self.ensure_context()?;
        ctx.set_line_width(pen_width);
        self.applied_pen_width = Some(pen_width);
        Ok(())
    }

    /// Starts a new path, moving the path cursor to `at` when a last
    /// known position exists so the first segment does not originate at
    /// the path default of (0,0).
    pub fn begin_path(&mut self, at: Option<Point>) -> Result<(), SurfaceError> {
        let ctx = self.ensure_context()?;
        ctx.begin_path();
        if let Some(point) = at {
            ctx.move_to(point.x, point.y);
        }
        Ok(())
    }

    /// Paints one segment as a self-contained path so that a mid-stroke
    /// color change never restrokes earlier segments in the new color.
    pub fn paint_segment(&mut self, from: Point, to: Point, color: &str) -> Result<(), SurfaceError> {
        let ctx = self.ensure_context()?;
        ctx.set_stroke_style_str(color);
        ctx.begin_path();
        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
        ctx.stroke();
        Ok(())
    }

    pub fn apply(&mut self, paint: Paint) -> Result<(), SurfaceError> {
        match paint {
            Paint::BeginPath { at } => self.begin_path(at),
            Paint::Segment { from, to, color } => self.paint_segment(from, to, &color),
        }
    }

    /// Resizes the backing store while keeping painted content intact.
    ///
    /// The pixel buffer must be captured before the store is resized: a
    /// backing-store resize clears the canvas. The capture is written
    /// back at (0,0); content outside a shrunken store is lost, which is
    /// accepted lossy behavior. Unchanged dimensions are a no-op so that
    /// spurious resize events never double-write the buffer.
    pub fn resize(&mut self, new_width: u32, new_height: u32) -> Result<(), SurfaceError> {
        let old_width = self.canvas.width();
        let old_height = self.canvas.height();
        if (old_width, old_height) == (new_width, new_height) {
            return Ok(());
        }

        let snapshot = self.capture(old_width, old_height);

        self.canvas.set_width(new_width);
        self.canvas.set_height(new_height);

        // A backing-store resize resets every context attribute.
        if let Some(ctx) = self.ctx.as_ref() {
            ctx.set_line_cap("round");
            ctx.set_line_join("round");
        }
        if let Some(pen_width) = self.applied_pen_width.take() {
            self.configure(pen_width)?;
        }

        if let Some(snapshot) = snapshot {
            let ctx = self.ensure_context()?;
            ctx.put_image_data(&snapshot, 0.0, 0.0).map_err(js_error)?;
        }
        Ok(())
    }

    fn capture(&mut self, width: u32, height: u32) -> Option<ImageData> {
        if width == 0 || height == 0 {
            return None;
        }
        let ctx = self.ensure_context().ok()?;
        ctx.get_image_data(0.0, 0.0, f64::from(width), f64::from(height))
            .ok()
    }
}
