use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// Trailing-edge debounce over the host timer: each `schedule` cancels
/// the pending timeout, so only the last callback of a burst runs, after
/// the quiescence window. A superseded callback is never invoked.
pub struct Debouncer {
    window: Window,
    delay_ms: i32,
    pending: Rc<Cell<Option<i32>>>,
}

impl Debouncer {
    pub fn new(window: Window, delay_ms: i32) -> Self {
        Self {
            window,
            delay_ms,
            pending: Rc::new(Cell::new(None)),
        }
    }

    pub fn schedule(&self, callback: impl FnOnce() + 'static) -> Result<(), JsValue> {
        self.cancel();
        let pending = self.pending.clone();
        let fired = Closure::once_into_js(move || {
            pending.set(None);
            callback();
        });
        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                fired.unchecked_ref(),
                self.delay_ms,
            )?;
        self.pending.set(Some(handle));
        Ok(())
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.pending.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    pub fn is_pending(&self) -> bool {
        let handle = self.pending.take();
        let pending = handle.is_some();
        self.pending.set(handle);
        pending
    }
}
