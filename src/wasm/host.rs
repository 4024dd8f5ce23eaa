//! Browser scheduling: animation-frame loops, cancellable timeouts and
//! event listeners that live for the page lifetime.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Event, EventTarget};

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A `requestAnimationFrame` loop. After each frame the tick decides whether
/// to run again; `request` starts it (again).
#[derive(Clone)]
pub struct FrameLoop {
    slot: FrameSlot,
}

impl FrameLoop {
    pub fn new(mut tick: impl FnMut() -> bool + 'static) -> Self {
        // The closure holds a handle to its own slot so it can reschedule
        // itself; the cycle keeps it alive for the page lifetime.
        let slot: FrameSlot = Rc::new(RefCell::new(None));
        let again = slot.clone();
        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if tick() {
                if let Err(err) = request_frame(&again) {
                    warn!(?err, "could not schedule next frame");
                }
            }
        }) as Box<dyn FnMut()>));
        Self { slot }
    }

    pub fn request(&self) -> Result<(), JsValue> {
        request_frame(&self.slot)
    }
}

fn request_frame(slot: &FrameSlot) -> Result<(), JsValue> {
    let slot = slot.borrow();
    let callback = slot.as_ref().ok_or("frame loop has no callback")?;
    window()
        .ok_or("no window")?
        .request_animation_frame(callback.as_ref().unchecked_ref())?;
    Ok(())
}

/// A one-shot `setTimeout`. Dropping it clears the timeout, so replacing a
/// stored `Timeout` cancels the previous one.
pub struct Timeout {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn schedule(delay_ms: u32, f: impl FnOnce() + 'static) -> Result<Self, JsValue> {
        let delay = i32::try_from(delay_ms).map_err(|_| "timeout delay out of range")?;
        let callback = Closure::once(f);
        let handle = window()
            .ok_or("no window")?
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay,
            )?;
        Ok(Self {
            handle,
            _callback: callback,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(w) = window() {
            w.clear_timeout_with_handle(self.handle);
        }
    }
}

/// Adds a listener that is never removed.
pub fn listen(
    target: &EventTarget,
    name: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn viewport() -> Result<crate::pointer::Viewport, JsValue> {
    let w = window().ok_or("no window")?;
    let width = w.inner_width()?.as_f64().ok_or("innerWidth is not a number")?;
    let height = w.inner_height()?.as_f64().ok_or("innerHeight is not a number")?;
    Ok(crate::pointer::Viewport::new(width, height)?)
}
