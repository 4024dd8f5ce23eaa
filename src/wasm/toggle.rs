//! Menu toggle wiring: checkbox `change` and keyboard activation become
//! `navOpen` / `navClose` events on `window`.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{window, CustomEvent, Document, Element, Event, HtmlInputElement, KeyboardEvent};

use super::host;
use super::navigation;
use crate::toggle::{NavSignal, ToggleController};

pub const CONTROL_ID: &str = "main-nav-toggle";

pub fn find_control(document: &Document) -> Result<Option<HtmlInputElement>, JsValue> {
    match document.get_element_by_id(CONTROL_ID) {
        Some(el) => Ok(Some(el.dyn_into()?)),
        None => Ok(None),
    }
}

pub fn dispatch(signal: NavSignal) -> Result<(), JsValue> {
    let event = CustomEvent::new(signal.event_name())?;
    window().ok_or("no window")?.dispatch_event(&event)?;
    debug!(event = signal.event_name(), "dispatched");
    Ok(())
}

/// Wires the toggle. Returns the controller so callers can inspect it.
pub fn bind(control: &HtmlInputElement) -> Result<Rc<RefCell<ToggleController>>, JsValue> {
    let window = window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let toggle = Rc::new(RefCell::new(ToggleController::new(control.checked())));

    let t = toggle.clone();
    host::listen(&document, "keyup", move |e: Event| {
        let Some(e) = e.dyn_ref::<KeyboardEvent>() else { return };
        let on_toggle = e
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .map(|el| el.class_name().contains("nav-toggle"))
            .unwrap_or(false);
        let Some(signal) = t.borrow_mut().key_up(&e.key(), on_toggle) else { return };
        e.prevent_default();
        if let Some(control) = window_control() {
            control.set_checked(t.borrow().checked());
        }
        if let Err(err) = dispatch(signal) {
            warn!(?err, "toggle dispatch failed");
        }
    })?;

    let t = toggle.clone();
    host::listen(control, "change", move |e: Event| {
        let Some(control) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) else {
            return;
        };
        let signal = t.borrow_mut().changed(control.checked());
        if let Err(err) = dispatch(signal) {
            warn!(?err, "toggle dispatch failed");
        }
    })?;

    Ok(toggle)
}

fn window_control() -> Option<HtmlInputElement> {
    let document = window()?.document()?;
    find_control(&document).ok().flatten()
}

/// Binds the toggle, then builds the menu once its font is available and
/// re-announces the toggle state so the menu starts in sync.
pub fn start(control: HtmlInputElement, nav: Option<Element>) -> Result<(), JsValue> {
    let toggle = bind(&control)?;
    let Some(nav) = nav else {
        warn!("toggle present but no .main-nav element");
        return Ok(());
    };

    spawn_local(async move {
        let config = navigation::read_config(&nav);
        let font = config.css_font();
        if let Err(err) = load_font(&font).await {
            warn!(?err, %font, "font load failed, drawing with fallback");
        }
        if let Err(err) = navigation::mount(&nav, config) {
            warn!(?err, "navigation unavailable");
            return;
        }
        let signal = toggle.borrow().sync();
        if let Err(err) = dispatch(signal) {
            warn!(?err, "initial toggle dispatch failed");
        }
    });
    Ok(())
}

async fn load_font(font: &str) -> Result<(), JsValue> {
    let document = window().ok_or("no window")?.document().ok_or("no document")?;
    let promise = document.fonts().load(font)?;
    JsFuture::from(promise).await?;
    Ok(())
}
