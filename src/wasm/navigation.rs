//! DOM and WebGL wiring for the animated navigation menu.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    window, CanvasRenderingContext2d, Document, Element, Event, HtmlAnchorElement,
    HtmlCanvasElement, PointerEvent,
};

use super::host::{self, FrameLoop, Timeout};
use super::render::Renderer;
use crate::animator::{DragTimer, NavAnimator, PointerKind};
use crate::config::NavConfig;
use crate::layout::NavItem;
use crate::pointer::Point;

struct Navigation {
    animator: NavAnimator,
    renderer: Renderer,
    anchors: Vec<HtmlAnchorElement>,
    drag_timer: Option<Timeout>,
}

/// Shared handle captured by every listener.
#[derive(Clone)]
struct NavHandle {
    state: Rc<RefCell<Navigation>>,
    pointer_loop: FrameLoop,
}

/// Builds the menu inside `nav` and starts its render loop.
pub fn mount(nav: &Element, config: NavConfig) -> Result<(), JsValue> {
    let window = window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let viewport = host::viewport()?;

    let mut anchors = Vec::new();
    let mut items = Vec::new();
    let mut text_canvases = Vec::new();
    let links = nav.query_selector_all("a")?;
    for i in 0..links.length() {
        let Some(anchor) = links.get(i).and_then(|n| n.dyn_into::<HtmlAnchorElement>().ok()) else {
            continue;
        };
        let title = anchor.inner_text();
        let canvas = text_canvas(&document, &title, &config)?;
        items.push(NavItem::new(
            title,
            anchor.href(),
            f64::from(canvas.width()),
            f64::from(canvas.height()),
        ));
        text_canvases.push(canvas);
        anchors.push(anchor);
    }

    let renderer = Renderer::new(&document, viewport, config.resolution, &text_canvases)?;
    let canvas = renderer.canvas().clone();
    canvas.set_attribute("aria-hidden", "true")?;
    canvas.set_attribute("tabindex", "-1")?;
    canvas.set_class_name("main-nav__canvas");
    nav.append_child(&canvas)?;

    let state = Rc::new(RefCell::new(Navigation {
        animator: NavAnimator::new(config, items, viewport),
        renderer,
        anchors,
        drag_timer: None,
    }));
    let pointer_loop = {
        let state = state.clone();
        FrameLoop::new(move || state.borrow_mut().animator.step())
    };
    let handle = NavHandle {
        state,
        pointer_loop,
    };

    handle.bind_window(&window)?;
    handle.bind_anchors()?;

    let render_loop = {
        let state = handle.state.clone();
        FrameLoop::new(move || {
            let mut guard = state.borrow_mut();
            let nav = &mut *guard;
            nav.renderer.render(nav.animator.scene());
            true
        })
    };
    render_loop.request()?;

    info!(items = handle.state.borrow().anchors.len(), "navigation mounted");
    Ok(())
}

/// Tunables from the nav element's `data-config` JSON, defaults otherwise.
pub fn read_config(nav: &Element) -> NavConfig {
    let Some(json) = nav.get_attribute("data-config") else {
        return NavConfig::default();
    };
    NavConfig::from_json(&json).unwrap_or_else(|err| {
        warn!(%err, "ignoring data-config");
        NavConfig::default()
    })
}

/// Rasterises one title onto its own canvas, sized to the text plus padding.
fn text_canvas(
    document: &Document,
    title: &str,
    config: &NavConfig,
) -> Result<HtmlCanvasElement, JsValue> {
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or("2d context unavailable")?
        .dyn_into()?;

    let font = config.css_font();
    ctx.set_font(&font);
    let width = ctx.measure_text(title)?.width() + config.item_padding;
    canvas.set_width(width.ceil() as u32);
    canvas.set_height(config.item_height().ceil() as u32);

    // Resizing the canvas resets the context.
    ctx.set_font(&font);
    ctx.set_text_align("center");
    ctx.set_text_baseline("bottom");
    ctx.set_fill_style_str(&config.text_colour);
    ctx.fill_text(
        title,
        f64::from(canvas.width()) * 0.5,
        f64::from(canvas.height()) - config.font_size * 0.2,
    )?;
    Ok(canvas)
}

fn page_pos(e: &PointerEvent) -> Point {
    [f64::from(e.page_x()), f64::from(e.page_y())]
}

impl NavHandle {
    fn bind_window(&self, window: &web_sys::Window) -> Result<(), JsValue> {
        let h = self.clone();
        host::listen(window, "pointermove", move |e: Event| {
            let Some(e) = e.dyn_ref::<PointerEvent>() else { return };
            let pos = page_pos(e);
            let mut nav = h.state.borrow_mut();
            nav.animator.pointer_move(pos, PointerKind::from_dom(&e.pointer_type()));
            let over_stage = h.on_stage(&nav, e);
            nav.animator.hover_at(over_stage.then_some(pos));
        })?;

        let h = self.clone();
        host::listen(window, "pointerdown", move |_: Event| {
            let timer = h.state.borrow_mut().animator.pointer_down();
            h.schedule_drag_timer(timer);
        })?;

        let h = self.clone();
        host::listen(window, "pointerup", move |e: Event| {
            let Some(e) = e.dyn_ref::<PointerEvent>() else { return };
            let (up, anchor) = {
                let mut nav = h.state.borrow_mut();
                let on_stage = h.on_stage(&nav, e);
                let up = nav.animator.pointer_up(page_pos(e), on_stage);
                let anchor = up.activate.and_then(|i| nav.anchors.get(i).cloned());
                (up, anchor)
            };
            h.schedule_drag_timer(up.timer);
            if let Some(anchor) = anchor {
                debug!(href = %anchor.href(), "activating nav link");
                anchor.click();
            }
        })?;

        let h = self.clone();
        host::listen(window, "resize", move |_: Event| {
            let viewport = match host::viewport() {
                Ok(v) => v,
                Err(err) => {
                    warn!(?err, "keeping previous viewport");
                    return;
                }
            };
            let mut nav = h.state.borrow_mut();
            nav.animator.resize(viewport);
            if let Err(err) = nav.renderer.resize(viewport) {
                warn!(?err, "renderer resize failed");
            }
        })?;

        let h = self.clone();
        host::listen(window, "navOpen", move |_: Event| {
            let arm = h.state.borrow_mut().animator.open();
            if arm {
                h.request_frame();
            }
        })?;

        let h = self.clone();
        host::listen(window, "navClose", move |_: Event| {
            h.state.borrow_mut().animator.close();
        })?;
        Ok(())
    }

    fn bind_anchors(&self) -> Result<(), JsValue> {
        let anchors = self.state.borrow().anchors.clone();
        for (i, anchor) in anchors.iter().enumerate() {
            let h = self.clone();
            host::listen(anchor, "focus", move |_: Event| {
                if let Err(err) = h.state.borrow_mut().animator.focus_item(i) {
                    debug!(%err, "focus ignored");
                }
            })?;

            let h = self.clone();
            host::listen(anchor, "blur", move |_: Event| {
                if let Err(err) = h.state.borrow_mut().animator.blur_item(i) {
                    debug!(%err, "blur ignored");
                }
            })?;
        }
        Ok(())
    }

    fn on_stage(&self, nav: &Navigation, e: &PointerEvent) -> bool {
        e.target()
            .map(|t| js_sys::Object::is(&t, nav.renderer.canvas()))
            .unwrap_or(false)
    }

    fn request_frame(&self) {
        if let Err(err) = self.pointer_loop.request() {
            warn!(?err, "could not start pointer animation");
        }
    }

    /// Replaces any pending drag timer; the old one is cleared on drop.
    fn schedule_drag_timer(&self, timer: DragTimer) {
        let h = self.clone();
        let scheduled = Timeout::schedule(timer.delay_ms, move || {
            let arm = h.state.borrow_mut().animator.drag_timer_fired(timer.token);
            if arm {
                h.request_frame();
            }
        });
        match scheduled {
            Ok(t) => self.state.borrow_mut().drag_timer = Some(t),
            Err(err) => warn!(?err, ?timer, "could not schedule drag timer"),
        }
    }
}
