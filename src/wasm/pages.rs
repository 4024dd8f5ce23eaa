//! Page-specific DOM setup: the landing page emblem and the work list.

use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, HtmlElement};

use super::host;
use crate::circular;
use crate::work;

/// Splits `.circular` text into rotated letter spans. No-op off the landing page.
pub fn start_emblem(document: &Document) -> Result<(), JsValue> {
    let Some(el) = document.query_selector(".circular")? else {
        return Ok(());
    };
    let text = el.text_content().unwrap_or_default();
    el.set_inner_html("");
    for t in circular::letter_transforms(&text) {
        let span: HtmlElement = document.create_element("span")?.dyn_into()?;
        span.set_text_content(Some(&t.letter.to_string()));
        let css = t.css();
        span.style().set_property("-webkit-transform", &css)?;
        span.style().set_property("transform", &css)?;
        el.append_child(&span)?;
    }
    debug!(letters = text.chars().count(), "emblem laid out");
    Ok(())
}

/// Renders the project cards into `#work-main` and makes each header
/// collapse its body. No-op off the work page.
pub fn start_work(document: &Document) -> Result<(), JsValue> {
    let Some(main) = document.get_element_by_id("work-main") else {
        return Ok(());
    };
    main.set_inner_html(&work::render_cards(work::CARDS));

    let heads = document.get_elements_by_class_name("work-main-head");
    for i in 0..heads.length() {
        let Some(head) = heads.item(i) else { continue };
        let toggled = head.clone();
        host::listen(&head, "click", move |_: Event| {
            if let Err(err) = toggle_card(&toggled) {
                warn!(?err, "card toggle failed");
            }
        })?;
    }
    debug!(cards = heads.length(), "work list rendered");
    Ok(())
}

fn toggle_card(head: &web_sys::Element) -> Result<(), JsValue> {
    head.class_list().toggle("active")?;
    let Some(body) = head.next_element_sibling() else {
        return Ok(());
    };
    let body: HtmlElement = body.dyn_into()?;
    let style = body.style();
    let current = style.get_property_value("display")?;
    style.set_property("display", work::toggled_display(&current))?;
    Ok(())
}
