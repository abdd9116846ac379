//! Mobile navigation toggle and footer year.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

const NAV_TOGGLE_ID: &str = "nav-toggle";
const NAV_MENU_ID: &str = "nav-menu";
const YEAR_ID: &str = "year";

pub(crate) fn init(document: &Document) -> Result<(), JsValue> {
    init_nav(document)?;
    set_footer_year(document);
    Ok(())
}

/// The toggle button flips an `open` class on the menu and mirrors the
/// state in its own `aria-expanded` attribute.
fn init_nav(document: &Document) -> Result<(), JsValue> {
    let (toggle, menu) = match (
        document.get_element_by_id(NAV_TOGGLE_ID),
        document.get_element_by_id(NAV_MENU_ID),
    ) {
        (Some(toggle), Some(menu)) => (toggle, menu),
        _ => return Ok(()), // page has no nav, nothing to wire
    };

    let handler_toggle = toggle.clone();
    let closure = Closure::wrap(Box::new(move || {
        let open = match menu.class_list().toggle("open") {
            Ok(open) => open,
            Err(_) => return,
        };
        let _ = handler_toggle.set_attribute("aria-expanded", if open { "true" } else { "false" });
    }) as Box<dyn FnMut()>);
    toggle.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();

    Ok(())
}

fn set_footer_year(document: &Document) {
    if let Some(element) = document.get_element_by_id(YEAR_ID) {
        let year = js_sys::Date::new_0().get_full_year();
        element.set_text_content(Some(&year.to_string()));
    }
}
