//! Project search box: hides cards that do not match the query.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

const SEARCH_ID: &str = "project-search";
const CARD_SELECTOR: &str = ".project-card";
const HIDDEN_CLASS: &str = "hidden";

pub(crate) fn init(document: &Document) -> Result<(), JsValue> {
    let input: HtmlInputElement = match document
        .get_element_by_id(SEARCH_ID)
        .and_then(|el| el.dyn_into().ok())
    {
        Some(input) => input,
        None => return Ok(()),
    };

    let handler_document = document.clone();
    let handler_input = input.clone();
    let closure = Closure::wrap(Box::new(move || {
        if let Err(err) = apply_filter(&handler_document, &handler_input.value()) {
            console_log!("project filter failed: {:?}", err);
        }
    }) as Box<dyn FnMut()>);
    input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
    closure.forget();

    Ok(())
}

fn apply_filter(document: &Document, query: &str) -> Result<(), JsValue> {
    let cards = document.query_selector_all(CARD_SELECTOR)?;
    for i in 0..cards.length() {
        let card = match cards.item(i).and_then(|node| node.dyn_into::<Element>().ok()) {
            Some(card) => card,
            None => continue,
        };
        let text = card.text_content().unwrap_or_default();
        if matches_query(&text, query) {
            let _ = card.class_list().remove_1(HIDDEN_CLASS);
        } else {
            let _ = card.class_list().add_1(HIDDEN_CLASS);
        }
    }
    Ok(())
}

/// Case-insensitive substring match; a blank query shows everything.
fn matches_query(haystack: &str, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty() || haystack.to_lowercase().contains(&query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_query_matches_everything() {
        assert!(matches_query("Rust raytracer", ""));
        assert!(matches_query("Rust raytracer", "   "));
    }

    #[test]
    fn test_query_is_case_insensitive() {
        assert!(matches_query("Rust Raytracer", "rust"));
        assert!(matches_query("rust raytracer", "RAY"));
    }

    #[test]
    fn test_non_matching_query() {
        assert!(!matches_query("Rust raytracer", "python"));
    }
}
