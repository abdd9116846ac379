//! Rotating role-title headline.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

const ROLE_ID: &str = "role-title";
const SWAP_INTERVAL_MS: i32 = 2800;
const FADE_CLASS: &str = "rotator-fade";

/// Cycle the headline through the titles listed in its `data-titles`
/// attribute (pipe separated). Zero or one title means there is
/// nothing to rotate.
pub(crate) fn init(window: &Window, document: &Document) -> Result<(), JsValue> {
    let element: HtmlElement = match document
        .get_element_by_id(ROLE_ID)
        .and_then(|el| el.dyn_into().ok())
    {
        Some(element) => element,
        None => return Ok(()),
    };

    let titles = element
        .get_attribute("data-titles")
        .map(|raw| split_titles(&raw))
        .unwrap_or_default();
    if titles.len() < 2 {
        return Ok(());
    }

    let mut index = 0_usize;
    let closure = Closure::wrap(Box::new(move || {
        index = (index + 1) % titles.len();
        element.set_text_content(Some(&titles[index]));
        // Drop and re-add the class with a reflow in between so the
        // CSS fade animation restarts on every swap.
        let _ = element.class_list().remove_1(FADE_CLASS);
        let _ = element.offset_width();
        let _ = element.class_list().add_1(FADE_CLASS);
    }) as Box<dyn FnMut()>);
    window.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        SWAP_INTERVAL_MS,
    )?;
    closure.forget();

    Ok(())
}

fn split_titles(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_titles() {
        assert_eq!(
            split_titles("Engineer | Designer|Writer"),
            vec!["Engineer", "Designer", "Writer"]
        );
    }

    #[test]
    fn test_split_titles_ignores_blanks() {
        assert_eq!(split_titles(" | Engineer || "), vec!["Engineer"]);
        assert!(split_titles("").is_empty());
    }
}
