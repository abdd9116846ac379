//! Contact form: client-side validation, then hand-off to the page's
//! email-relay client.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Event, HtmlButtonElement, HtmlInputElement, HtmlTextAreaElement};

const FORM_ID: &str = "contact-form";
const NAME_ID: &str = "contact-name";
const EMAIL_ID: &str = "contact-email";
const MESSAGE_ID: &str = "contact-message";
const STATUS_ID: &str = "form-status";
const SUBMIT_ID: &str = "contact-submit";

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    /// Email-relay client provided by the page script. Resolves when
    /// the relay has accepted the message.
    #[wasm_bindgen(js_name = sendContactEmail, catch)]
    fn send_contact_email(name: &str, email: &str, message: &str)
        -> Result<js_sys::Promise, JsValue>;
}

#[cfg(not(target_arch = "wasm32"))]
fn send_contact_email(
    _name: &str,
    _email: &str,
    _message: &str,
) -> Result<js_sys::Promise, JsValue> {
    Err(JsValue::from_str("no relay on this target"))
}

pub(crate) fn init(document: &Document) -> Result<(), JsValue> {
    let form = match document.get_element_by_id(FORM_ID) {
        Some(form) => form,
        None => return Ok(()),
    };

    let handler_document = document.clone();
    let closure = Closure::wrap(Box::new(move |event: Event| {
        event.prevent_default();
        submit(&handler_document);
    }) as Box<dyn FnMut(Event)>);
    form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
    closure.forget();

    Ok(())
}

fn submit(document: &Document) {
    let name = input_value(document, NAME_ID);
    let email = input_value(document, EMAIL_ID);
    let message = textarea_value(document, MESSAGE_ID);

    if let Err(reason) = validate(&name, &email, &message) {
        set_status(document, reason);
        return;
    }

    set_status(document, "Sending…");
    set_submit_disabled(document, true);

    let promise = match send_contact_email(&name, &email, &message) {
        Ok(promise) => promise,
        Err(_) => {
            set_status(document, "Could not reach the email service.");
            set_submit_disabled(document, false);
            return;
        }
    };

    let document = document.clone();
    wasm_bindgen_futures::spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => set_status(&document, "Message sent, thank you!"),
            Err(_) => set_status(&document, "Sending failed, please try again later."),
        }
        set_submit_disabled(&document, false);
    });
}

fn input_value(document: &Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|el| el.value())
        .unwrap_or_default()
}

fn textarea_value(document: &Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
        .map(|el| el.value())
        .unwrap_or_default()
}

fn set_status(document: &Document, text: &str) {
    if let Some(element) = document.get_element_by_id(STATUS_ID) {
        element.set_text_content(Some(text));
    }
}

fn set_submit_disabled(document: &Document, disabled: bool) {
    if let Some(button) = document
        .get_element_by_id(SUBMIT_ID)
        .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
    {
        button.set_disabled(disabled);
    }
}

/// Client-side gate before the relay call.
fn validate(name: &str, email: &str, message: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Please enter your name.");
    }
    if !is_plausible_email(email) {
        return Err("Please enter a valid email address.");
    }
    if message.trim().is_empty() {
        return Err("Please enter a message.");
    }
    Ok(())
}

/// Loose shape check only; the relay does the real validation.
fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    if email.contains(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_ordinary_addresses() {
        assert!(is_plausible_email("jane@example.com"));
        assert!(is_plausible_email("  jane.doe+tag@mail.example.org "));
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        assert!(!is_plausible_email(""));
        assert!(!is_plausible_email("jane"));
        assert!(!is_plausible_email("jane@"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("jane@example"));
        assert!(!is_plausible_email("jane@.com"));
        assert!(!is_plausible_email("jane@example.com."));
        assert!(!is_plausible_email("jane doe@example.com"));
    }

    #[test]
    fn test_validate_requires_all_fields() {
        assert!(validate("Jane", "jane@example.com", "Hello there").is_ok());
        assert!(validate("", "jane@example.com", "Hello").is_err());
        assert!(validate("Jane", "not-an-email", "Hello").is_err());
        assert!(validate("Jane", "jane@example.com", "   ").is_err());
    }
}
