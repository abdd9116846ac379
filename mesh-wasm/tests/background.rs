//! Browser checks for the canvas driver and widget wiring.

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use mesh_wasm::MeshBackground;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window()
        .expect("no global window")
        .document()
        .expect("no document")
}

fn install_canvas(id: &str) {
    let document = document();
    if document.get_element_by_id(id).is_some() {
        return;
    }
    let canvas = document.create_element("canvas").unwrap();
    canvas.set_id(id);
    document.body().unwrap().append_child(&canvas).unwrap();
}

#[wasm_bindgen_test]
fn background_runs_frames() {
    install_canvas("mesh-canvas");
    let mut background = MeshBackground::new("mesh-canvas", None).unwrap();
    assert!(background.point_count() > 0);
    background.frame(16.7).unwrap();
    background.frame(33.4).unwrap();
}

#[wasm_bindgen_test]
fn background_survives_pointer_events() {
    install_canvas("mesh-canvas");
    let mut background = MeshBackground::new("mesh-canvas", None).unwrap();

    let event = web_sys::MouseEvent::new("mousemove").unwrap();
    background.handle_mouse_move(event);
    background.frame(16.7).unwrap();

    background.handle_mouse_leave();
    background.frame(33.4).unwrap();
}

#[wasm_bindgen_test]
fn background_rebuilds_on_resize() {
    install_canvas("mesh-canvas");
    let mut background = MeshBackground::new("mesh-canvas", None).unwrap();
    background.resize().unwrap();
    assert!(background.point_count() > 0);
}

#[wasm_bindgen_test]
fn missing_canvas_is_an_error() {
    assert!(MeshBackground::new("definitely-not-present", None).is_err());
}

#[wasm_bindgen_test]
fn settings_json_changes_density() {
    install_canvas("mesh-canvas");
    let dense = MeshBackground::new("mesh-canvas", Some(r#"{"spacing": 20.0}"#.into())).unwrap();
    let sparse = MeshBackground::new("mesh-canvas", Some(r#"{"spacing": 80.0}"#.into())).unwrap();
    assert!(dense.point_count() > sparse.point_count());
}

#[wasm_bindgen_test]
fn nav_toggle_flips_menu() {
    let document = document();
    let body = document.body().unwrap();

    if document.get_element_by_id("nav-toggle").is_none() {
        let toggle = document.create_element("button").unwrap();
        toggle.set_id("nav-toggle");
        body.append_child(&toggle).unwrap();
        let menu = document.create_element("ul").unwrap();
        menu.set_id("nav-menu");
        body.append_child(&menu).unwrap();
    }

    mesh_wasm::init_widgets();

    let toggle: web_sys::HtmlElement = document
        .get_element_by_id("nav-toggle")
        .unwrap()
        .dyn_into()
        .unwrap();
    let menu = document.get_element_by_id("nav-menu").unwrap();

    toggle.click();
    assert!(menu.class_list().contains("open"));
    assert_eq!(toggle.get_attribute("aria-expanded").as_deref(), Some("true"));

    toggle.click();
    assert!(!menu.class_list().contains("open"));
    assert_eq!(toggle.get_attribute("aria-expanded").as_deref(), Some("false"));
}
