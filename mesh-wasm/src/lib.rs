use std::cell::RefCell;
use std::rc::Rc;

use mesh_core::{Mesh, MeshConfig, Rgba};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Element, HtmlCanvasElement, MediaQueryList, MouseEvent, Window,
};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub(crate) fn log(s: &str);
}

// Host builds (unit tests) have no console to write to.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn log(_s: &str) {}

macro_rules! console_log {
    ($($t:tt)*) => ($crate::log(&format_args!($($t)*).to_string()))
}

mod contact;
mod filter;
mod page;
mod rotator;

/// The animated point-mesh sitting behind the page content.
///
/// Owns the canvas and its 2D context; all simulation state lives in
/// the [`Mesh`] from `mesh-core`.
#[wasm_bindgen]
pub struct MeshBackground {
    mesh: Mesh,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    dark_query: Option<MediaQueryList>,
}

#[wasm_bindgen]
impl MeshBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, settings_json: Option<String>) -> Result<MeshBackground, JsValue> {
        let config = match settings_json {
            Some(json) => parse_settings(&json),
            None => MeshConfig::default(),
        };

        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let (width, height) = viewport_size(&window)?;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let dark_query = window
            .match_media("(prefers-color-scheme: dark)")
            .ok()
            .flatten();

        Ok(MeshBackground {
            mesh: Mesh::new(width, height, config),
            canvas,
            context,
            dark_query,
        })
    }

    /// Advance the simulation one step and redraw. `timestamp_ms` is
    /// the value handed to a requestAnimationFrame callback.
    pub fn frame(&mut self, timestamp_ms: f64) -> Result<(), JsValue> {
        self.mesh.step((timestamp_ms / 1000.0) as f32);
        self.render()
    }

    pub fn handle_mouse_move(&mut self, event: MouseEvent) {
        let canvas_element: &Element = self.canvas.as_ref();
        let rect = canvas_element.get_bounding_client_rect();
        let x = event.client_x() as f64 - rect.left();
        let y = event.client_y() as f64 - rect.top();
        self.mesh.pointer_moved(x as f32, y as f32);
    }

    pub fn handle_mouse_leave(&mut self) {
        self.mesh.pointer_left();
    }

    /// Resize the canvas to the viewport and rebuild the lattice from
    /// scratch; prior positions and velocities are discarded.
    pub fn resize(&mut self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no global window")?;
        let (width, height) = viewport_size(&window)?;
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.mesh.resize(width, height);
        Ok(())
    }

    pub fn point_count(&self) -> usize {
        self.mesh.grid().len()
    }

    fn render(&self) -> Result<(), JsValue> {
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;
        let scene = self.mesh.scene(self.prefers_dark());

        self.context.clear_rect(0.0, 0.0, width, height);

        self.context
            .set_fill_style_str(&css_color(scene.theme.point));
        for disc in &scene.discs {
            self.context.begin_path();
            self.context.arc(
                disc.center.x as f64,
                disc.center.y as f64,
                disc.radius as f64,
                0.0,
                std::f64::consts::TAU,
            )?;
            self.context.fill();
        }

        // All connecting lines go into one path, stroked once.
        self.context
            .set_stroke_style_str(&css_color(scene.theme.line));
        self.context.set_line_width(1.0);
        self.context.begin_path();
        for segment in &scene.segments {
            self.context
                .move_to(segment.from.x as f64, segment.from.y as f64);
            self.context.line_to(segment.to.x as f64, segment.to.y as f64);
        }
        self.context.stroke();

        Ok(())
    }

    fn prefers_dark(&self) -> bool {
        self.dark_query.as_ref().map(|q| q.matches()).unwrap_or(false)
    }
}

/// Install the panic hook. Call once, before anything else.
#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Start the background animation on the given canvas.
///
/// The animation is cosmetic: a missing canvas or context leaves the
/// page untouched apart from one console line.
#[wasm_bindgen]
pub fn start_background(canvas_id: &str, settings_json: Option<String>) {
    if let Err(err) = run_background(canvas_id, settings_json) {
        console_log!("mesh background disabled: {:?}", err);
    }
}

/// Wire up the page widgets: nav toggle, footer year, role rotator,
/// project filter and contact form. Each widget skips silently when
/// its elements are absent from the page.
#[wasm_bindgen]
pub fn init_widgets() {
    if let Err(err) = run_widgets() {
        console_log!("widget setup failed: {:?}", err);
    }
}

fn run_widgets() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no global window")?;
    let document = window.document().ok_or("no document")?;
    page::init(&document)?;
    rotator::init(&window, &document)?;
    filter::init(&document)?;
    contact::init(&document)?;
    Ok(())
}

fn run_background(canvas_id: &str, settings_json: Option<String>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no global window")?;
    let document = window.document().ok_or("no document")?;
    let state = Rc::new(RefCell::new(MeshBackground::new(canvas_id, settings_json)?));

    {
        let state = state.clone();
        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            state.borrow_mut().handle_mouse_move(event);
        }) as Box<dyn FnMut(MouseEvent)>);
        window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let state = state.clone();
        let closure = Closure::wrap(Box::new(move || {
            state.borrow_mut().handle_mouse_leave();
        }) as Box<dyn FnMut()>);
        document
            .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let state = state.clone();
        let closure = Closure::wrap(Box::new(move || {
            if let Err(err) = state.borrow_mut().resize() {
                console_log!("mesh resize failed: {:?}", err);
            }
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Self-rescheduling frame loop; runs for the lifetime of the page.
    let raf = Rc::new(RefCell::new(None::<Closure<dyn FnMut(f64)>>));
    let raf_handle = raf.clone();
    let loop_window = window.clone();
    *raf.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        if let Err(err) = state.borrow_mut().frame(timestamp) {
            console_log!("mesh frame skipped: {:?}", err);
        }
        if let Some(callback) = raf_handle.borrow().as_ref() {
            let _ = loop_window.request_animation_frame(callback.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(callback) = raf.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }

    Ok(())
}

fn viewport_size(window: &Window) -> Result<(f32, f32), JsValue> {
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or("innerWidth is not a number")?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or("innerHeight is not a number")?;
    Ok((width as f32, height as f32))
}

fn parse_settings(json: &str) -> MeshConfig {
    match serde_json::from_str::<MeshConfig>(json) {
        Ok(config) if config.is_sane() => config,
        Ok(_) => {
            console_log!("mesh settings out of range, using defaults");
            MeshConfig::default()
        }
        Err(err) => {
            console_log!("bad mesh settings ({}), using defaults", err);
            MeshConfig::default()
        }
    }
}

fn css_color(color: Rgba) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        color.r, color.g, color.b, color.a
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_color_format() {
        let color = Rgba { r: 148, g: 163, b: 184, a: 0.55 };
        assert_eq!(css_color(color), "rgba(148, 163, 184, 0.55)");
    }

    #[test]
    fn test_parse_settings_rejects_garbage() {
        let config = parse_settings("not json at all");
        assert_eq!(config.spacing, MeshConfig::default().spacing);
    }

    #[test]
    fn test_parse_settings_rejects_unstable_damping() {
        let config = parse_settings(r#"{"damping": 1.5}"#);
        assert_eq!(config.damping, MeshConfig::default().damping);
    }

    #[test]
    fn test_parse_settings_accepts_overrides() {
        let config = parse_settings(r#"{"spacing": 64.0}"#);
        assert_eq!(config.spacing, 64.0);
    }
}
