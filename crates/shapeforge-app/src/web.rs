//! WebAssembly entry point and platform-specific code.

use std::sync::Arc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use winit::dpi::PhysicalSize;
use winit::window::Window;

const CANVAS_ID: &str = "shapeforge-canvas";

/// Browser viewport size in physical pixels, falling back to the given size.
fn viewport_size(fallback_width: u32, fallback_height: u32) -> Option<(u32, u32, f64)> {
    let web_window = web_sys::window()?;
    let dpr = web_window.device_pixel_ratio();
    let width = web_window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(fallback_width as f64);
    let height = web_window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(fallback_height as f64);
    Some(((width * dpr) as u32, (height * dpr) as u32, dpr))
}

/// Find or create the full-viewport canvas the app renders into.
pub fn create_canvas(fallback_width: u32, fallback_height: u32) -> Option<web_sys::HtmlCanvasElement> {
    let document = web_sys::window()?.document()?;

    if let Some(loading) = document.get_element_by_id("loading") {
        loading.remove();
    }

    let canvas = match document.get_element_by_id(CANVAS_ID) {
        Some(existing) => existing.dyn_into::<web_sys::HtmlCanvasElement>().ok()?,
        None => {
            let parent = document.get_element_by_id("app").or_else(|| document.body().map(Into::into))?;
            let canvas = document.create_element("canvas").ok()?;
            canvas.set_id(CANVAS_ID);
            parent.append_child(&canvas).ok()?;
            canvas.dyn_into::<web_sys::HtmlCanvasElement>().ok()?
        }
    };

    let (width, height, dpr) = viewport_size(fallback_width, fallback_height)?;
    canvas.set_width(width);
    canvas.set_height(height);
    let style = canvas.style();
    for (property, value) in [
        ("width", "100%"),
        ("height", "100%"),
        ("display", "block"),
        ("position", "fixed"),
        ("top", "0"),
        ("left", "0"),
    ] {
        if let Err(e) = style.set_property(property, value) {
            log::debug!("Failed to set canvas style {}: {:?}", property, e);
        }
    }

    log::info!("Canvas created: {}x{} (dpr: {})", width, height, dpr);
    Some(canvas)
}

/// Keeps the window sized to the browser viewport. Dropping it removes the
/// `resize` listener.
pub struct ResizeListener {
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl ResizeListener {
    pub fn attach(window: Arc<Window>) -> Option<Self> {
        let web_window = web_sys::window()?;
        let callback = Closure::wrap(Box::new(move |_: web_sys::Event| {
            if let Some((width, height, _)) = viewport_size(0, 0) {
                if width > 0 && height > 0 {
                    if window.request_inner_size(PhysicalSize::new(width, height)).is_some() {
                        log::debug!("Canvas resized immediately to {}x{}", width, height);
                    }
                }
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        if let Err(e) = web_window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref()) {
            log::error!("Failed to add resize listener: {:?}", e);
            return None;
        }
        Some(Self { callback })
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        if let Some(web_window) = web_sys::window() {
            if let Err(e) =
                web_window.remove_event_listener_with_callback("resize", self.callback.as_ref().unchecked_ref())
            {
                log::debug!("Failed to remove resize listener: {:?}", e);
            }
        }
    }
}

/// Initialize and run the WASM application.
#[wasm_bindgen(start)]
pub async fn run_wasm() {
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to initialize logger: {e}").into());
    }

    log::info!("Starting ShapeForge (WASM)");
    crate::App::run().await;
}
