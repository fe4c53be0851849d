//! Core application state and lifecycle.

use kurbo::{Point, Size, Vec2};
use peniko::Color;
use shapeforge_core::{Editor, LiveScene, PointerOutcome, SubscriptionId, EXPORT_FILE_NAME};
use shapeforge_render::{
    acquire_frame, create_gpu_renderer, render_to_view, GridStyle, RenderContext, Renderer, VelloRenderer,
};
use std::sync::Arc;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams};
use winit::application::ApplicationHandler;
#[cfg(not(target_arch = "wasm32"))]
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::ui::{render_ui, PanelProps, UiAction, UiState};

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
mod file_ops {
    /// Ask for a destination with the native save dialog and write the GLB there.
    /// Cancelling the dialog is not an error.
    pub fn deliver_glb(file_name: &str, bytes: &[u8]) -> Result<(), String> {
        let dialog = rfd::FileDialog::new()
            .set_title("Export GLB")
            .set_file_name(file_name)
            .add_filter("glTF Binary", &["glb"]);

        let Some(path) = dialog.save_file() else {
            log::info!("Export cancelled");
            return Ok(());
        };

        shapeforge_core::save_glb(&path, bytes).map_err(|e| e.to_string())?;
        log::info!("Saved {} bytes to: {:?}", bytes.len(), path);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
mod file_ops {
    use wasm_bindgen::JsCast;

    /// Offer the GLB to the browser as a download.
    pub fn deliver_glb(file_name: &str, bytes: &[u8]) -> Result<(), String> {
        download_binary_file(file_name, bytes, shapeforge_core::GLB_MIME_TYPE)
            .map_err(|e| format!("{e:?}"))
    }

    fn download_binary_file(filename: &str, data: &[u8], mime_type: &str) -> Result<(), wasm_bindgen::JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let uint8_array = js_sys::Uint8Array::from(data);
        let blob_parts = js_sys::Array::new();
        blob_parts.push(&uint8_array);

        let options = web_sys::BlobPropertyBag::new();
        options.set_type(mime_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&blob_parts, &options)?;

        let url = web_sys::Url::create_object_url_with_blob(&blob)?;

        let a = document
            .create_element("a")?
            .dyn_into::<web_sys::HtmlAnchorElement>()?;
        a.set_href(&url);
        a.set_download(filename);
        a.click();

        web_sys::Url::revoke_object_url(&url).ok();
        log::info!("Downloaded {} ({} bytes)", filename, data.len());
        Ok(())
    }
}

#[cfg(not(any(feature = "native", target_arch = "wasm32")))]
mod file_ops {
    pub fn deliver_glb(_file_name: &str, _bytes: &[u8]) -> Result<(), String> {
        Err("file export needs the `native` feature".to_string())
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub grid_style: GridStyle,
    pub background_color: Color,
    /// Suggested name for exported scenes.
    pub export_file_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "ShapeForge".to_string(),
            width: 1280,
            height: 800,
            grid_style: GridStyle::Lines,
            background_color: Color::from_rgba8(236, 239, 244, 255),
            export_file_name: EXPORT_FILE_NAME.to_string(),
        }
    }
}

/// Events delivered to the loop from outside winit.
pub enum AppEvent {
    /// The GPU surface finished its asynchronous creation.
    #[cfg(target_arch = "wasm32")]
    SurfaceReady(Box<GpuInit>),
    #[cfg(target_arch = "wasm32")]
    SurfaceFailed,
}

#[cfg(target_arch = "wasm32")]
pub struct GpuInit {
    render_cx: vello::util::RenderContext,
    surface: RenderSurface<'static>,
}

/// A camera drag in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CameraDrag {
    Orbit,
    Pan,
}

/// Pointer position and the camera gesture it drives, if any.
#[derive(Debug, Default)]
struct PointerTracker {
    position: Point,
    camera_drag: Option<CameraDrag>,
}

impl PointerTracker {
    /// Record a new position and return the movement since the last one.
    fn move_to(&mut self, position: Point) -> Vec2 {
        let delta = position - self.position;
        self.position = position;
        delta
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,
    #[cfg(target_arch = "wasm32")]
    _resize_listener: Option<crate::web::ResizeListener>,

    // Rendering
    vello_renderer: vello::Renderer,
    shape_renderer: VelloRenderer,
    /// Texture blitter for RGBA->surface format conversion (needed for WebGPU/WASM)
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,

    // Editor
    editor: Editor,
    pointer: PointerTracker,
    config: AppConfig,
}

impl AppState {
    fn apply_action(&mut self, action: UiAction) {
        match action {
            UiAction::AddShape(kind) => {
                if let Err(e) = self.editor.add_shape(kind) {
                    log::error!("Failed to add {}: {}", kind, e);
                    self.ui_state.notify(format!("Could not add {kind}: {e}"));
                }
            }
            UiAction::SetColor(color) => {
                self.editor.set_selected_color(color);
            }
            UiAction::SetGizmoMode(mode) => {
                self.editor.set_gizmo_mode(mode);
            }
            UiAction::RemoveSelected => {
                self.editor.remove_selected();
            }
            UiAction::SelectShape(id) => {
                self.editor.select_shape(Some(id));
            }
            UiAction::ExportGlb => self.export(),
            UiAction::CycleGrid => {
                self.ui_state.grid_style = self.ui_state.grid_style.next();
            }
            UiAction::ResetView => {
                self.editor.with_scene_mut(|scene| scene.camera.reset());
            }
            UiAction::DismissNotice => {
                self.ui_state.notice = None;
            }
        }
    }

    fn export(&mut self) {
        let bytes = match self.editor.export_glb() {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("Export failed: {}", e);
                self.ui_state.notify(format!("Export failed: {e}"));
                return;
            }
        };
        log::info!("Exported scene: {} bytes", bytes.len());

        if let Err(e) = file_ops::deliver_glb(&self.config.export_file_name, &bytes) {
            log::error!("Failed to save export: {}", e);
            self.ui_state.notify(format!("Could not save {}: {e}", self.config.export_file_name));
        }
    }

    fn handle_mouse_input(&mut self, button: MouseButton, pressed: bool) {
        let position = self.pointer.position;
        match (button, pressed) {
            (MouseButton::Left, true) => {
                // Empty space starts an orbit; hits select or grab a handle
                if let Some(PointerOutcome::Cleared) = self.editor.pointer_down(position) {
                    self.pointer.camera_drag = Some(CameraDrag::Orbit);
                }
            }
            (MouseButton::Left, false) => {
                self.editor.pointer_up();
                self.pointer.camera_drag = None;
            }
            (MouseButton::Right | MouseButton::Middle, true) => {
                self.pointer.camera_drag = Some(CameraDrag::Pan);
            }
            (MouseButton::Right | MouseButton::Middle, false) => {
                self.pointer.camera_drag = None;
            }
            _ => {}
        }
    }

    fn handle_cursor_moved(&mut self, position: Point) {
        let delta = self.pointer.move_to(position);
        if self.editor.is_dragging_gizmo() {
            self.editor.pointer_move(position);
            return;
        }
        match self.pointer.camera_drag {
            Some(CameraDrag::Orbit) => {
                self.editor.with_scene_mut(|scene| scene.camera.orbit(delta));
                self.window.request_redraw();
            }
            Some(CameraDrag::Pan) => {
                self.editor.with_scene_mut(|scene| scene.camera.pan(delta));
                self.window.request_redraw();
            }
            None => {}
        }
    }

    fn handle_wheel(&mut self, delta: MouseScrollDelta) {
        let scroll = match delta {
            MouseScrollDelta::LineDelta(_, y) => y as f64 * 20.0,
            MouseScrollDelta::PixelDelta(pos) => pos.y,
        };
        if scroll == 0.0 {
            return;
        }
        let factor = if scroll > 0.0 { 0.9 } else { 1.1 };
        self.editor.with_scene_mut(|scene| scene.camera.zoom(factor));
        self.window.request_redraw();
    }
}

/// Subscribe `request_redraw` to every registry change, so edits made by
/// the sidebar or by pointer picking show up in the next frame.
fn redraw_on_change(editor: &mut Editor, request_redraw: impl Fn() + 'static) -> SubscriptionId {
    editor.subscribe(move |_, _| request_redraw())
}

/// Main application.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
    #[cfg(target_arch = "wasm32")]
    proxy: Option<winit::event_loop::EventLoopProxy<AppEvent>>,
    #[cfg(target_arch = "wasm32")]
    pending_window: Option<Arc<Window>>,
}

impl App {
    /// Create a new application with default config.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom config.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
            #[cfg(target_arch = "wasm32")]
            proxy: None,
            #[cfg(target_arch = "wasm32")]
            pending_window: None,
        }
    }

    /// Run the application.
    pub async fn run() {
        let event_loop = match EventLoop::<AppEvent>::with_user_event().build() {
            Ok(event_loop) => event_loop,
            Err(e) => {
                log::error!("Failed to create event loop: {}", e);
                return;
            }
        };

        let mut app = App::new();

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::EventLoopExtWebSys;
            app.proxy = Some(event_loop.create_proxy());
            event_loop.spawn_app(app);
        }

        #[cfg(not(target_arch = "wasm32"))]
        if let Err(e) = event_loop.run_app(&mut app) {
            log::error!("Event loop error: {}", e);
        }
    }

    /// Finish initialization once the surface exists.
    fn finish_init(&mut self, window: Arc<Window>, surface: RenderSurface<'static>) {
        let Some(render_cx) = self.render_cx.as_ref() else {
            log::error!("Render context missing at init");
            return;
        };
        let device = &render_cx.devices[surface.dev_id].device;

        let vello_renderer = match create_gpu_renderer(device) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };

        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let width = surface.config.width as f64;
        let height = surface.config.height as f64;
        let mut editor = Editor::new();
        editor.mount(LiveScene::with_viewport(width, height));
        let redraw_window = window.clone();
        redraw_on_change(&mut editor, move || redraw_window.request_redraw());

        let ui_state = UiState {
            grid_style: self.config.grid_style,
            ..UiState::default()
        };

        #[cfg(target_arch = "wasm32")]
        let resize_listener = crate::web::ResizeListener::attach(window.clone());

        self.state = Some(AppState {
            window: window.clone(),
            surface,
            #[cfg(target_arch = "wasm32")]
            _resize_listener: resize_listener,
            vello_renderer,
            shape_renderer: VelloRenderer::new(),
            texture_blitter,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state,
            editor,
            pointer: PointerTracker::default(),
            config: self.config.clone(),
        });

        log::info!("Initialized {}x{}", width, height);
        window.request_redraw();
    }

    #[cfg(target_arch = "wasm32")]
    fn begin_async_init(&mut self, window: Arc<Window>, width: u32, height: u32) {
        let Some(proxy) = self.proxy.clone() else {
            log::error!("No event loop proxy for async init");
            return;
        };

        wasm_bindgen_futures::spawn_local(async move {
            log::info!("Creating surface asynchronously...");
            let mut render_cx = vello::util::RenderContext::new();
            let event = match render_cx
                .create_surface(window, width, height, PresentMode::AutoVsync)
                .await
            {
                Ok(surface) => AppEvent::SurfaceReady(Box::new(GpuInit { render_cx, surface })),
                Err(e) => {
                    log::error!("Failed to create surface: {:?}", e);
                    AppEvent::SurfaceFailed
                }
            };
            if proxy.send_event(event).is_err() {
                log::error!("Event loop closed before the surface was ready");
            }
        });
    }

    fn redraw(&mut self) {
        let Some(state) = &mut self.state else {
            return;
        };

        for notice in state.editor.take_notices() {
            log::warn!("{}", notice);
            state.ui_state.notify(notice);
        }

        let props = PanelProps::from_registry(
            state.editor.registry(),
            state.editor.gizmo_mode(),
            state.editor.is_mounted(),
        );

        // Run egui; actions are applied after the pass
        let egui_input = state.egui_state.take_egui_input(&state.window);
        let mut deferred_action: Option<UiAction> = None;
        let egui_output = state.egui_ctx.run(egui_input, |ctx| {
            deferred_action = render_ui(ctx, &mut state.ui_state, &props);
        });
        if let Some(action) = deferred_action {
            log::debug!("UI action: {:?}", action);
            state.apply_action(action);
            // View-only actions never reach the registry
            state.window.request_redraw();
        }

        let egui_animating = egui_output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .is_some_and(|viewport| viewport.repaint_delay.is_zero());
        if egui_animating {
            state.window.request_redraw();
        }

        state.egui_state.handle_platform_output(&state.window, egui_output.platform_output);
        let egui_primitives = state.egui_ctx.tessellate(egui_output.shapes, egui_output.pixels_per_point);

        let width = state.surface.config.width;
        let height = state.surface.config.height;

        // Build the vello scene
        if let Some(scene) = state.editor.scene() {
            let render_ctx = RenderContext::new(&scene, Size::new(width as f64, height as f64))
                .with_scale_factor(state.window.scale_factor())
                .with_background(state.config.background_color)
                .with_grid(state.ui_state.grid_style);
            state.shape_renderer.build_scene(&render_ctx);
        }
        let scene = state.shape_renderer.take_scene();

        let Some(render_cx) = self.render_cx.as_ref() else {
            return;
        };
        let device_handle = &render_cx.devices[state.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = match acquire_frame(&state.surface) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("{}", e);
                return;
            }
        };

        let params = RenderParams {
            base_color: state.config.background_color,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello needs a storage-bindable target; WebGPU only allows that for
        // Rgba8Unorm, so render there and blit to the (maybe BGRA) surface.
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view = render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        if let Err(e) = render_to_view(
            &mut state.vello_renderer,
            device,
            queue,
            &scene,
            &render_texture_view,
            &params,
        ) {
            log::error!("{}", e);
            return;
        }

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        {
            let mut blit_encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                label: Some("blit encoder"),
            });
            state
                .texture_blitter
                .copy(device, &mut blit_encoder, &render_texture_view, &surface_view);
            queue.submit(std::iter::once(blit_encoder.finish()));
        }

        for (id, image_delta) in &egui_output.textures_delta.set {
            state.egui_renderer.update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: egui_output.pixels_per_point,
        };

        {
            let mut egui_encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                label: Some("egui encoder"),
            });
            state.egui_renderer.update_buffers(
                device,
                queue,
                &mut egui_encoder,
                &egui_primitives,
                &screen_descriptor,
            );

            let render_pass = egui_encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: vello::wgpu::Operations {
                        // Keep the vello content underneath
                        load: vello::wgpu::LoadOp::Load,
                        store: vello::wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // egui-wgpu wants a 'static render pass
            let mut render_pass = render_pass.forget_lifetime();
            state
                .egui_renderer
                .render(&mut render_pass, &egui_primitives, &screen_descriptor);
            drop(render_pass);

            queue.submit(std::iter::once(egui_encoder.finish()));
        }

        for id in &egui_output.textures_delta.free {
            state.egui_renderer.free_texture(id);
        }
        surface_texture.present();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        #[cfg(target_arch = "wasm32")]
        if self.pending_window.is_some() {
            return;
        }
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");

        #[cfg(not(target_arch = "wasm32"))]
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        // On WASM, attach a full-viewport canvas to the DOM
        #[cfg(target_arch = "wasm32")]
        let window_attrs = {
            use winit::platform::web::WindowAttributesExtWebSys;

            let Some(canvas) = crate::web::create_canvas(self.config.width, self.config.height) else {
                log::error!("Failed to create canvas");
                return;
            };
            Window::default_attributes()
                .with_title(&self.config.title)
                .with_canvas(Some(canvas))
        };

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };
        log::info!("Surface size: {}x{}", width, height);

        // On native, block on surface creation
        #[cfg(not(target_arch = "wasm32"))]
        {
            let render_cx = self.render_cx.get_or_insert_with(vello::util::RenderContext::new);
            let surface: RenderSurface<'static> = match pollster::block_on(render_cx.create_surface(
                window.clone(),
                width,
                height,
                PresentMode::AutoVsync,
            )) {
                Ok(surface) => surface,
                Err(e) => {
                    log::error!("Failed to create surface: {:?}", e);
                    event_loop.exit();
                    return;
                }
            };
            self.finish_init(window, surface);
        }

        // On WASM, the surface arrives later as a user event
        #[cfg(target_arch = "wasm32")]
        {
            self.pending_window = Some(window.clone());
            self.begin_async_init(window, width, height);
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            #[cfg(target_arch = "wasm32")]
            AppEvent::SurfaceReady(init) => {
                let GpuInit { render_cx, surface } = *init;
                let Some(window) = self.pending_window.take() else {
                    log::error!("Surface ready without a pending window");
                    return;
                };
                log::info!("Surface created successfully");
                self.render_cx = Some(render_cx);
                self.finish_init(window, surface);
            }
            #[cfg(target_arch = "wasm32")]
            AppEvent::SurfaceFailed => {
                self.pending_window = None;
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(state) = &mut self.state else {
            return;
        };

        // Let egui process the event first
        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        let egui_wants_input = egui_response.consumed
            || state.egui_ctx.is_pointer_over_area()
            || state.egui_ctx.wants_pointer_input()
            || state.egui_ctx.wants_keyboard_input();
        if egui_response.repaint {
            state.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => {
                state.editor.unmount();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                state.editor.resize(size.width as f64, size.height as f64);
                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }
                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::CursorMoved { position, .. } => {
                let point = Point::new(position.x, position.y);
                // Drags that started on the canvas keep going under the sidebar
                let dragging = state.editor.is_dragging_gizmo() || state.pointer.camera_drag.is_some();
                if egui_wants_input && !dragging {
                    state.pointer.move_to(point);
                    return;
                }
                state.handle_cursor_moved(point);
            }

            WindowEvent::MouseInput { state: button_state, button, .. } => {
                let pressed = button_state == ElementState::Pressed;
                // Releases always reach the editor so a drag cannot get stuck
                if egui_wants_input && pressed {
                    return;
                }
                state.handle_mouse_input(button, pressed);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if egui_wants_input {
                    return;
                }
                state.handle_wheel(delta);
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapeforge_core::ShapeKind;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_registry_changes_request_redraw() {
        let mut editor = Editor::new();
        editor.mount(LiveScene::with_viewport(800.0, 600.0));
        let requests = Rc::new(Cell::new(0));
        let sink = Rc::clone(&requests);
        let subscription = redraw_on_change(&mut editor, move || sink.set(sink.get() + 1));

        let id = editor.add_shape(ShapeKind::Sphere).unwrap();
        assert_eq!(requests.get(), 1);
        editor.select_shape(Some(id));
        assert_eq!(requests.get(), 2);
        editor.remove_selected();
        assert!(requests.get() >= 3);

        let before = requests.get();
        assert!(editor.unsubscribe(subscription));
        editor.add_shape(ShapeKind::Box).unwrap();
        assert_eq!(requests.get(), before);
    }

    #[test]
    fn test_pointer_tracker_delta() {
        let mut tracker = PointerTracker::default();
        tracker.move_to(Point::new(10.0, 20.0));
        let delta = tracker.move_to(Point::new(15.0, 12.0));
        assert_eq!(delta, Vec2::new(5.0, -8.0));
        assert_eq!(tracker.position, Point::new(15.0, 12.0));
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.title, "ShapeForge");
        assert_eq!(config.export_file_name, "scene.glb");
        assert_eq!(config.grid_style, GridStyle::Lines);
    }
}
