use anyhow::{Context, Result, anyhow};
use clap::Parser;
use egui::Context as EguiContext;
use glam::Vec2;
use seascape_input::{Action, InputEvent, InputMapper, Key, PointerButton};
use seascape_kernel::{ParamEdit, ParamHandle, ParamReader, WaveParameters};
use seascape_render::{FrameLoop, SurfaceMesh, SystemClock, Viewport};
use seascape_render_wgpu::{OrbitCamera, WaterFrame, WaterRenderer};
use seascape_tools::{ControlKind, PANEL_CONTROLS, PanelState, ParamInspector, load_preset};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Wheel pixels that count as one line.
const PIXELS_PER_LINE: f32 = 50.0;

#[derive(Parser)]
#[command(name = "seascape-desktop", about = "Seascape water surface viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Preset file (.yaml, .yml or .json) to start from
    #[arg(short, long)]
    params: Option<PathBuf>,
}

/// Application state.
struct AppState {
    params: ParamHandle,
    reader: ParamReader,
    panel: PanelState,
    camera: OrbitCamera,
    frames: FrameLoop<SystemClock>,
    input: InputMapper,
    viewport: Viewport,
}

impl AppState {
    fn new(initial: WaveParameters) -> Result<Self> {
        let params = ParamHandle::new(initial).context("initial wave parameters")?;
        let reader = params.reader();
        let panel = PanelState::new(params.params());
        Ok(Self {
            params,
            reader,
            panel,
            camera: OrbitCamera::default(),
            frames: FrameLoop::new(SystemClock::new()),
            input: InputMapper::new(),
            viewport: Viewport::default(),
        })
    }

    /// Returns false when the viewer should close.
    fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::Orbit { dx, dy } => self.camera.rotate(dx, dy),
            Action::Zoom(amount) => self.camera.zoom(amount),
            Action::TogglePanel => {
                self.panel.visible = !self.panel.visible;
                tracing::debug!(visible = self.panel.visible, "debug panel toggled");
            }
            Action::ResetParameters => {
                self.panel.reset(&mut self.params);
                tracing::info!("parameters reset to defaults");
            }
            Action::Quit => return false,
            Action::Noop => {}
        }
        true
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.panel.visible {
            return;
        }

        egui::Window::new("Waves")
            .default_width(320.0)
            .resizable(false)
            .show(ctx, |ui| {
                for control in &PANEL_CONTROLS {
                    match control.kind {
                        ControlKind::Slider { min, max, step, .. }
                        | ControlKind::Frequency { min, max, step, .. } => {
                            let Some(mut value) = control.value(self.params.params()) else {
                                continue;
                            };
                            let before = value;
                            ui.add(
                                egui::Slider::new(&mut value, min..=max)
                                    .step_by(f64::from(step))
                                    .text(control.label),
                            );
                            if value != before {
                                if let Some(edit) = control.edit(value) {
                                    self.panel.submit(&mut self.params, edit);
                                }
                            }
                        }
                        ControlKind::Iterations { min, max } => {
                            let mut n = self.params.params().small_wave_iterations;
                            let before = n;
                            ui.add(egui::Slider::new(&mut n, min..=max).text(control.label));
                            if n != before {
                                if let Some(edit) = control.edit(n as f32) {
                                    self.panel.submit(&mut self.params, edit);
                                }
                            }
                        }
                        ControlKind::Color(which) => {
                            ui.horizontal(|ui| {
                                let mut rgb = self.params.params().color(which).to_srgb_u8();
                                if ui.color_edit_button_srgb(&mut rgb).changed() {
                                    let [r, g, b] = rgb;
                                    let hex = format!("#{r:02x}{g:02x}{b:02x}");
                                    self.panel
                                        .submit(&mut self.params, ParamEdit::Color(which, hex));
                                }
                                let field = ui.add(
                                    egui::TextEdit::singleline(self.panel.hex_mut(which))
                                        .desired_width(72.0),
                                );
                                if field.lost_focus() {
                                    let hex = self.panel.hex(which).to_string();
                                    self.panel
                                        .submit(&mut self.params, ParamEdit::Color(which, hex));
                                }
                                ui.label(control.label);
                            });
                        }
                    }
                }

                if let Some(error) = self.panel.last_error() {
                    ui.colored_label(egui::Color32::LIGHT_RED, error);
                }

                ui.separator();
                if ui.button("Reset (R)").clicked() {
                    self.panel.reset(&mut self.params);
                }
                ui.label(format!(
                    "Frame {}  |  revision {}",
                    self.frames.frame_count(),
                    self.params.revision()
                ));
                ui.label(format!(
                    "|d| <= {:.3}",
                    ParamInspector::amplitude_bound(self.params.params())
                ));
                ui.label("F1 hides this panel. Drag to orbit, scroll to zoom.");
            });
    }
}

/// Everything that exists only while the window does.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WaterRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(
        event_loop: &ActiveEventLoop,
        egui_ctx: &EguiContext,
        viewport: &mut Viewport,
    ) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Seascape")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| anyhow!("no compatible GPU adapter"))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("seascape_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        *viewport = Viewport::new(size.width, size.height, window.scale_factor());
        let (width, height) = viewport.render_size();

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow!("surface reports no texture formats"))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WaterRenderer::new(
            &device,
            surface_format,
            width,
            height,
            &SurfaceMesh::water_plane(),
        );

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            width,
            height,
            pixel_ratio = viewport.pixel_ratio(),
            "GPU initialized"
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, viewport: &Viewport) {
        let (width, height) = viewport.render_size();
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.renderer.resize(&self.device, width, height);
        tracing::debug!(width, height, "surface resized");
    }

    fn draw_ui(
        &mut self,
        egui_ctx: &EguiContext,
        view: &wgpu::TextureView,
        pixel_ratio: f32,
        state: &mut AppState,
    ) {
        let mut raw_input = self.egui_winit.take_egui_input(&self.window);
        rasterize_at(&mut raw_input, pixel_ratio);
        let full_output = egui_ctx.run(raw_input, |ctx| {
            state.draw_ui(ctx);
        });
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, pixel_ratio);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: pixel_ratio,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }

    fn redraw(&mut self) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };
        if !self.state.camera.is_settled() {
            self.state.camera.update();
        }

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost, reconfiguring");
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut water = WaterFrame {
            renderer: &gpu.renderer,
            device: &gpu.device,
            queue: &gpu.queue,
            view: &view,
            camera: &self.state.camera,
        };
        self.state.frames.tick(&self.state.reader, &mut water);

        let pixel_ratio = self.state.viewport.pixel_ratio() as f32;
        gpu.draw_ui(&self.egui_ctx, &view, pixel_ratio, &mut self.state);

        output.present();
        gpu.window.request_redraw();
    }
}

/// Make egui draw at the surface's capped density. Layout and pointer
/// positions stay in window points, which egui-winit already computed from
/// the native scale factor, so only the rasterization density changes.
fn rasterize_at(raw_input: &mut egui::RawInput, pixel_ratio: f32) {
    let id = raw_input.viewport_id;
    raw_input
        .viewports
        .entry(id)
        .or_default()
        .native_pixels_per_point = Some(pixel_ratio);
}

fn map_key(key: KeyCode) -> Key {
    match key {
        KeyCode::F1 => Key::F1,
        KeyCode::KeyR => Key::R,
        KeyCode::Escape => Key::Escape,
        _ => Key::Other,
    }
}

fn map_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        _ => PointerButton::Other,
    }
}

fn input_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(key),
                    state: ElementState::Pressed,
                    repeat: false,
                    ..
                },
            ..
        } => Some(InputEvent::KeyPressed(map_key(*key))),
        WindowEvent::MouseInput { state, button, .. } => Some(match state {
            ElementState::Pressed => InputEvent::ButtonPressed(map_button(*button)),
            ElementState::Released => InputEvent::ButtonReleased(map_button(*button)),
        }),
        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::CursorMoved(Vec2::new(
            position.x as f32,
            position.y as f32,
        ))),
        WindowEvent::CursorLeft { .. } => Some(InputEvent::CursorLeft),
        WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::Wheel(match delta {
            MouseScrollDelta::LineDelta(_, y) => *y,
            MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
        })),
        _ => None,
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match Gpu::new(event_loop, &self.egui_ctx, &mut self.state.viewport) {
            Ok(gpu) => {
                self.state.camera.set_aspect(self.state.viewport.aspect());
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("failed to initialize GPU: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = &mut self.gpu {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            // Releases always reach the mapper so a drag cannot outlive its button.
            let release = matches!(
                event,
                WindowEvent::MouseInput {
                    state: ElementState::Released,
                    ..
                }
            );
            if response.consumed && !release {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.state.viewport.width = new_size.width;
                self.state.viewport.height = new_size.height;
                self.state.camera.set_aspect(self.state.viewport.aspect());
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(&self.state.viewport);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.state.viewport.scale_factor = scale_factor;
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(&self.state.viewport);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            ref other => {
                let Some(input) = input_event(other) else {
                    return;
                };
                if matches!(input, InputEvent::ButtonPressed(_) | InputEvent::Wheel(_)) {
                    self.state
                        .input
                        .set_captured(self.egui_ctx.is_pointer_over_area());
                }
                let action = self.state.input.handle(input);
                if !self.state.handle_action(action) {
                    event_loop.exit();
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("seascape-desktop starting");

    let initial = match &cli.params {
        Some(path) => load_preset(path)?,
        None => WaveParameters::default(),
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(AppState::new(initial)?);
    event_loop.run_app(&mut app)?;

    Ok(())
}
