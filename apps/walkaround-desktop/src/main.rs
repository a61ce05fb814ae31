use anyhow::{Context, Result};
use clap::Parser;
use egui::Context as EguiContext;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use walkaround_common::WalkConfig;
use walkaround_input::{InputEvent, InputQueue};
use walkaround_locomotion::{Locomotion, LocomotionEvent};
use walkaround_render_wgpu::{FirstPersonCamera, WgpuRenderer};
use walkaround_scene::RoomScene;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{CursorGrabMode, Window, WindowId};

#[derive(Parser)]
#[command(name = "walkaround-desktop", about = "First-person room walkaround")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML or JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Browser-style key name: the typed character, or the named key's name
/// (`ArrowUp`, `Space`, ...). Dead and unidentified keys have no name.
fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(text) => Some(text.to_string()),
        Key::Named(named) => Some(format!("{named:?}")),
        _ => None,
    }
}

/// Application state that outlives the GPU surface.
struct AppState {
    locomotion: Locomotion,
    camera: FirstPersonCamera,
    input_queue: InputQueue,
    pointer_locked: bool,
    show_hud: bool,
    jumps: u32,
    wall_hits: u32,
}

impl AppState {
    fn new(config: &WalkConfig) -> Self {
        let locomotion = Locomotion::new(config);
        let camera = FirstPersonCamera::from_config(&config.camera, locomotion.player().position);
        Self {
            locomotion,
            camera,
            input_queue: InputQueue::new(),
            pointer_locked: false,
            show_hud: true,
            jumps: 0,
            wall_hits: 0,
        }
    }

    /// One frame tick: apply buffered keys, step, then hand the position to
    /// the camera for drawing.
    fn update(&mut self) {
        self.locomotion.tick(&mut self.input_queue, &self.camera);
        self.camera.position = self.locomotion.player().position;

        for event in self.locomotion.drain_events() {
            match event {
                LocomotionEvent::JumpStarted { .. } => self.jumps += 1,
                LocomotionEvent::MoveRejected { .. } => self.wall_hits += 1,
                LocomotionEvent::Moved { .. } | LocomotionEvent::Landed { .. } => {}
            }
        }
    }

    /// Queue a movement key. F1 and Escape belong to the app and never reach
    /// the locomotion input map.
    fn handle_key(&mut self, key: &Key, pressed: bool, repeat: bool) {
        match key {
            Key::Named(NamedKey::F1) => {
                if pressed && !repeat {
                    self.show_hud = !self.show_hud;
                }
                return;
            }
            Key::Named(NamedKey::Escape) => return,
            _ => {}
        }

        let Some(name) = key_name(key) else {
            return;
        };
        let input = if pressed {
            InputEvent::down(&name)
        } else {
            InputEvent::up(&name)
        };
        self.input_queue.push(input);
    }

    /// On focus loss: apply whatever is still queued, then release every key,
    /// so a key-down that arrived just before the focus change cannot stick.
    fn release_held_keys(&mut self) {
        for event in self.input_queue.drain() {
            self.locomotion.apply_event(&event);
        }
        self.locomotion.release_keys();
    }

    fn draw_hud(&self, ctx: &EguiContext) {
        if !self.pointer_locked {
            egui::Area::new(egui::Id::new("lock_hint"))
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.heading("Click to look around");
                });
        }

        if !self.show_hud {
            return;
        }

        let player = self.locomotion.player();
        egui::Window::new("Walkaround")
            .anchor(egui::Align2::LEFT_TOP, [8.0, 8.0])
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Position: ({:.2}, {:.2}, {:.2})",
                    player.position.x, player.position.y, player.position.z
                ));
                ui.label(format!(
                    "Vertical velocity: {:.3}{}",
                    player.vertical_velocity,
                    if player.jumping { "  (jumping)" } else { "" }
                ));
                ui.label(format!("Frame: {}", self.locomotion.frame()));
                ui.label(format!("Jumps: {}  Wall hits: {}", self.jumps, self.wall_hits));
                ui.separator();
                ui.small("WASD/Arrows: Move | Space: Jump | Esc: Release mouse | F1: HUD");
            });
    }
}

/// Everything tied to the window surface, created on `resumed`.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, scene: &RoomScene, egui_ctx: &EguiContext) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Walkaround")
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
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("walkaround_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, surface_format, config.width, config.height, scene);

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
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
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

    fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    /// Draw the HUD on top of the already rendered frame.
    fn paint_hud(&mut self, view: &wgpu::TextureView, egui_ctx: &EguiContext, state: &AppState) {
        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| state.draw_hud(ctx));

        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
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
    scene: RoomScene,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(config: &WalkConfig) -> Self {
        Self {
            state: AppState::new(config),
            scene: RoomScene::build(&config.room),
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }

    /// Grab and hide the cursor, or give it back. Locked is preferred;
    /// platforms without it fall back to confining the cursor.
    fn set_pointer_lock(&mut self, locked: bool) {
        let Some(gpu) = &self.gpu else {
            return;
        };
        let result = if locked {
            gpu.window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| gpu.window.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            gpu.window.set_cursor_grab(CursorGrabMode::None)
        };
        match result {
            Ok(()) => {
                gpu.window.set_cursor_visible(!locked);
                self.state.pointer_locked = locked;
                tracing::debug!(locked, "pointer lock changed");
            }
            Err(e) => tracing::warn!("pointer lock unavailable: {e}"),
        }
    }

    fn redraw(&mut self) {
        self.state.update();

        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
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

        gpu.renderer
            .render(&gpu.device, &gpu.queue, &view, &self.state.camera);
        gpu.paint_hud(&view, &self.egui_ctx, &self.state);

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match Gpu::new(event_loop, &self.scene, &self.egui_ctx) {
            Ok(gpu) => {
                self.state
                    .camera
                    .set_aspect(gpu.config.width, gpu.config.height);
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("failed to initialize graphics: {e:#}");
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
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                    self.state
                        .camera
                        .set_aspect(gpu.config.width, gpu.config.height);
                }
            }
            WindowEvent::Focused(false) => {
                self.state.release_held_keys();
                self.set_pointer_lock(false);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape)
                {
                    self.set_pointer_lock(false);
                }
                self.state.handle_key(
                    &event.logical_key,
                    event.state == ElementState::Pressed,
                    event.repeat,
                );
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Pressed,
                ..
            } => {
                if !self.state.pointer_locked {
                    self.set_pointer_lock(true);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.state.pointer_locked {
                self.state.camera.rotate(delta.0 as f32, delta.1 as f32);
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

    let config = match &cli.config {
        Some(path) => WalkConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => WalkConfig::default(),
    };

    tracing::info!(
        boundary_limit = config.boundary_limit(),
        "walkaround-desktop starting"
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(&config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
