use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use glam::Vec2;

mod config;
mod renderer;
mod scene;
mod ui;

use config::{AppConfig, WINDOW_SIZE, WINDOW_TITLE};
use renderer::{Camera, GpuState};
use scene::Scene;
use ui::{PanelStats, UiActions, UiState, apply_theme, draw_help_overlay, draw_side_panel};

#[derive(Default)]
struct DragState {
    orbiting: bool,
    panning: bool,
    last_cursor: Option<Vec2>,
}

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    egui_state: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    egui_ctx: egui::Context,

    camera: Camera,
    scene: Scene,
    ui_state: UiState,
    drag: DragState,

    started: Instant,
    last_frame: Instant,
    frame_count: u32,
    fps_timer: Instant,
    fps: f32,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let ui_state = UiState::new(config.vsync);
        let scene = Scene::new(ui_state.plane, config.seed);
        log::info!(
            "plane {:?}: {} vertices, {} triangles",
            scene.plane.params(),
            scene.plane.vertex_count(),
            scene.plane.triangle_count()
        );

        let now = Instant::now();
        Self {
            window: None,
            gpu: None,
            egui_state: None,
            egui_renderer: None,
            egui_ctx: egui::Context::default(),

            camera: Camera::default(),
            scene,
            ui_state,
            drag: DragState::default(),

            started: now,
            last_frame: now,
            frame_count: 0,
            fps_timer: now,
            fps: 0.0,
        }
    }

    fn init_gpu(&mut self, window: Arc<Window>) -> Result<()> {
        let mut gpu = pollster::block_on(GpuState::new(
            window.clone(),
            &self.scene.plane,
            self.ui_state.vsync_enabled,
        ))?;
        self.scene.plane.take_dirty();
        gpu.resize(window.inner_size());

        let size = window.inner_size();
        self.camera
            .set_aspect(size.width.max(1) as f32, size.height.max(1) as f32);

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            self.egui_ctx.viewport_id(),
            &window,
            Some(window.scale_factor() as f32),
            None,
            Some(2048),
        );

        let egui_renderer =
            egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);

        apply_theme(&self.egui_ctx);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);
        Ok(())
    }

    fn update(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.frame_count += 1;
        let fps_elapsed = self.fps_timer.elapsed().as_secs_f32();
        if fps_elapsed >= 1.0 {
            self.fps = self.frame_count as f32 / fps_elapsed;
            self.frame_count = 0;
            self.fps_timer = now;
        }

        let timestamp_ms = now.duration_since(self.started).as_secs_f64() * 1000.0;
        self.scene.step(timestamp_ms, dt, &self.camera);

        if let Some(gpu) = &self.gpu {
            gpu.sync_plane(&mut self.scene.plane);
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let (Some(window), Some(egui_state)) = (&self.window, &mut self.egui_state) else {
            return Ok(());
        };

        let raw_input = egui_state.take_egui_input(window);

        let stats = PanelStats {
            fps: self.fps,
            vertices: self.scene.plane.vertex_count(),
            triangles: self.scene.plane.triangle_count(),
            hovered: self.scene.hovered(),
            active_fades: self.scene.active_fades(),
        };
        let eye = self.camera.position().to_array();
        let distance = self.camera.distance;

        let mut ui_actions = UiActions::default();

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            ui_actions = draw_side_panel(ctx, &mut self.ui_state, &stats);
            draw_help_overlay(ctx, eye, distance);
        });

        self.handle_ui_actions(ui_actions);

        let Some(gpu) = &mut self.gpu else { return Ok(()) };
        let Some(window) = &self.window else { return Ok(()) };
        let Some(egui_state) = &mut self.egui_state else {
            return Ok(());
        };
        let Some(egui_renderer) = &mut self.egui_renderer else {
            return Ok(());
        };

        egui_state.handle_platform_output(window, full_output.platform_output);

        let output = gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.update_camera(&self.camera);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, id, &delta);
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Main Encoder"),
            });

        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        gpu.render_plane(&view, &mut encoder);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in full_output.textures_delta.free {
            egui_renderer.free_texture(&id);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        window.request_redraw();
        Ok(())
    }

    fn handle_ui_actions(&mut self, actions: UiActions) {
        if actions.regenerate_plane {
            self.scene.regenerate(self.ui_state.plane);
            if let Some(gpu) = &mut self.gpu {
                gpu.replace_plane(&mut self.scene.plane);
            }
        }

        if actions.vsync_changed {
            if let Some(gpu) = &mut self.gpu {
                gpu.set_vsync(self.ui_state.vsync_enabled);
            }
        }
    }

    fn handle_cursor(&mut self, position: Vec2) {
        if let Some(window) = &self.window {
            let size = window.inner_size();
            self.scene
                .pointer
                .update(position.x as f64, position.y as f64, size.width, size.height);
        }

        if let Some(last) = self.drag.last_cursor {
            let delta = position - last;
            if self.drag.orbiting {
                self.camera.process_orbit(delta);
            }
            if self.drag.panning {
                self.camera.process_pan(delta);
            }
        }
        self.drag.last_cursor = Some(position);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1));

        let result = event_loop
            .create_window(window_attrs)
            .context("failed to create window")
            .and_then(|window| self.init_gpu(Arc::new(window)));

        if let Err(err) = result {
            log::error!("startup failed: {err:#}");
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(egui_state) = &mut self.egui_state {
            if let Some(window) = &self.window {
                let response = egui_state.on_window_event(window, &event);
                let is_release = matches!(
                    event,
                    WindowEvent::MouseInput {
                        state: ElementState::Released,
                        ..
                    }
                );
                if response.consumed && !is_release {
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size);
                    self.camera
                        .set_aspect(size.width as f32, size.height as f32);
                }
                self.scene.pointer.resize(size.width, size.height);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    event_loop.exit();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor(Vec2::new(position.x as f32, position.y as f32));
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let pressed = state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.drag.orbiting = pressed,
                    MouseButton::Right => self.drag.panning = pressed,
                    _ => {}
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    winit::event::MouseScrollDelta::LineDelta(_, y) => y,
                    winit::event::MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                self.camera.process_scroll(scroll);
            }

            WindowEvent::RedrawRequested => {
                self.update();
                match self.render() {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        log::warn!("surface lost or outdated, reconfiguring");
                        if let Some(gpu) = &mut self.gpu {
                            gpu.resize(gpu.size);
                        }
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("GPU out of memory, exiting");
                        event_loop.exit();
                    }
                    Err(wgpu::SurfaceError::Timeout) => {
                        log::debug!("surface timeout, skipping frame");
                    }
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()?;
    log::info!("starting with {:?}", config);

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop
        .run_app(&mut app)
        .context("event loop exited with an error")?;

    Ok(())
}
