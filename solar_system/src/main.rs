//! Interactive solar system visualizer
//!
//! N-body gravity over the Sun, eight planets, and the Moon, advanced by a
//! fixed simulated time step per frame and drawn with a free-flying camera.
//!
//! Controls:
//! - WASD: move forward/left/back/right
//! - R/F: move up/down
//! - Shift: boost movement speed
//! - Mouse drag: look around
//! - Scroll: adjust movement speed
//! - Space: pause/resume
//! - T: toggle orbit trails
//! - Escape: quit

use common::{FlyCamera, GraphicsContext};
use glam::Vec3;
use winit::{
    event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::ControlFlow,
    keyboard::{KeyCode, PhysicalKey},
};

use solar_system::bodies::BodyRegistry;
use solar_system::config::{RenderConfig, SimConfig, SECONDS_PER_DAY};
use solar_system::ephemeris;
use solar_system::physics::GravityIntegrator;
use solar_system::renderer::Renderer;
use solar_system::rings::{self, RingData, RingVertex};

#[derive(Default)]
struct KeyState {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    boost: bool,
}

struct App {
    ctx: GraphicsContext,
    renderer: Renderer,
    integrator: GravityIntegrator,
    camera: FlyCamera,
    render_config: RenderConfig,
    saturn_ring: RingData,

    keys_pressed: KeyState,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,

    paused: bool,
    show_trails: bool,
}

impl App {
    fn new(ctx: GraphicsContext, sim_config: SimConfig, render_config: RenderConfig) -> Self {
        let renderer = Renderer::new(&ctx, render_config);

        let registry = BodyRegistry::new(ephemeris::solar_system_bodies(&render_config))
            .expect("ephemeris seed data is invalid");
        let integrator = GravityIntegrator::new(registry, &sim_config);

        // Start above the inner system, looking back toward the Sun
        let mut camera = FlyCamera::new(Vec3::new(0.0, 10.0, 45.0), ctx.aspect_ratio())
            .with_speed(render_config.camera_speed)
            .with_clip(0.05, 5000.0);
        camera.pitch = -0.2;
        camera.sensitivity = render_config.mouse_sensitivity;

        Self {
            ctx,
            renderer,
            integrator,
            camera,
            render_config,
            saturn_ring: rings::saturn_ring_data(),
            keys_pressed: KeyState::default(),
            mouse_pressed: false,
            last_mouse_pos: None,
            paused: false,
            show_trails: true,
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
        self.camera.update_aspect_ratio(self.ctx.aspect_ratio());
        self.renderer
            .resize(&self.ctx.device, new_size.width, new_size.height);
    }

    /// One tick: camera motion from wall-clock frame time, physics by
    /// exactly one fixed step (simulated time is decoupled from frame rate)
    fn update(&mut self, frame_dt: f32) {
        let keys = &self.keys_pressed;
        let local = Vec3::new(
            (keys.right as i32 - keys.left as i32) as f32,
            (keys.up as i32 - keys.down as i32) as f32,
            (keys.forward as i32 - keys.backward as i32) as f32,
        );
        if local != Vec3::ZERO {
            let boost = if keys.boost { 5.0 } else { 1.0 };
            self.camera.translate(local.normalize() * boost, frame_dt);
        }

        if !self.paused {
            self.integrator.update();
        }
    }

    fn ring_vertices(&self) -> Vec<RingVertex> {
        let Some(saturn) = self.integrator.find_body("Saturn") else {
            return Vec::new();
        };
        let center = Vec3::new(
            self.render_config.scale_position(saturn.position.x),
            self.render_config.scale_position(saturn.position.y),
            self.render_config.scale_position(saturn.position.z),
        );
        rings::ring_vertices(
            center,
            self.render_config.scale_radius(self.saturn_ring.inner_radius),
            self.render_config.scale_radius(self.saturn_ring.outer_radius),
            self.saturn_ring.tilt_degrees,
            self.render_config.ring_segments,
        )
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let ring = self.ring_vertices();
        let time_days = (self.integrator.elapsed() / SECONDS_PER_DAY) as f32;
        let render_data = self.renderer.update(
            &self.ctx.queue,
            &self.camera,
            self.integrator.bodies(),
            &ring,
            time_days,
        );

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer
            .render(&mut encoder, &view, &render_data, self.show_trails);

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        match key {
            KeyCode::KeyW => self.keys_pressed.forward = pressed,
            KeyCode::KeyS => self.keys_pressed.backward = pressed,
            KeyCode::KeyA => self.keys_pressed.left = pressed,
            KeyCode::KeyD => self.keys_pressed.right = pressed,
            KeyCode::KeyR => self.keys_pressed.up = pressed,
            KeyCode::KeyF => self.keys_pressed.down = pressed,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => self.keys_pressed.boost = pressed,

            KeyCode::Space if pressed => {
                self.paused = !self.paused;
                println!("{}", if self.paused { "Paused" } else { "Running" });
            }
            KeyCode::KeyT if pressed => {
                self.show_trails = !self.show_trails;
            }
            _ => {}
        }
    }

    fn handle_mouse_move(&mut self, x: f64, y: f64) {
        if self.mouse_pressed {
            if let Some((last_x, last_y)) = self.last_mouse_pos {
                self.camera.look((x - last_x) as f32, (y - last_y) as f32);
            }
            self.last_mouse_pos = Some((x, y));
        }
    }
}

fn main() {
    env_logger::init();

    println!("Solar System Simulator");
    println!("----------------------");
    println!("  WASD      - Move forward/left/back/right");
    println!("  R/F       - Move up/down");
    println!("  Shift     - Boost movement speed");
    println!("  Drag      - Look around");
    println!("  Scroll    - Adjust movement speed");
    println!("  Space     - Pause/Resume");
    println!("  T         - Toggle orbit trails");
    println!("  Escape    - Quit");
    println!();

    let sim_config = SimConfig::default();
    let render_config = RenderConfig::default();

    let (ctx, event_loop) = pollster::block_on(GraphicsContext::new(
        "Solar System Simulator",
        render_config.window_width,
        render_config.window_height,
    ));

    let mut app = App::new(ctx, sim_config, render_config);
    let mut last_time = std::time::Instant::now();
    let mut frame_count = 0u32;
    let mut fps_timer = std::time::Instant::now();

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(size) => app.resize(size),
                    WindowEvent::MouseInput { state, button, .. } => {
                        if button == MouseButton::Left {
                            app.mouse_pressed = state == ElementState::Pressed;
                            if !app.mouse_pressed {
                                app.last_mouse_pos = None;
                            }
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        app.handle_mouse_move(position.x, position.y);
                    }
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(key),
                                state,
                                ..
                            },
                        ..
                    } => {
                        if key == KeyCode::Escape {
                            elwt.exit();
                        } else {
                            app.handle_key(key, state == ElementState::Pressed);
                        }
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        let scroll = match delta {
                            MouseScrollDelta::LineDelta(_, y) => y,
                            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                        };
                        app.camera.scale_speed(1.1f32.powf(scroll));
                    }
                    WindowEvent::RedrawRequested => {
                        let now = std::time::Instant::now();
                        let frame_dt = (now - last_time).as_secs_f32().min(0.1);
                        last_time = now;

                        app.update(frame_dt);

                        match app.render() {
                            Ok(_) => {}
                            Err(wgpu::SurfaceError::Lost) => app.resize(app.ctx.size),
                            Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                            Err(e) => eprintln!("Render error: {:?}", e),
                        }

                        frame_count += 1;
                        if fps_timer.elapsed().as_secs_f32() >= 2.0 {
                            let fps = frame_count as f32 / fps_timer.elapsed().as_secs_f32();
                            let years =
                                app.integrator.elapsed() / (SECONDS_PER_DAY * 365.25);
                            println!("FPS: {fps:.1} | Simulated time: {years:.2} years");
                            frame_count = 0;
                            fps_timer = std::time::Instant::now();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    app.ctx.window.request_redraw();
                }
                _ => {}
            }
        })
        .expect("Event loop error");
}
