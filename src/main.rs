//! Wavegrid - Gerstner wave surface simulator
//!
//! A fixed lattice rides a sum of traveling waves; the mesh is rebuilt
//! every frame and drawn filled or as a wireframe.

use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use wavegrid::camera::CameraSystem;
use wavegrid::cli::Args;
use wavegrid::controls::{control_for_key, KEY_HELP};
use wavegrid::params::RenderConfig;
use wavegrid::rendering::{Material, RenderSystem};
use wavegrid::surface::{DrawMode, SurfaceSystem};
use wavegrid::wave::clock_seed;

/// Simulation cadence: one tick per frame at an assumed 30 frames per second
const FRAME_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 30);

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation
    surface: SurfaceSystem,
    camera: CameraSystem,

    // Configuration
    render_config: RenderConfig,

    next_frame: Instant,
}

impl App {
    fn new(surface: SurfaceSystem, render_config: RenderConfig) -> Self {
        let camera = CameraSystem::new(&render_config);

        Self {
            window: None,
            render_system: None,
            surface,
            camera,
            render_config,
            next_frame: Instant::now(),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_frame {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
            self.next_frame = now + FRAME_INTERVAL;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        // Create window
        let window_attributes = Window::default_attributes()
            .with_title("Wavegrid - Gerstner Surface")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        // Initialize rendering system
        let mut render_system = match pollster::block_on(RenderSystem::new(Arc::clone(&window))) {
            Ok(render_system) => render_system,
            Err(e) => {
                log::error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        let builder = &self.surface.builder;
        render_system.attach(
            builder.node(),
            builder.mesh(),
            Material {
                tint: self.render_config.tint,
            },
        );

        println!("\nWavegrid is running!");
        println!("{}\n", KEY_HELP);

        self.window = Some(window);
        self.render_system = Some(render_system);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
                if size.width > 0 && size.height > 0 {
                    self.render_config.window_width = size.width;
                    self.render_config.window_height = size.height;
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(control) = control_for_key(code) {
                    if !self.surface.apply(control) {
                        event_loop.exit();
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame(event_loop);
            }
            _ => {}
        }
    }
}

impl App {
    /// Advance one tick and render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };

        self.surface.step();
        render_system.update_vertices(self.surface.builder.mesh());

        let view_proj = self.camera.view_proj(&self.render_config);
        match render_system.render(view_proj, self.surface.builder.draw_mode()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = render_system.size();
                render_system.resize(width, height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

/// Step the simulation without a window and report the surface state
fn run_headless(mut surface: SurfaceSystem, frames: u64) {
    log::info!("Running {} headless frames", frames);

    for _ in 0..frames {
        surface.step();
        log::trace!(
            "tick {}: height range {:?}",
            surface.builder.time(),
            surface.builder.height_range()
        );
    }

    let builder = &surface.builder;
    let layout = builder.mesh().layout();
    println!("Ticks:    {}", builder.time());
    println!(
        "Mesh:     {} vertices, {} indices",
        layout.vertex_count, layout.index_count
    );
    match builder.height_range() {
        Some((lo, hi)) => println!("Height:   {:.4} .. {:.4}", lo, hi),
        None => println!("Height:   (empty lattice)"),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let spectrum = args.wave_spectrum();
    let seed = spectrum.seed.unwrap_or_else(clock_seed);
    let render_config = args.render_config();

    let mut surface =
        match SurfaceSystem::new(&spectrum, args.surface_layout(), args.adjust_steps(), seed) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        };
    log::info!(
        "Wavegrid: {}x{} lattice, {} waves, seed {}",
        surface.builder.grid_size(),
        surface.builder.grid_size(),
        surface.builder.field().waves.len(),
        surface.seed()
    );

    if let Some(frames) = args.headless {
        run_headless(surface, frames);
        return;
    }

    surface
        .builder
        .node_mut()
        .rotate_x_deg(render_config.surface_tilt_deg);
    if render_config.start_wireframe {
        surface.builder.set_draw_mode(DrawMode::Wireframe);
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };

    let mut app = App::new(surface, render_config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        std::process::exit(1);
    }
}
