//! SliderSynth - two oscillators, two sliders, and a gesture looper
//!
//! Amplitude and frequency sliders drive a Glicol sine oscillator; slider
//! movements can be recorded at 10 Hz and looped back.

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use slidersynth::audio::AudioSystem;
use slidersynth::cli::Args;
use slidersynth::control::ControlSystem;
use slidersynth::params::WindowConfig;
use slidersynth::rendering::RenderSystem;
use slidersynth::ui::{action_for_key, Panel, PanelView, UiAction};

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,
    window_config: WindowConfig,

    // Panel state and input
    control: ControlSystem<AudioSystem>,
    panel: Panel,
    /// Last pointer position, normalized to the window
    cursor: Vec2,

    /// Redraw needed before the next wait
    dirty: bool,
    title: String,

    /// Window or GPU setup failure, reported after the loop exits
    startup_error: Option<anyhow::Error>,
}

impl App {
    fn new(control: ControlSystem<AudioSystem>, window_config: WindowConfig) -> Self {
        Self {
            window: None,
            render_system: None,
            window_config,
            control,
            panel: Panel::new(),
            cursor: Vec2::ZERO,
            dirty: true,
            title: String::new(),
            startup_error: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(self.window_config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.window_config.width,
                self.window_config.height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("Failed to create window")?,
        );

        // Initialize rendering system
        let render_system = pollster::block_on(RenderSystem::new(Arc::clone(&window)))
            .context("Failed to initialize rendering")?;

        self.window = Some(window);
        self.render_system = Some(render_system);
        Ok(())
    }

    fn handle(&mut self, action: UiAction) {
        log::debug!("UI action: {:?}", action);
        action.apply(&mut self.control, Instant::now());
        self.dirty = true;
    }

    fn normalized(&self, position: winit::dpi::PhysicalPosition<f64>) -> Option<Vec2> {
        let size = self.window.as_ref()?.inner_size();
        if size.width == 0 || size.height == 0 {
            return None;
        }
        Some(Vec2::new(
            (position.x / f64::from(size.width)) as f32,
            (position.y / f64::from(size.height)) as f32,
        ))
    }

    /// Render a single frame and mirror the status into the title bar
    fn render_frame(&mut self) {
        let status = self.control.status_line();
        if let Some(window) = &self.window {
            if status != self.title {
                window.set_title(&format!("{} - {}", self.window_config.title, status));
                self.title = status;
            }
        }

        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };
        let quads = self.panel.quads(&PanelView::of(&self.control));

        match render_system.render(&quads) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_system.reconfigure();
                self.dirty = true;
            }
            Err(e) => log::error!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.create_window(event_loop) {
            self.startup_error = Some(e);
            event_loop.exit();
            return;
        }

        println!("\nSliderSynth is running!");
        println!("Space: sound | R: record | P: play | L: load demo | Del: delete");
        println!("Up/Down: amplitude | Left/Right: frequency | ESC: quit\n");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        repeat,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape {
                    event_loop.exit();
                    return;
                }
                match action_for_key(code) {
                    Some(action @ UiAction::NudgeSlider(..)) => self.handle(action),
                    Some(action) if !repeat => self.handle(action),
                    _ => {}
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(point) = self.normalized(position) {
                    self.cursor = point;
                    if let Some(action) = self.panel.pointer_moved(point) {
                        self.handle(action);
                    }
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    if let Some(action) = self.panel.pointer_pressed(self.cursor) {
                        self.handle(action);
                    }
                }
                ElementState::Released => self.panel.pointer_released(),
            },
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                }
                self.dirty = true;
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Record/playback timer
        if self.control.poll(Instant::now()) {
            self.dirty = true;
        }

        match self.control.next_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }

        if self.dirty {
            self.dirty = false;
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    simple_logger::init_with_level(args.log_level())?;

    println!("SliderSynth - two oscillators with slider gesture recording");
    println!("Initializing systems...\n");

    let config = args
        .load_config()
        .context("Failed to load configuration")?;

    // Engine failure at startup is fatal
    let audio = AudioSystem::new(config.audio.clone(), args.capture_config())
        .context("Failed to start audio engine")?;
    log::debug!(
        "Audio engine running at {} Hz on {} channels",
        audio.sample_rate(),
        audio.channels()
    );

    let mut control = ControlSystem::new(audio, config.control.clone());
    if args.load_demo {
        control.load_demo();
    }

    let mut app = App::new(control, config.window.clone());
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;

    match app.startup_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
