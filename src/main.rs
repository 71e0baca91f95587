use std::time::Instant;

use tracing::{error, info};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

// Import from the library crate
use spacesim::{logging, FrameStatus, Scene, SimConfig, SimResult};
use spacesim::controller::{InputEvent, InputProcessor, InputState, MouseButton, SimClock};
use spacesim::view::TraceSink;

struct App {
    config: SimConfig,
    window: Option<Window>,

    // Simulation
    scene: Scene,
    clock: SimClock,
    sink: TraceSink,

    // Input handling
    input: InputState,
    processor: InputProcessor,

    // Frame timing
    last_frame_time: Instant,
}

impl App {
    fn new(config: SimConfig) -> SimResult<Self> {
        let scene = Scene::new(config.clone())?;
        Ok(Self {
            input: InputState::new(config.window.width, config.window.height),
            processor: InputProcessor::default(),
            clock: SimClock::new(config.max_frame_dt),
            sink: TraceSink::new(60),
            window: None,
            last_frame_time: Instant::now(),
            scene,
            config,
        })
    }

    fn key_event(&mut self, code: KeyCode, state: ElementState) {
        let Some(name) = key_name(code) else {
            return;
        };
        let event = match state {
            ElementState::Pressed => InputEvent::KeyDown(name.to_string()),
            ElementState::Released => InputEvent::KeyUp(name.to_string()),
        };
        self.input.process_event(&event);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = (now - self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        let clock = self.clock.advance(dt);
        let frame_input = self.processor.sample(&self.input);
        match self.scene.update(&frame_input, clock) {
            FrameStatus::Continue => self.scene.present(&mut self.sink),
            FrameStatus::Exit => {
                info!(frames = self.scene.frame(), seconds = clock.total, "exit requested, shutting down");
                event_loop.exit();
            }
        }
    }
}

/// Names used by `KeyBindings` for the keys the simulation reacts to
fn key_name(code: KeyCode) -> Option<&'static str> {
    let name = match code {
        KeyCode::KeyW => "w",
        KeyCode::KeyS => "s",
        KeyCode::KeyA => "a",
        KeyCode::KeyD => "d",
        KeyCode::ArrowUp => "ArrowUp",
        KeyCode::ArrowDown => "ArrowDown",
        KeyCode::ArrowLeft => "ArrowLeft",
        KeyCode::ArrowRight => "ArrowRight",
        KeyCode::Escape => "Escape",
        _ => return None,
    };
    Some(name)
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.window.width, self.config.window.height));

        match event_loop.create_window(attributes) {
            Ok(window) => {
                window.set_cursor_visible(false);
                let size = window.inner_size();
                self.input.process_event(&InputEvent::Resized {
                    width: size.width,
                    height: size.height,
                });
                info!(width = size.width, height = size.height, "window created");
                self.window = Some(window);
                self.last_frame_time = Instant::now();
            }
            Err(e) => {
                error!("window creation failed: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    self.input.process_event(&InputEvent::Resized {
                        width: size.width,
                        height: size.height,
                    });
                }
            }
            WindowEvent::Focused(false) => self.input.process_event(&InputEvent::FocusLost),
            WindowEvent::KeyboardInput {
                event: KeyEvent { state, physical_key: PhysicalKey::Code(code), .. },
                ..
            } => self.key_event(code, state),
            WindowEvent::CursorMoved { position, .. } => {
                self.input.process_event(&InputEvent::PointerMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    winit::event::MouseButton::Left => MouseButton::Left,
                    winit::event::MouseButton::Right => MouseButton::Right,
                    _ => MouseButton::Middle,
                };
                self.input.process_event(&InputEvent::MouseClick {
                    button,
                    is_down: state == ElementState::Pressed,
                });
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<(), winit::error::EventLoopError> {
    logging::init();

    let mut app = match App::new(SimConfig::default()) {
        Ok(app) => app,
        Err(e) => {
            error!("failed to build scene: {e}");
            std::process::exit(1);
        }
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app)
}
