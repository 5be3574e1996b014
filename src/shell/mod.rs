use std::collections::HashSet;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use gridcaster::{FrameBuffer, GameState};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use self::input::intents_from_keys;
use self::scaler::{ScaleLut, blit_nearest};

mod input;
mod scaler;

type Surface = softbuffer::Surface<Rc<Window>, Rc<Window>>;

pub struct App {
    window: Option<Rc<Window>>,
    surface: Option<Surface>,
    state: GameState,

    // Internal frame at the configured resolution, stretched to the window
    frame: FrameBuffer,
    scale_lut: ScaleLut,
    window_scale: f64,

    keys_down: HashSet<KeyCode>,
    last_tick: Instant,
    frame_time: Duration,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,

    /// Set when the shell had to stop on a platform failure
    pub failure: Option<String>,
}

impl App {
    pub fn new(state: GameState, fps: u32, window_scale: f64) -> Self {
        let frame = FrameBuffer::new(state.config.screen_width, state.config.screen_height);
        Self {
            window: None,
            surface: None,
            state,
            frame,
            scale_lut: ScaleLut::empty(),
            window_scale,
            keys_down: HashSet::new(),
            last_tick: Instant::now(),
            frame_time: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            frame_counter: 0,
            last_fps_print: Instant::now(),
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, what: &str, err: impl std::fmt::Display) {
        log::error!("{what}: {err}");
        self.failure = Some(format!("{what}: {err}"));
        event_loop.exit();
    }

    /// Input, then movement. Returns false when the player asked to quit.
    fn tick(&mut self) -> bool {
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;

        let intents = intents_from_keys(&self.keys_down);
        if intents.quit {
            return false;
        }
        self.state.apply_input(&intents, dt);
        true
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop, id: WindowId) {
        if !self.tick() {
            log::info!("escape pressed; stopping");
            event_loop.exit();
            return;
        }

        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return,
        };

        let size = window.inner_size();
        let (Some(dw), Some(dh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return; // Minimized window, skip drawing
        };

        let stats = self.state.render(&mut self.frame);
        if stats.escaped > 0 {
            log::debug!("{} of {} columns escaped", stats.escaped, stats.columns);
        }

        if let Err(err) = surface.resize(dw, dh) {
            self.fail(event_loop, "surface resize", err);
            return;
        }

        let (dw, dh) = (dw.get() as usize, dh.get() as usize);
        if !self.scale_lut.matches(dw, dh) {
            self.scale_lut = ScaleLut::build(
                dw,
                dh,
                self.state.config.screen_width as usize,
                self.state.config.screen_height as usize,
            );
        }

        let failure = match surface.buffer_mut() {
            Ok(mut buf) => {
                blit_nearest(&mut buf, self.frame.pixels(), &self.scale_lut);
                buf.present().err().map(|err| ("present", err))
            }
            Err(err) => Some(("surface buffer", err)),
        };
        if let Some((what, err)) = failure {
            self.fail(event_loop, what, err);
            return;
        }

        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            log::info!("FPS: {:.1}", self.frame_counter as f32 / elapsed);
            self.frame_counter = 0;
            self.last_fps_print = now;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let config = &self.state.config;
        let attributes = Window::default_attributes()
            .with_title("Gridcaster")
            .with_inner_size(LogicalSize::new(
                config.screen_width as f64 * self.window_scale,
                config.screen_height as f64 * self.window_scale,
            ));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Rc::new(window),
            Err(err) => return self.fail(event_loop, "create window", err),
        };
        let context = match softbuffer::Context::new(window.clone()) {
            Ok(context) => context,
            Err(err) => return self.fail(event_loop, "softbuffer context", err),
        };
        let surface = match softbuffer::Surface::new(&context, window.clone()) {
            Ok(surface) => surface,
            Err(err) => return self.fail(event_loop, "softbuffer surface", err),
        };

        window.request_redraw();
        self.surface = Some(surface);
        self.window = Some(window);
        self.last_tick = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => {
                    self.keys_down.insert(code);
                }
                ElementState::Released => {
                    self.keys_down.remove(&code);
                }
            },

            WindowEvent::Focused(false) => self.keys_down.clear(),

            WindowEvent::RedrawRequested => self.redraw(event_loop, id),

            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            return;
        };
        // Pace frames at the target rate instead of spinning
        let next = self.last_tick + self.frame_time;
        if Instant::now() >= next {
            window.request_redraw();
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(next));
        }
    }
}
