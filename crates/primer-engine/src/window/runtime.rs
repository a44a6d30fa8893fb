use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, InitCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState, Key};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Lets a surface with a non-opaque alpha mode show the desktop behind it.
    pub transparent: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "webgpu primer".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            transparent: false,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window, initializes `app` against its device and drives it until
    /// the window closes.
    ///
    /// Errors from window/device creation or from `App::on_init` are returned
    /// once the event loop has stopped.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    exit_requested: bool,
    error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            exit_requested: false,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error = Some(err);
        self.exit(event_loop);
    }

    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        self.window = None;
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_transparent(self.config.transparent);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()?;

        let app = &mut self.app;
        entry
            .with(|fields| {
                let ctx = InitCtx {
                    window: WindowCtx {
                        window: fields.window,
                    },
                    device: fields.gpu.device(),
                    queue: fields.gpu.queue(),
                    surface_format: fields.gpu.surface_format(),
                    size: fields.gpu.size(),
                };
                app.on_init(&ctx)
            })
            .context("lesson initialization failed")?;

        Ok(entry)
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit_requested {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.window = Some(entry);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw, like a requestAnimationFrame loop.
        if let Some(entry) = &self.window {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, window) = (&mut self.app, &mut self.window);

        let Some(entry) = window.as_mut() else {
            return;
        };

        let mut exit = false;

        entry.with_mut(|fields| {
            let scale = fields.window.scale_factor();
            if let Some(ev) = translate_window_event(scale, &event) {
                exit |= ev.is_press_of(Key::Escape);
                fields.input_state.apply_event(fields.input_frame, ev);
            }

            if app.on_window_event(&event) == AppControl::Exit {
                exit = true;
            }
        });

        match &event {
            WindowEvent::CloseRequested => exit = true,

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                entry.with_mut(|fields| {
                    fields.gpu.resize_to_window(fields.window);
                    fields.window.request_redraw();
                });
            }

            WindowEvent::RedrawRequested => {
                entry.with_mut(|fields| {
                    let size = fields.gpu.size();
                    redraw(size, fields.input_frame, |input_frame| {
                        let mut ctx = FrameCtx {
                            window: WindowCtx {
                                window: fields.window,
                            },
                            gpu: fields.gpu,
                            input: fields.input_state,
                            input_frame,
                            time: fields.clock.tick(),
                        };
                        if app.on_frame(&mut ctx) == AppControl::Exit {
                            exit = true;
                        }
                    });
                });
            }

            _ => {}
        }

        if exit {
            log::debug!("window closing");
            self.exit(event_loop);
        }
    }
}

/// Runs `draw` unless the window is minimized, then clears the frame's
/// transitions either way so a press from before minimizing does not fire on
/// the first frame after restore.
fn redraw(size: PhysicalSize<u32>, input_frame: &mut InputFrame, draw: impl FnOnce(&InputFrame)) {
    if size.width > 0 && size.height > 0 {
        draw(input_frame);
    }
    input_frame.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, MouseButton};

    fn pending_space_and_click() -> (InputState, InputFrame) {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        for event in [
            InputEvent::PointerMoved { x: 1.0, y: 1.0 },
            InputEvent::Key { key: Key::Space, pressed: true, repeat: false },
            InputEvent::Button { button: MouseButton::Left, pressed: true },
            InputEvent::Button { button: MouseButton::Left, pressed: false },
        ] {
            state.apply_event(&mut frame, event);
        }
        (state, frame)
    }

    #[test]
    fn hidden_redraw_drops_pending_presses() {
        let (state, mut frame) = pending_space_and_click();
        let mut drawn = false;

        redraw(PhysicalSize::new(0, 0), &mut frame, |_| drawn = true);
        assert!(!drawn);
        assert!(!frame.key_pressed(Key::Space));
        assert!(!frame.clicked());
        assert!(state.key_down(Key::Space));

        let mut toggled = false;
        redraw(PhysicalSize::new(640, 480), &mut frame, |f| {
            toggled = f.key_pressed(Key::Space) || f.clicked();
        });
        assert!(!toggled);
    }

    #[test]
    fn visible_redraw_sees_presses_once() {
        let (_, mut frame) = pending_space_and_click();
        let mut seen = Vec::new();
        for _ in 0..2 {
            redraw(PhysicalSize::new(640, 480), &mut frame, |f| {
                seen.push((f.key_pressed(Key::Space), f.clicked()));
            });
        }
        assert_eq!(seen, [(true, true), (false, false)]);
    }
}
