use std::marker::PhantomData;
use std::time::{Duration, Instant};

use log::error;
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::error::EventLoopError;
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::input::gui::app::gui_app::GuiApp;
use crate::input::gui::app::ports::presenter::GuiPresenterPort;
use crate::input::gui::commands::ports::presenter_factory::GuiPresenterFactoryPort;

/// How often controllers are ticked while a render is active.
const ACTIVE_TICK_INTERVAL: Duration = Duration::from_millis(16);

pub struct RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    presenter_factory: F,
    _phantom: PhantomData<fn() -> P>,
}

impl<F, P> RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    pub fn new(presenter_factory: F) -> Self {
        Self {
            presenter_factory,
            _phantom: PhantomData,
        }
    }

    pub fn execute(&self) -> Result<(), EventLoopError> {
        let event_loop = EventLoop::new()?;

        let window: &'static Window = Box::leak(Box::new(
            WindowBuilder::new()
                .with_title("Mandelbrot Explorer")
                .with_inner_size(LogicalSize::new(800.0, 600.0))
                .with_min_inner_size(LogicalSize::new(200.0, 200.0))
                .build(&event_loop)
                .map_err(EventLoopError::Os)?,
        ));

        let presenter: P = self.presenter_factory.build(window);
        let mut app = GuiApp::new(window, &event_loop, presenter);
        let mut redraw_pending = true;

        event_loop.run(|event, elwt| match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => {
                // Forward event to egui first
                let (egui_consumed, egui_repaint) = app.handle_window_event(window, event);
                if egui_repaint {
                    redraw_pending = true;
                }

                if app.handle_pointer_event(event, egui_consumed) {
                    redraw_pending = true;
                }

                match event {
                    WindowEvent::CloseRequested => {
                        app.shutdown();
                        elwt.exit();
                    }
                    WindowEvent::RedrawRequested => {
                        redraw_pending = false;

                        let egui_output = app.update_ui(window);
                        app.egui_state
                            .handle_platform_output(window, egui_output.platform_output.clone());

                        if egui_output
                            .viewport_output
                            .values()
                            .any(|v| v.repaint_delay.is_zero())
                        {
                            redraw_pending = true;
                        }

                        if let Err(e) = app.render(egui_output) {
                            error!("render error: {e}");
                            app.shutdown();
                            elwt.exit();
                        }
                    }
                    WindowEvent::Resized(size) => {
                        app.resize(size.width, size.height);
                        redraw_pending = true;
                    }
                    WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                        app.scale_factor = *scale_factor;
                        app.egui_ctx.set_pixels_per_point(*scale_factor as f32);
                        let size = window.inner_size();
                        app.resize(size.width, size.height);
                        redraw_pending = true;
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                let now = Instant::now();
                if app.tick(now) {
                    redraw_pending = true;
                }

                // progress and button states change while busy
                if app.is_busy() {
                    redraw_pending = true;
                    elwt.set_control_flow(ControlFlow::WaitUntil(now + ACTIVE_TICK_INTERVAL));
                } else {
                    elwt.set_control_flow(ControlFlow::Wait);
                }

                if redraw_pending {
                    window.request_redraw();
                }
            }
            _ => {}
        })
    }
}
