use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use egui::Context;
use egui_winit::State as EguiWinitState;
use log::warn;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::Window;

use crate::adapters::pixel_format::DisplayTransform;
use crate::controllers::continuous::continuous_config::ContinuousConfig;
use crate::controllers::continuous::renderer::ContinuousRenderer;
use crate::controllers::coordinator::RendererCoordinator;
use crate::controllers::data::render_request::{ControllerSlot, GenerationMode, RenderStrategy};
use crate::controllers::errors::rendering::RenderingError;
use crate::controllers::export::{DEFAULT_FILE_NAME, save_image};
use crate::controllers::ports::render_controller::StartOutcome;
use crate::controllers::ports::viewport_input::ViewportInput;
use crate::controllers::still::cpu::CpuRasterizer;
use crate::controllers::still::gpu::GpuRasterizer;
use crate::core::data::frame_buffer::FrameBuffer;
use crate::core::data::point::ScreenPoint;
use crate::core::util::target_resolution::ResolutionPolicy;
use crate::input::gui::app::ports::presenter::GuiPresenterPort;
use crate::input::gui::ui_state::GuiAppState;
use crate::presenters::file::png::PngFilePresenter;

/// Wheel deltas reported in pixels are converted to lines at this rate.
const PIXELS_PER_SCROLL_LINE: f64 = 20.0;

#[derive(Default)]
struct UiActions {
    generate: bool,
    cancel: bool,
    save: bool,
    reset_view: bool,
    dismiss_error: bool,
    dismiss_notice: bool,
}

pub struct GuiApp<T: GuiPresenterPort> {
    width: u32,
    height: u32,
    pub scale_factor: f64,
    presenter: T,
    coordinator: RendererCoordinator,
    ui_state: GuiAppState,
    displayed: Option<Arc<FrameBuffer>>,
    still_view: DisplayTransform,
    cursor: Option<ScreenPoint>,
    dragging: bool,
    pub egui_ctx: Context,
    pub egui_state: EguiWinitState,
}

impl<T: GuiPresenterPort> GuiApp<T> {
    pub fn new(window: &'static Window, event_loop: &EventLoop<()>, presenter: T) -> Self {
        let size = window.inner_size();
        let scale_factor = window.scale_factor();
        let egui_ctx = Context::default();

        let egui_state = EguiWinitState::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            event_loop,
            Some(scale_factor as f32),
            None, // max_texture_side, use default
        );

        let mut coordinator = RendererCoordinator::new();
        coordinator.register(Box::new(CpuRasterizer::new()));
        coordinator.register(Box::new(GpuRasterizer::new()));
        coordinator.register(Box::new(ContinuousRenderer::new(ContinuousConfig::default())));

        Self {
            width: size.width,
            height: size.height,
            scale_factor,
            presenter,
            coordinator,
            ui_state: GuiAppState::default(),
            displayed: None,
            still_view: DisplayTransform::default(),
            cursor: None,
            dragging: false,
            egui_ctx,
            egui_state,
        }
    }

    /// True while a controller needs regular ticks.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.ui_state.signals().is_generating()
    }

    pub fn render(&mut self, egui_output: egui::FullOutput) -> Result<(), pixels::Error> {
        self.presenter.render(egui_output, &self.egui_ctx)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;

        if self.ui_state.mode == GenerationMode::Continuous {
            if let Some(input) = self.continuous_input() {
                input.resize(width, height);
            }
        }

        if width == 0 || height == 0 {
            return;
        }

        self.presenter.resize(width, height);
        self.refresh_display();
    }

    /// Starts a requested generation, lets every controller catch up, and
    /// picks up a new frame for display. Returns whether the window changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let slot = self.ui_state.slot();
        if self.ui_state.signals().is_generating() {
            self.start_if_requested(slot);
        }

        self.coordinator.tick(now);

        let Some(frame) = self
            .coordinator
            .get_mut(slot)
            .and_then(|controller| controller.preview())
        else {
            return false;
        };

        if self
            .displayed
            .as_ref()
            .is_some_and(|shown| Arc::ptr_eq(shown, &frame))
        {
            return false;
        }

        self.displayed = Some(frame);
        self.refresh_display()
    }

    pub fn update_ui(&mut self, window: &Window) -> egui::FullOutput {
        let raw_input = self.egui_state.take_egui_input(window);

        let previous_slot = self.ui_state.slot();
        let generating = self.ui_state.signals().is_generating();
        let progress = self.ui_state.signals().progress() as f32;
        let error_message = self.ui_state.error_message().map(str::to_owned);
        let notice = self.ui_state.notice().map(str::to_owned);
        let (width, height) = (self.width, self.height);
        let ui_state = &mut self.ui_state;
        let mut actions = UiActions::default();

        let output = self.egui_ctx.run(raw_input, |ctx| {
            egui::Window::new("Mandelbrot")
                .default_pos([10.0, 10.0])
                .default_size([260.0, 240.0])
                .show(ctx, |ui| {
                    ui.add_enabled_ui(!generating, |ui| {
                        let still = ui_state.mode == GenerationMode::StillImage;
                        ui.add_enabled_ui(still, |ui| {
                            ui.horizontal(|ui| {
                                ui.label("Strategy:");
                                ui.selectable_value(&mut ui_state.strategy, RenderStrategy::Cpu, "CPU");
                                ui.selectable_value(&mut ui_state.strategy, RenderStrategy::Gpu, "GPU");
                            });
                        });

                        let mut mode = ui_state.mode;
                        ui.horizontal(|ui| {
                            ui.label("Mode:");
                            ui.selectable_value(&mut mode, GenerationMode::StillImage, "Still image");
                            ui.selectable_value(&mut mode, GenerationMode::Continuous, "Continuous");
                        });
                        if mode != ui_state.mode {
                            ui_state.select_mode(mode);
                        }

                        let depth_range = ui_state.iteration_depth_range();
                        ui.horizontal(|ui| {
                            ui.label("Iterations:");
                            ui.add(egui::Slider::new(
                                &mut ui_state.config.iteration_depth,
                                depth_range,
                            ));
                        });
                    });

                    ui.separator();
                    ui.horizontal(|ui| {
                        if ui.add_enabled(!generating, egui::Button::new("Generate")).clicked() {
                            actions.generate = true;
                        }
                        if ui.add_enabled(generating, egui::Button::new("Cancel")).clicked() {
                            actions.cancel = true;
                        }
                        if ui.button("Save").clicked() {
                            actions.save = true;
                        }
                        if ui.button("Reset view").clicked() {
                            actions.reset_view = true;
                        }
                    });

                    ui.add(egui::ProgressBar::new(progress).show_percentage());
                    ui.label(format!("Window size: {width}x{height}"));
                });

            if let Some(message) = &error_message {
                egui::Window::new("Error")
                    .collapsible(false)
                    .resizable(false)
                    .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                    .show(ctx, |ui| {
                        ui.colored_label(egui::Color32::LIGHT_RED, message);
                        if ui.button("OK").clicked() {
                            actions.dismiss_error = true;
                        }
                    });
            }

            if let Some(message) = &notice {
                egui::Window::new("Success!")
                    .collapsible(false)
                    .resizable(false)
                    .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                    .show(ctx, |ui| {
                        ui.label(message);
                        if ui.button("OK").clicked() {
                            actions.dismiss_notice = true;
                        }
                    });
            }
        });

        self.apply(actions, previous_slot);
        output
    }

    pub fn handle_window_event(&mut self, window: &Window, event: &WindowEvent) -> (bool, bool) {
        let response = self.egui_state.on_window_event(window, event);
        (response.consumed, response.repaint)
    }

    /// Routes pointer input to the active view: the continuous renderer, or
    /// the zoom and offset of a finished still image. Returns whether the
    /// window needs a redraw.
    pub fn handle_pointer_event(&mut self, event: &WindowEvent, egui_consumed: bool) -> bool {
        match self.ui_state.mode {
            GenerationMode::Continuous => self.handle_continuous_pointer(event, egui_consumed),
            GenerationMode::StillImage => self.handle_still_pointer(event, egui_consumed),
        }
    }

    pub fn shutdown(&mut self) {
        self.ui_state.request_cancel();
        self.coordinator.dispose_all();
    }

    fn handle_continuous_pointer(&mut self, event: &WindowEvent, egui_consumed: bool) -> bool {
        let now = Instant::now();
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let point = ScreenPoint {
                    x: position.x,
                    y: position.y,
                };
                self.cursor = Some(point);
                if !self.dragging {
                    return false;
                }
                self.with_continuous_input(|input| input.pointer_dragged(point, now))
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                false
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed if !egui_consumed => {
                    let Some(point) = self.cursor else {
                        return false;
                    };
                    self.dragging = true;
                    self.with_continuous_input(|input| input.pointer_down(point, now))
                }
                ElementState::Released if self.dragging => {
                    self.dragging = false;
                    self.with_continuous_input(|input| input.pointer_up(now))
                }
                _ => false,
            },
            WindowEvent::MouseWheel { delta, .. } if !egui_consumed => {
                let Some(point) = self.cursor else {
                    return false;
                };
                let lines = scroll_lines(delta);
                self.with_continuous_input(|input| input.scroll(point, lines, now))
            }
            WindowEvent::TouchpadMagnify { delta, .. } if !egui_consumed => {
                let Some(point) = self.cursor else {
                    return false;
                };
                self.with_continuous_input(|input| input.magnify(point, *delta, now))
            }
            _ => false,
        }
    }

    /// A still image can be zoomed and dragged once it is finished.
    fn handle_still_pointer(&mut self, event: &WindowEvent, egui_consumed: bool) -> bool {
        let busy = self.is_busy();
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let point = ScreenPoint {
                    x: position.x,
                    y: position.y,
                };
                let previous = self.cursor.replace(point);
                let Some(previous) = previous else {
                    return false;
                };
                if !self.dragging || busy {
                    return false;
                }
                self.still_view.drag_by(point.x - previous.x, point.y - previous.y);
                self.refresh_display()
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                false
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = *state == ElementState::Pressed && !egui_consumed && !busy;
                false
            }
            WindowEvent::MouseWheel { delta, .. } if !egui_consumed && !busy => {
                self.still_view.scroll(scroll_lines(delta));
                self.refresh_display()
            }
            _ => false,
        }
    }

    /// Redraws the displayed frame with the current view. Returns whether
    /// there was a frame to show.
    fn refresh_display(&mut self) -> bool {
        let Some(frame) = &self.displayed else {
            return false;
        };
        let transform = match self.ui_state.mode {
            GenerationMode::StillImage => self.still_view,
            GenerationMode::Continuous => DisplayTransform::default(),
        };
        self.presenter.show_frame(frame, &transform);
        true
    }

    fn start_if_requested(&mut self, slot: ControllerSlot) {
        let request = self.ui_state.build_render_request((self.width, self.height));
        let signals = self.ui_state.signals().clone();

        let params = match request.resolve(&self.ui_state.config, &ResolutionPolicy::default()) {
            Ok(params) => params,
            Err(err) => {
                warn!("gui: cannot start a render: {err}");
                signals.set_generating(false);
                return;
            }
        };

        match self.coordinator.dispatch_start(slot, params, &signals) {
            Ok(None | Some(StartOutcome::Started | StartOutcome::AlreadyActive)) => {}
            Ok(Some(StartOutcome::Disabled | StartOutcome::Failed)) => {
                self.ui_state
                    .report(&RenderingError::ControllerUnavailable { slot });
            }
            Err(err) => {
                signals.set_generating(false);
                self.ui_state.report(&err);
            }
        }
    }

    fn apply(&mut self, actions: UiActions, previous_slot: ControllerSlot) {
        if self.ui_state.slot() != previous_slot {
            if let Some(controller) = self.coordinator.get_mut(previous_slot) {
                controller.dispose();
            }
            self.ui_state.detach_signals();
            self.displayed = None;
            self.still_view = DisplayTransform::default();
            self.presenter.clear();
        }

        if actions.cancel {
            self.ui_state.request_cancel();
        }

        if actions.reset_view {
            self.ui_state.reset_view();
            self.still_view = DisplayTransform::default();
            let home = self.ui_state.config.continuous_viewport;
            if let Some(input) = self.continuous_input() {
                input.set_viewport(home);
            }
            self.refresh_display();
        }

        if actions.generate {
            // a finished controller has to be dismissed before it starts again
            if let Some(controller) = self.coordinator.get_mut(self.ui_state.slot()) {
                if controller.has_rendered() {
                    controller.dispose();
                }
            }
            self.ui_state.request_generation();
        }

        if actions.save {
            let sink = PngFilePresenter::new();
            let path = Path::new(DEFAULT_FILE_NAME);
            match save_image(
                &mut self.coordinator,
                self.ui_state.strategy,
                self.ui_state.mode,
                &sink,
                path,
            ) {
                Ok(()) => self.ui_state.report_saved(path),
                Err(err) => self.ui_state.report(&err),
            }
        }

        if actions.dismiss_error {
            self.ui_state.dismiss_error();
        }

        if actions.dismiss_notice {
            self.ui_state.dismiss_notice();
        }
    }

    fn continuous_input(&mut self) -> Option<&mut dyn ViewportInput> {
        self.coordinator
            .get_mut(ControllerSlot::Continuous)
            .and_then(|controller| controller.viewport_input())
    }

    fn with_continuous_input(&mut self, f: impl FnOnce(&mut dyn ViewportInput)) -> bool {
        match self.continuous_input() {
            Some(input) => {
                f(input);
                true
            }
            None => false,
        }
    }
}

fn scroll_lines(delta: &MouseScrollDelta) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => f64::from(*y),
        MouseScrollDelta::PixelDelta(offset) => offset.y / PIXELS_PER_SCROLL_LINE,
    }
}
