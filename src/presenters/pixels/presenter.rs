use egui::Context as EguiContext;
use egui_wgpu::Renderer as EguiRenderer;
use log::error;
use pixels::Pixels;
use pixels::SurfaceTexture;
use pixels::wgpu;
use winit::window::Window;

use crate::adapters::pixel_format::{DisplayTransform, place_rgba_into};
use crate::core::data::colour::Colour;
use crate::core::data::frame_buffer::{BYTES_PER_PIXEL, FrameBuffer};
use crate::input::gui::app::ports::presenter::GuiPresenterPort;

pub struct PixelsPresenter {
    pixels: Pixels<'static>,
    egui_renderer: EguiRenderer,
    width: u32,
    height: u32,
}

impl GuiPresenterPort for PixelsPresenter {
    fn new(window: &'static Window) -> Self {
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, window);

        let pixels = Pixels::new(size.width, size.height, surface_texture)
            .expect("Failed to create pixels surface");

        let egui_renderer = EguiRenderer::new(
            pixels.device(),
            pixels.render_texture_format(),
            None, // depth format
            1,    // msaa samples
        );

        let mut presenter = Self {
            pixels,
            egui_renderer,
            width: size.width,
            height: size.height,
        };
        presenter.clear();
        presenter
    }

    fn show_frame(&mut self, frame: &FrameBuffer, transform: &DisplayTransform) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        let dest = self.pixels.frame_mut();
        if transform.is_identity() && frame.width() == self.width && frame.height() == self.height {
            dest.copy_from_slice(frame.data());
        } else {
            place_rgba_into(frame, dest, self.width, self.height, transform);
        }
    }

    fn clear(&mut self) {
        let background = Colour::OPAQUE_BLACK.to_rgba();
        for pixel in self.pixels.frame_mut().chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&background);
        }
    }

    fn render(&mut self, egui_output: egui::FullOutput, egui_ctx: &EguiContext) -> Result<(), pixels::Error> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }

        let clipped_primitives = egui_ctx.tessellate(egui_output.shapes, egui_ctx.pixels_per_point());

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.width, self.height],
            pixels_per_point: egui_ctx.pixels_per_point(),
        };

        let textures_delta = egui_output.textures_delta;

        self.pixels.render_with(|encoder, render_target, context| {
            context.scaling_renderer.render(encoder, render_target);

            for (id, delta) in &textures_delta.set {
                self.egui_renderer
                    .update_texture(&context.device, &context.queue, *id, delta);
            }

            self.egui_renderer.update_buffers(
                &context.device,
                &context.queue,
                encoder,
                &clipped_primitives,
                &screen_descriptor,
            );

            {
                let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: render_target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load, // keep the fractal underneath
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                });

                self.egui_renderer.render(
                    &mut render_pass,
                    &clipped_primitives,
                    &screen_descriptor,
                );
            }

            for id in &textures_delta.free {
                self.egui_renderer.free_texture(id);
            }

            Ok(())
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;

        if let Err(e) = self.pixels.resize_surface(width, height) {
            error!("pixels: failed to resize surface: {e}");
        }
        if let Err(e) = self.pixels.resize_buffer(width, height) {
            error!("pixels: failed to resize buffer: {e}");
        }

        self.clear();
    }
}
