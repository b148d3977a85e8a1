use egui_wgpu::renderer::ScreenDescriptor;
use log::warn;
use winit::dpi::PhysicalSize;

use crate::framework::{
    error::SurfaceError,
    gui::Gui,
    viewport::ViewportSize,
};

use super::{DrawingSurface, WgpuSurface};

/// Renderer bound to a drawing surface. Size is kept in logical pixels, the drawing buffer is scaled by the pixel ratio.
#[derive(Debug)]
pub struct Renderer<S: DrawingSurface> {
    surface:         S,
    size:            ViewportSize,
    pixel_ratio:     f64,
    pub clear_color: wgpu::Color,
}

// Renderer construction and sizing
impl<S: DrawingSurface> Renderer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            size:        ViewportSize::default(),
            pixel_ratio: 1.0,
            clear_color: wgpu::Color { r: 0.1, g: 0.2, b: 0.3, a: 1.0 },
        }
    }

    pub fn size(&self) -> ViewportSize {
        self.size
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    pub fn drawing_buffer_size(&self) -> PhysicalSize<u32> {
        self.size.drawing_buffer(self.pixel_ratio)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Sets size and pixel ratio together, configuring the surface once for the resulting drawing buffer.
    /// An empty buffer is rejected and leaves the renderer untouched.
    pub fn resize(&mut self, size: ViewportSize, pixel_ratio: f64) -> Result<(), SurfaceError> {
        let buffer = size.drawing_buffer(pixel_ratio);
        check_not_empty(buffer)?;
        self.surface.configure(buffer)?;
        self.size = size;
        self.pixel_ratio = pixel_ratio;
        Ok(())
    }

    pub fn set_size(&mut self, size: ViewportSize) -> Result<(), SurfaceError> {
        self.resize(size, self.pixel_ratio)
    }

    /// Changes the pixel ratio, the drawing buffer follows once a size is set.
    pub fn set_pixel_ratio(&mut self, pixel_ratio: f64) -> Result<(), SurfaceError> {
        if self.size.is_empty() {
            self.pixel_ratio = pixel_ratio;
            return Ok(());
        }
        self.resize(self.size, pixel_ratio)
    }
}

fn check_not_empty(buffer: PhysicalSize<u32>) -> Result<(), SurfaceError> {
    if buffer.width == 0 || buffer.height == 0 {
        return Err(SurfaceError::ZeroSized { width: buffer.width, height: buffer.height });
    }
    Ok(())
}

// Frame rendering on a window surface
impl Renderer<WgpuSurface> {

    /// Clears the frame and draws the gui over it. Lost or outdated surface is reconfigured and the frame skipped.
    pub fn render(&mut self, gui: &mut Gui) -> Result<(), wgpu::SurfaceError> {
        let gpu = self.surface.gpu.clone();

        let output = match gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(err @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                warn!("Skipping frame, surface {:?}", err);
                self.surface.reconfigure();
                return Ok(());
            },
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Skipping frame, timed out acquiring surface texture");
                return Ok(());
            },
            Err(err) => return Err(err),
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        let screen_descriptor = ScreenDescriptor {
            size_in_pixels:   [self.surface.config.width, self.surface.config.height],
            pixels_per_point: self.pixel_ratio as f32,
        };

        let gui_buffers = self.surface.gui.prepare(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            gui,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Lesson Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load:  wgpu::LoadOp::Clear(self.clear_color),
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });
            self.surface.gui.render(&mut render_pass, &screen_descriptor);
        }

        gpu.queue.submit(gui_buffers.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();
        Ok(())
    }
}
