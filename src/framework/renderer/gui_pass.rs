//! Drawing of egui output into a wgpu render pass.
use egui::ClippedPrimitive;
use egui_wgpu::renderer::{Renderer, ScreenDescriptor};

use crate::framework::gui::{Gui, GuiDataToRender};

pub struct GuiPass {
    egui_renderer: Renderer,
    paint_jobs:    Vec<ClippedPrimitive>,
}

impl GuiPass {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        Self {
            egui_renderer: Renderer::new(device, format, None, 1),
            paint_jobs:    vec![],
        }
    }

    /// Makes a GPU texture drawable by egui images.
    pub fn register_texture(&mut self, device: &wgpu::Device, view: &wgpu::TextureView) -> egui::TextureId {
        self.egui_renderer.register_native_texture(device, view, wgpu::FilterMode::Linear)
    }

    /// Uploads pending gui output. Without new output the paint jobs of the previous frame are kept.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        gui: &mut Gui,
        screen_descriptor: &ScreenDescriptor,
    ) -> Vec<wgpu::CommandBuffer> {
        let Some(GuiDataToRender { textures_delta, shapes }) = gui.data_to_render.take() else {
            return self.egui_renderer.update_buffers(device, queue, encoder, &self.paint_jobs, screen_descriptor);
        };

        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer.update_texture(device, queue, *id, image_delta);
        }

        self.paint_jobs = gui.egui_ctx.tessellate(shapes);
        let buffers = self.egui_renderer.update_buffers(device, queue, encoder, &self.paint_jobs, screen_descriptor);

        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        buffers
    }

    pub fn render<'pass>(&'pass self, render_pass: &mut wgpu::RenderPass<'pass>, screen_descriptor: &ScreenDescriptor) {
        if self.paint_jobs.is_empty() {
            return;
        }
        render_pass.push_debug_group("egui render pass");
        self.egui_renderer.render(render_pass, &self.paint_jobs, screen_descriptor);
        render_pass.pop_debug_group();
    }
}
