use std::sync::Arc;

use winit::dpi::PhysicalSize;

use crate::framework::{error::SurfaceError, gpu::{self, Texture}};

use super::GuiPass;

/// Drawable target the renderer paints into.
pub trait DrawingSurface {
    /// Reconfigures the drawing buffer to `size` physical pixels.
    fn configure(&mut self, size: PhysicalSize<u32>) -> Result<(), SurfaceError>;
}

/// Window surface backed by wgpu, owns the pass drawing the gui on top of the frame.
pub struct WgpuSurface {
    pub(super) gpu:    Arc<gpu::Context>,
    pub(super) config: wgpu::SurfaceConfiguration,
    pub(super) gui:    GuiPass,
}

impl std::fmt::Debug for WgpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WgpuSurface")
            .field("format", &self.config.format)
            .field("width", &self.config.width)
            .field("height", &self.config.height)
            .finish()
    }
}

impl WgpuSurface {
    /// Surface stays unconfigured until the renderer sets its size.
    pub fn new(gpu: Arc<gpu::Context>) -> Result<Self, SurfaceError> {
        let format = gpu.surface_format().ok_or(SurfaceError::NoFormat)?;
        let config = wgpu::SurfaceConfiguration {
            usage:        wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width:        0,
            height:       0,
            present_mode: wgpu::PresentMode::Fifo, // VSynch essentially - capping renders on display frame rate
            alpha_mode:   wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
        };
        let gui = GuiPass::new(&gpu.device, format);
        Ok(Self { gpu, config, gui })
    }

    pub fn gpu(&self) -> &Arc<gpu::Context> {
        &self.gpu
    }

    pub fn register_texture(&mut self, texture: &Texture) -> egui::TextureId {
        self.gui.register_texture(&self.gpu.device, &texture.view)
    }

    pub(super) fn reconfigure(&self) {
        self.gpu.surface.configure(&self.gpu.device, &self.config);
    }
}

impl DrawingSurface for WgpuSurface {
    fn configure(&mut self, size: PhysicalSize<u32>) -> Result<(), SurfaceError> {
        if size.width == 0 || size.height == 0 {
            return Err(SurfaceError::ZeroSized { width: size.width, height: size.height });
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.reconfigure();
        Ok(())
    }
}
