//! Test doubles standing in for the window and the GPU surface.

use winit::dpi::PhysicalSize;

use super::{
    error::SurfaceError,
    renderer::DrawingSurface,
    viewport::{HostWindow, ViewportSize},
};

/// Surface remembering every drawing buffer size it was configured with.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub configured: Vec<PhysicalSize<u32>>,
}

impl DrawingSurface for RecordingSurface {
    fn configure(&mut self, size: PhysicalSize<u32>) -> Result<(), SurfaceError> {
        self.configured.push(size);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FakeWindow {
    pub size: ViewportSize,
    pub device_pixel_ratio: f64,
}

impl FakeWindow {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            size: ViewportSize::new(width, height),
            device_pixel_ratio,
        }
    }
}

impl HostWindow for FakeWindow {
    fn inner_size(&self) -> ViewportSize {
        self.size
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }
}
