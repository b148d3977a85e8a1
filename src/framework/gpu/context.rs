use log::info;
use winit::window::Window;

use crate::framework::error::BootstrapError;

/// GPU objects shared by the whole application.
pub struct Context {
    pub surface: wgpu::Surface,
    pub adapter: wgpu::Adapter,
    pub device:  wgpu::Device,
    pub queue:   wgpu::Queue,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("adapter", &self.adapter.get_info())
            .finish_non_exhaustive()
    }
}

impl Context {

    pub async fn new(window: &Window) -> Result<Self, BootstrapError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends:             wgpu::Backends::all(),
            dx12_shader_compiler: Default::default(),
        });

        // SAFETY: the window is created before and dropped after this context by the application runner.
        let surface = unsafe { instance.create_surface(window) }?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference:       wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface:     Some(&surface),
            })
            .await
            .ok_or(BootstrapError::NoAdapter)?;

        let adapter_info = adapter.get_info();
        info!("Using adapter \"{}\" ({:?})", adapter_info.name, adapter_info.backend);

        let (device, queue) = Self::new_device_queue(&adapter).await?;

        Ok(Self {
            adapter,
            surface,
            device,
            queue,
        })
    }

    pub async fn new_device_queue(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue), BootstrapError> {
        let device_queue = adapter.request_device(
            &wgpu::DeviceDescriptor {
                label:    Some("Lesson device"),
                features: wgpu::Features::empty(),
                limits:   wgpu::Limits::downlevel_defaults().using_resolution(adapter.limits()),
            },
            None
        ).await?;
        Ok(device_queue)
    }

    /// Preferred surface format, sRGB if the adapter offers one.
    pub fn surface_format(&self) -> Option<wgpu::TextureFormat> {
        let formats = self.surface.get_capabilities(&self.adapter).formats;
        formats
            .iter()
            .copied()
            .find(|format| format.describe().srgb)
            .or_else(|| formats.first().copied())
    }
}
