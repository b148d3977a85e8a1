use std::num::NonZeroU32;

use crate::framework::loaders::TextureData;

/// Sampled 2D texture living on the GPU.
#[derive(Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view:    wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Texture {
    pub fn from_data(device: &wgpu::Device, queue: &wgpu::Queue, data: &TextureData, label: Option<&str>) -> Self {
        let dimensions = wgpu::Extent3d {
            width:  data.width,
            height: data.height,
            depth_or_array_layers: 1, // 2D texture is just special case of flat 3d texture
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size:            dimensions,
            mip_level_count: 1,
            sample_count:    1,
            dimension:       wgpu::TextureDimension::D2,
            format:          wgpu::TextureFormat::Rgba8UnormSrgb, // color textures are authored in sRGB
            usage:           wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats:    &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture:   &texture,
                mip_level: 0,
                origin:    wgpu::Origin3d::ZERO,
                aspect:    wgpu::TextureAspect::All,
            },
            &data.rgba,
            wgpu::ImageDataLayout {
                offset:         0,
                bytes_per_row:  NonZeroU32::new(4 * data.width),
                rows_per_image: NonZeroU32::new(data.height),
            },
            dimensions,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label:          Some("Texture Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter:     wgpu::FilterMode::Linear,
            min_filter:     wgpu::FilterMode::Linear,
            mipmap_filter:  wgpu::FilterMode::Nearest,
            ..wgpu::SamplerDescriptor::default()
        });

        Self { texture, view, sampler }
    }
}
