use std::path::Path;

use log::{debug, info, warn};

use super::{
    camera::{OrbitControls, PerspectiveCamera},
    error::{AssetError, BootstrapError, SurfaceError},
    gpu::Texture,
    gui::DebugPanel,
    loaders::{FontLoader, TextureLoader},
    math::Transform,
    renderer::{DrawingSurface, Renderer, WgpuSurface},
    scene::{Node, NodeId, Scene},
    viewport::{clamp_pixel_ratio, HostWindow, ViewportSize},
};

pub const CAMERA_FOV: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_POSITION: glam::Vec3 = glam::Vec3::new(1.0, 1.0, 2.0);

/// Everything a lesson needs to put a scene on screen. All members live and die together.
///
/// The context is also the resize listener of its window: the owner forwards resize events to
/// [`SceneContext::handle_resize`] for as long as it holds the context, so disposing or dropping
/// the context is what unsubscribes it.
#[derive(Debug)]
pub struct SceneContext<S: DrawingSurface> {
    sizes:              ViewportSize,
    pub scene:          Scene,
    /// Camera node, a direct child of the scene root
    pub camera:         NodeId,
    pub texture_loader: TextureLoader,
    pub font_loader:    FontLoader,
    pub controls:       OrbitControls,
    pub renderer:       Renderer<S>,
    pub gui:            DebugPanel,
}

/// Builds a scene context drawing into `surface` sized after the `host` window, with the debug panel living in `container`.
pub fn bootstrap<S: DrawingSurface>(
    surface: S,
    container: &egui::Context,
    host: &dyn HostWindow,
) -> Result<SceneContext<S>, BootstrapError> {
    let sizes = host.inner_size();

    let gui = DebugPanel::new(container);

    let mut scene = Scene::new();
    let texture_loader = TextureLoader::default();
    let font_loader = FontLoader::default();

    let placement = Transform::looking_at(CAMERA_POSITION, glam::Vec3::ZERO);
    let camera = scene.add(Node::camera(
        "camera",
        PerspectiveCamera::new(CAMERA_FOV, sizes.aspect_ratio(), CAMERA_NEAR, CAMERA_FAR),
        placement,
    ));

    let mut controls = OrbitControls::new(camera, &placement, glam::Vec3::ZERO);
    controls.set_enable_damping(true);

    let mut renderer = Renderer::new(surface);
    renderer.resize(sizes, clamp_pixel_ratio(host.device_pixel_ratio()))?;

    info!(
        "Scene bootstrapped at {}x{}, pixel ratio {}",
        sizes.width, sizes.height, renderer.pixel_ratio()
    );

    Ok(SceneContext {
        sizes,
        scene,
        camera,
        texture_loader,
        font_loader,
        controls,
        renderer,
        gui,
    })
}

impl<S: DrawingSurface> SceneContext<S> {
    /// Viewport size observed at the last resize.
    pub fn sizes(&self) -> ViewportSize {
        self.sizes
    }

    pub fn camera(&self) -> Option<&PerspectiveCamera> {
        self.scene.camera(self.camera)
    }

    pub fn camera_position(&self) -> Option<glam::Vec3> {
        self.scene.node(self.camera).map(|node| node.transform.position)
    }

    pub fn view_projection_matrix(&self) -> Option<glam::Mat4> {
        let world = self.scene.world_matrix(self.camera)?;
        self.camera().map(|camera| camera.view_projection_matrix(&world))
    }

    /// Brings camera projection and drawing buffer in line with the current window size.
    /// An empty window (e.g. minimized) is ignored and a rejected drawing buffer fails; both keep the last state.
    pub fn handle_resize(&mut self, host: &dyn HostWindow) -> Result<(), SurfaceError> {
        let sizes = host.inner_size();
        if sizes.is_empty() {
            warn!("Ignoring resize to empty viewport {}x{}", sizes.width, sizes.height);
            return Ok(());
        }

        // moving the window to another display may change its pixel ratio
        self.renderer.resize(sizes, clamp_pixel_ratio(host.device_pixel_ratio()))?;
        self.sizes = sizes;

        // aspect has to be written before the projection is recomputed
        if let Some(camera) = self.scene.camera_mut(self.camera) {
            camera.aspect_ratio = sizes.aspect_ratio();
            camera.update_projection_matrix();
        }

        debug!(
            "Resized to {}x{}, drawing buffer {:?}",
            sizes.width, sizes.height, self.renderer.drawing_buffer_size()
        );
        Ok(())
    }

    /// Advances orbit controls and moves the camera node accordingly.
    pub fn update(&mut self, delta_time_seconds: f32) {
        let placement = self.controls.update(delta_time_seconds);
        if let Some(node) = self.scene.node_mut(self.controls.object()) {
            node.transform = node.transform
                .with_position(placement.position)
                .with_rotation(placement.rotation);
        }
    }

    /// Tears the context down, handing the surface back to the caller.
    pub fn dispose(self) -> S {
        info!("Disposing scene context with {} scene nodes", self.scene.len());
        self.renderer.into_surface()
    }
}

impl SceneContext<WgpuSurface> {
    /// Decodes an image relative to the texture loader base path and uploads it to the GPU.
    pub fn load_texture(&self, path: impl AsRef<Path>) -> Result<Texture, AssetError> {
        let path = path.as_ref();
        let data = self.texture_loader.load(path)?;
        let gpu = self.renderer.surface().gpu();
        debug!("Uploading texture {} ({}x{})", path.display(), data.width, data.height);
        Ok(Texture::from_data(&gpu.device, &gpu.queue, &data, path.to_str()))
    }
}
