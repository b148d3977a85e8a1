
/// Perspective projection parameters of a camera. Placement of the camera lives in its scene node.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov:          f32,
    pub aspect_ratio: f32,
    pub near:         f32,
    pub far:          f32,
    projection:       glam::Mat4,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 1.0, 0.1, 100.0)
    }
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov,
            aspect_ratio,
            near,
            far,
            projection: glam::Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Recomputes cached projection, must be called after any of the public parameters changed.
    pub fn update_projection_matrix(&mut self) {
        self.projection = glam::Mat4::perspective_rh(
            self.fov.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        );
    }

    pub fn projection_matrix(&self) -> glam::Mat4 {
        self.projection
    }

    pub fn view_matrix(&self, world: &glam::Mat4) -> glam::Mat4 {
        world.inverse()
    }

    pub fn view_projection_matrix(&self, world: &glam::Mat4) -> glam::Mat4 {
        self.projection * self.view_matrix(world)
    }
}
