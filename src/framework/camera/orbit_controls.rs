use std::marker::PhantomData;
use winit_input_helper::WinitInputHelper;

use dolly::{
    driver::RigDriver,
    prelude::{Handedness, Position, RightHanded, Smooth, YawPitch},
    rig::{CameraRig, RigUpdateParams},
};

use crate::framework::{math::Transform, scene::NodeId};

/// Smoothness of the rig drivers when damping is on, motion keeps decaying after the input stops.
const DAMPED_SMOOTHNESS: f32 = 0.8;
const MIN_DISTANCE: f32 = 0.1;
const ZOOM_SPEED: f32 = 0.3;

/// Orbits a camera node around a target point, driven by pointer drag and mouse wheel.
pub struct OrbitControls {
    rig:            CameraRig,
    object:         NodeId,
    target:         glam::Vec3,
    enable_damping: bool,
    pub rotate_speed: f32,
}

impl std::fmt::Debug for OrbitControls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrbitControls")
            .field("object", &self.object)
            .field("target", &self.target)
            .field("enable_damping", &self.enable_damping)
            .finish()
    }
}

impl OrbitControls {
    /// Binds controls to the camera node `object` currently placed at `placement`.
    pub fn new(object: NodeId, placement: &Transform, target: glam::Vec3) -> Self {
        let mut yaw_pitch = YawPitch::new();
        yaw_pitch.set_rotation_quat(placement.rotation);
        let distance = placement.position.distance(target);

        Self {
            rig: build_rig(yaw_pitch, target, distance, DAMPED_SMOOTHNESS),
            object,
            target,
            enable_damping: true,
            rotate_speed: 0.7,
        }
    }

    pub fn object(&self) -> NodeId {
        self.object
    }

    pub fn enable_damping(&self) -> bool {
        self.enable_damping
    }

    /// Switching damping rebuilds the rig from its current goal, so pending rotation and zoom are kept.
    pub fn set_enable_damping(&mut self, enable: bool) {
        if self.enable_damping == enable {
            return;
        }
        let goal = self.rig.driver::<YawPitch>();
        let mut yaw_pitch = YawPitch::new();
        yaw_pitch.yaw_degrees = goal.yaw_degrees;
        yaw_pitch.pitch_degrees = goal.pitch_degrees;
        let distance = self.rig.driver::<SmoothZoom<RightHanded>>().distance();

        let smoothness = if enable { DAMPED_SMOOTHNESS } else { 0.0 };
        self.rig = build_rig(yaw_pitch, self.target, distance, smoothness);
        self.enable_damping = enable;
    }

    /// Rotates around the target, angles in degrees.
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        self.rig.driver_mut::<YawPitch>().rotate_yaw_pitch(yaw, pitch);
    }

    /// Positive amount moves the camera closer to the target.
    pub fn zoom(&mut self, amount: f32) {
        self.rig.driver_mut::<SmoothZoom<RightHanded>>().zoom(amount);
    }

    pub fn on_input(&mut self, input: &WinitInputHelper) {
        let (dx, dy) = input.mouse_diff();
        if (dx != 0.0 || dy != 0.0) && input.mouse_held(0) {
            self.rotate(-dx * self.rotate_speed, -dy * self.rotate_speed);
        }
        let scroll = input.scroll_diff();
        if scroll != 0.0 {
            self.zoom(scroll);
        }
    }

    /// Advances the rig and returns the new placement of the controlled camera.
    pub fn update(&mut self, delta_time_seconds: f32) -> Transform {
        let res = self.rig.update(delta_time_seconds);
        Transform {
            position: res.position.into(),
            rotation: res.rotation.into(),
            ..Default::default()
        }
    }
}

fn build_rig(yaw_pitch: YawPitch, target: glam::Vec3, distance: f32, smoothness: f32) -> CameraRig {
    CameraRig::builder()
        .with(Position::new(target))
        .with(yaw_pitch)
        .with(Smooth::new_rotation(smoothness))
        .with(SmoothZoom::new(distance, smoothness))
        .build()
}

/// Rig driver placing the camera at a smoothly changing distance behind its parent, like an arm of variable length.
#[derive(Debug)]
pub struct SmoothZoom<H: Handedness> {
    rig: CameraRig<H>,
}

impl<H: Handedness> SmoothZoom<H> {
    pub fn new(distance: f32, smoothness: f32) -> Self {
        Self {
            rig: CameraRig::builder()
                .with(Position::new(glam::vec3(0.0, 0.0, distance)))
                .with(Smooth::new_position(smoothness))
                .build(),
        }
    }

    /// Distance the arm is heading to.
    pub fn distance(&self) -> f32 {
        self.rig.driver::<Position>().position.z
    }

    pub fn zoom(&mut self, amount: f32) {
        let p = self.rig.driver_mut::<Position>();
        let scale = (1.0 - amount * ZOOM_SPEED).max(0.0);
        p.position.z = (p.position.z * scale).max(MIN_DISTANCE);
    }
}

impl<H: Handedness> RigDriver<H> for SmoothZoom<H> {
    fn update(&mut self, params: RigUpdateParams<H>) -> dolly::transform::Transform<H> {
        let t = self.rig.update(params.delta_time_seconds);

        let parent_position: glam::Vec3 = params.parent.position.into();
        let parent_rotation: glam::Quat = params.parent.rotation.into();
        let offset: glam::Vec3 = t.position.into();

        dolly::transform::Transform {
            rotation: params.parent.rotation,
            position: (parent_position + parent_rotation * offset).into(),
            phantom:  PhantomData,
        }
    }
}
