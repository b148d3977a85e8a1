
mod camera;
pub use camera::*;

mod orbit_controls;
pub use orbit_controls::*;
