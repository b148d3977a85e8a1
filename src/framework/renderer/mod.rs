
mod renderer;
pub use renderer::*;

mod surface;
pub use surface::*;

mod gui_pass;
pub use gui_pass::*;
