
mod gui;
pub use gui::*;

mod debug_panel;
pub use debug_panel::*;
