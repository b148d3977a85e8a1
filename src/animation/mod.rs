mod frames;
mod typewriter;

pub use frames::*;
pub use typewriter::*;
