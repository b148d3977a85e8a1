mod context;
pub use context::*;

mod texture;
pub use texture::*;
