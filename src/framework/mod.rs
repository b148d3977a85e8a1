
pub mod error;
pub mod viewport;
pub mod math;
pub mod camera;
pub mod scene;
pub mod loaders;
pub mod gpu;
pub mod renderer;
pub mod gui;
pub mod clock;
pub mod config;
pub mod application;

mod bootstrap;
pub use bootstrap::*;

#[cfg(test)]
pub(crate) mod testing;
