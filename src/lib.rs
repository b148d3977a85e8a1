pub mod framework;
pub mod animation;
pub mod demo_app;
