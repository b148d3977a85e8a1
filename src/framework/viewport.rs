use winit::dpi::PhysicalSize;

/// Upper bound for the pixel ratio used by the renderer, keeps fill-rate in check on high density displays.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Viewport dimensions in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportSize {
    pub width:  f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn aspect_ratio(&self) -> f32 {
        (self.width / self.height) as f32
    }

    /// Size of the drawing buffer backing this viewport at given pixel ratio (floored like a canvas does).
    pub fn drawing_buffer(&self, pixel_ratio: f64) -> PhysicalSize<u32> {
        PhysicalSize::new(
            (self.width * pixel_ratio).floor().max(0.0) as u32,
            (self.height * pixel_ratio).floor().max(0.0) as u32,
        )
    }
}

pub fn clamp_pixel_ratio(device_pixel_ratio: f64) -> f64 {
    device_pixel_ratio.min(MAX_PIXEL_RATIO)
}

/// Window hosting the drawing surface as seen by the scene bootstrapper.
pub trait HostWindow {
    /// Inner size of the window in logical pixels.
    fn inner_size(&self) -> ViewportSize;

    /// Ratio of physical to logical pixels of the display the window is on.
    fn device_pixel_ratio(&self) -> f64;
}

impl HostWindow for winit::window::Window {
    fn inner_size(&self) -> ViewportSize {
        let size = winit::window::Window::inner_size(self).to_logical::<f64>(self.scale_factor());
        ViewportSize::new(size.width, size.height)
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.scale_factor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_capped_at_two() {
        assert_eq!(clamp_pixel_ratio(1.0), 1.0);
        assert_eq!(clamp_pixel_ratio(1.5), 1.5);
        assert_eq!(clamp_pixel_ratio(2.0), 2.0);
        assert_eq!(clamp_pixel_ratio(3.0), 2.0);
    }

    #[test]
    fn drawing_buffer_is_floored() {
        let size = ViewportSize::new(100.5, 50.25);
        assert_eq!(size.drawing_buffer(1.0), PhysicalSize::new(100, 50));
        assert_eq!(size.drawing_buffer(1.5), PhysicalSize::new(150, 75));
        assert_eq!(size.drawing_buffer(2.0), PhysicalSize::new(201, 100));
    }

    #[test]
    fn zero_dimension_is_empty() {
        assert!(ViewportSize::new(0.0, 600.0).is_empty());
        assert!(ViewportSize::new(800.0, 0.0).is_empty());
        assert!(!ViewportSize::new(800.0, 600.0).is_empty());
    }
}
