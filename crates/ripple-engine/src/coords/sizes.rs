use super::Viewport;

/// Upper bound on the pixel ratio used for the drawable surface.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Returns `min(device_pixel_ratio, MAX_PIXEL_RATIO)`.
///
/// Non-finite or non-positive ratios fall back to `1.0`.
pub fn capped_pixel_ratio(device_pixel_ratio: f64) -> f32 {
    if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
        return 1.0;
    }
    (device_pixel_ratio as f32).min(MAX_PIXEL_RATIO)
}

/// Window size in logical pixels plus the pixel ratio the renderer draws at.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sizes {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Sizes {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio: capped_pixel_ratio(device_pixel_ratio),
        }
    }

    /// Width over height; `1.0` while the window is minimized.
    pub fn aspect(self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Drawable surface size in pixels (`logical * pixel_ratio`).
    pub fn drawable(self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).round().max(0.0) as u32,
            (self.height * self.pixel_ratio).round().max(0.0) as u32,
        )
    }

    #[inline]
    pub fn viewport(self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        !self.viewport().is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_capped_at_two() {
        assert_eq!(capped_pixel_ratio(1.0), 1.0);
        assert_eq!(capped_pixel_ratio(1.5), 1.5);
        assert_eq!(capped_pixel_ratio(2.0), 2.0);
        assert_eq!(capped_pixel_ratio(3.0), 2.0);
    }

    #[test]
    fn bogus_pixel_ratio_falls_back_to_one() {
        assert_eq!(capped_pixel_ratio(0.0), 1.0);
        assert_eq!(capped_pixel_ratio(-2.0), 1.0);
        assert_eq!(capped_pixel_ratio(f64::NAN), 1.0);
    }

    #[test]
    fn aspect_is_width_over_height() {
        let s = Sizes::new(1600.0, 900.0, 1.0);
        assert!((s.aspect() - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn aspect_of_minimized_window_is_one() {
        assert_eq!(Sizes::new(0.0, 0.0, 1.0).aspect(), 1.0);
    }

    #[test]
    fn drawable_scales_by_capped_ratio() {
        assert_eq!(Sizes::new(800.0, 600.0, 3.0).drawable(), (1600, 1200));
        assert_eq!(Sizes::new(800.0, 600.0, 1.25).drawable(), (1000, 750));
    }
}
