/// Window size in logical pixels, the unit pixel-space lessons draw in.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height; 1 when either side is zero or not finite.
    pub fn aspect(self) -> f32 {
        let ratio = self.width / self.height;
        if self.width > 0.0 && ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_falls_back_to_square() {
        assert_eq!(Viewport::new(800.0, 400.0).aspect(), 2.0);
        assert_eq!(Viewport::new(0.0, 10.0).aspect(), 1.0);
        assert_eq!(Viewport::new(10.0, 0.0).aspect(), 1.0);
        assert_eq!(Viewport::new(f32::NAN, 10.0).aspect(), 1.0);
    }
}
