//! World-to-screen coordinate mapping.
//!
//! The whole world rectangle is stretched over the render surface. Screen
//! origin is top-left with Y increasing downward, world Y increases upward,
//! so the Y axis is flipped.

use glam::Vec2;

use crate::engine::WorldBounds;

/// Maps simulation-space points and lengths onto the render surface.
///
/// Built fresh every frame from the engine's live bounds; never cache one
/// across frames.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    bounds: WorldBounds,
    screen: Vec2,
}

impl CoordinateMapper {
    pub fn new(bounds: WorldBounds, screen_size: Vec2) -> Self {
        Self {
            bounds,
            screen: screen_size,
        }
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen
    }

    /// Screen X for a world X. A degenerate world width maps to the centre.
    pub fn map_x(&self, x: f32) -> f32 {
        let width = self.bounds.width();
        if !is_positive(width) {
            return self.screen.x / 2.0;
        }
        let t = (x - self.bounds.x_min) / width;
        t * self.screen.x
    }

    /// Screen Y for a world Y (flipped). A degenerate world height maps to
    /// the centre.
    pub fn map_y(&self, y: f32) -> f32 {
        let height = self.bounds.height();
        if !is_positive(height) {
            return self.screen.y / 2.0;
        }
        let t = (y - self.bounds.y_min) / height;
        (1.0 - t) * self.screen.y
    }

    /// Convert world coordinates to screen coordinates.
    pub fn world_to_screen(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(self.map_x(x), self.map_y(y))
    }

    /// Uniform world-to-screen scale for lengths.
    ///
    /// The smaller of the two axis scales, so circles stay circles and fit
    /// on both axes. Degenerate bounds give 1.0.
    pub fn scale(&self) -> f32 {
        let width = self.bounds.width();
        let height = self.bounds.height();
        if !is_positive(width) || !is_positive(height) {
            return 1.0;
        }
        let sx = self.screen.x / width;
        let sy = self.screen.y / height;
        sx.min(sy)
    }

    /// Screen length of a world length (e.g. a patch radius).
    pub fn scale_length(&self, length: f32) -> f32 {
        length * self.scale()
    }
}

/// False for zero, negatives and NaN.
fn is_positive(v: f32) -> bool {
    v > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square_world() -> CoordinateMapper {
        CoordinateMapper::new(
            WorldBounds::new(0.0, 100.0, 0.0, 100.0),
            Vec2::new(800.0, 600.0),
        )
    }

    #[test]
    fn test_corners_flip_y() {
        let mapper = square_world();
        assert_eq!(mapper.world_to_screen(0.0, 0.0), Vec2::new(0.0, 600.0));
        assert_eq!(mapper.world_to_screen(100.0, 100.0), Vec2::new(800.0, 0.0));
    }

    #[test]
    fn test_world_center_maps_to_screen_center() {
        let mapper = square_world();
        assert_eq!(mapper.world_to_screen(50.0, 50.0), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_offset_bounds() {
        let mapper = CoordinateMapper::new(
            WorldBounds::new(-100.0, 100.0, 50.0, 150.0),
            Vec2::new(400.0, 200.0),
        );
        assert_eq!(mapper.world_to_screen(-100.0, 150.0), Vec2::new(0.0, 0.0));
        assert_eq!(mapper.world_to_screen(0.0, 100.0), Vec2::new(200.0, 100.0));
    }

    #[test]
    fn test_degenerate_width_maps_to_center() {
        let mapper = CoordinateMapper::new(
            WorldBounds::new(10.0, 10.0, 0.0, 100.0),
            Vec2::new(800.0, 600.0),
        );
        assert_eq!(mapper.map_x(-5.0), 400.0);
        assert_eq!(mapper.map_x(10.0), 400.0);
        assert_eq!(mapper.map_x(1e9), 400.0);
        // Y is unaffected
        assert_eq!(mapper.map_y(0.0), 600.0);
    }

    #[test]
    fn test_degenerate_height_maps_to_center() {
        let mapper = CoordinateMapper::new(
            WorldBounds::new(0.0, 100.0, 5.0, -5.0),
            Vec2::new(800.0, 600.0),
        );
        assert_eq!(mapper.map_y(3.0), 300.0);
        assert_eq!(mapper.scale(), 1.0);
    }

    #[test]
    fn test_nan_bounds_are_degenerate() {
        let mapper = CoordinateMapper::new(
            WorldBounds::new(0.0, f32::NAN, 0.0, 100.0),
            Vec2::new(800.0, 600.0),
        );
        assert_eq!(mapper.map_x(1.0), 400.0);
        assert_eq!(mapper.scale(), 1.0);
    }

    #[test]
    fn test_scale_uses_smaller_axis() {
        let mapper = square_world();
        // 800/100 = 8, 600/100 = 6
        assert_eq!(mapper.scale(), 6.0);
        assert_eq!(mapper.scale_length(10.0), 60.0);
    }

    proptest! {
        #[test]
        fn prop_points_inside_world_land_on_screen(
            fx in 0.0f32..=1.0,
            fy in 0.0f32..=1.0,
            w in 1.0f32..5000.0,
            h in 1.0f32..5000.0,
        ) {
            let mapper = CoordinateMapper::new(
                WorldBounds::new(-w / 2.0, w / 2.0, 0.0, h),
                Vec2::new(1024.0, 768.0),
            );
            let p = mapper.world_to_screen(-w / 2.0 + fx * w, fy * h);
            prop_assert!(p.x >= -0.01 && p.x <= 1024.01);
            prop_assert!(p.y >= -0.01 && p.y <= 768.01);
        }

        #[test]
        fn prop_higher_world_y_is_higher_on_screen(
            y1 in 0.0f32..100.0,
            dy in 0.5f32..50.0,
        ) {
            let mapper = square_world();
            prop_assert!(mapper.map_y(y1 + dy) < mapper.map_y(y1));
        }
    }
}
