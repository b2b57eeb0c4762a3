//! Pointer input
//!
//! Pointer moves are only honored inside the play field's on-screen rect.
//! The pointer's horizontal offset within the field, scaled from the
//! on-screen rect into field pixels, becomes the paddle center unless that
//! would put a paddle edge on or past a field edge.

use glam::Vec2;

use crate::consts::*;
use crate::sim::Paddle;

/// Where the play field sits on the host surface (page/window coordinates)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRegion {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Default for FieldRegion {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            size: Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
        }
    }
}

impl FieldRegion {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let local = point - self.origin;
        local.x >= 0.0 && local.y >= 0.0 && local.x <= self.size.x && local.y <= self.size.y
    }

    /// Point relative to the field's top-left corner
    pub fn to_local(&self, point: Vec2) -> Vec2 {
        point - self.origin
    }
}

/// Translates pointer positions into paddle targets
#[derive(Debug, Clone)]
pub struct PointerInput {
    region: FieldRegion,
    paddle_width: f32,
}

impl Default for PointerInput {
    fn default() -> Self {
        Self::new(FieldRegion::default())
    }
}

impl PointerInput {
    pub fn new(region: FieldRegion) -> Self {
        Self {
            region,
            paddle_width: PADDLE_WIDTH,
        }
    }

    /// Re-anchor after the host moved or resized the field
    pub fn set_region(&mut self, region: FieldRegion) {
        self.region = region;
    }

    /// Paddle center for a pointer at `pointer`, or `None` if the move is ignored
    pub fn paddle_target(&self, pointer: Vec2) -> Option<f32> {
        if !self.region.contains(pointer) {
            return None;
        }
        if self.region.size.x <= 0.0 {
            return None;
        }
        let x = self.region.to_local(pointer).x * FIELD_WIDTH / self.region.size.x;
        if !Paddle::fits_at(x, self.paddle_width, FIELD_WIDTH) {
            log::trace!("Pointer x {} would push paddle out of field", x);
            return None;
        }
        Some(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_inside_field() {
        let input = PointerInput::default();
        assert_eq!(input.paddle_target(Vec2::new(100.0, 400.0)), Some(100.0));
    }

    #[test]
    fn test_target_uses_field_offset() {
        let input = PointerInput::new(FieldRegion::new(
            Vec2::new(200.0, 50.0),
            Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
        ));
        assert_eq!(input.paddle_target(Vec2::new(300.0, 100.0)), Some(100.0));
    }

    #[test]
    fn test_paddle_edge_rejected() {
        let input = PointerInput::default();
        // Half width is 30: x = 30 puts the left edge on 0
        assert_eq!(input.paddle_target(Vec2::new(30.0, 10.0)), None);
        assert_eq!(input.paddle_target(Vec2::new(340.0, 10.0)), None);
        assert_eq!(input.paddle_target(Vec2::new(31.0, 10.0)), Some(31.0));
        assert_eq!(input.paddle_target(Vec2::new(339.0, 10.0)), Some(339.0));
    }

    #[test]
    fn test_scaled_region_maps_to_field() {
        // Field drawn at twice its size
        let input = PointerInput::new(FieldRegion::new(
            Vec2::new(100.0, 0.0),
            Vec2::new(FIELD_WIDTH * 2.0, FIELD_HEIGHT * 2.0),
        ));
        assert_eq!(input.paddle_target(Vec2::new(300.0, 10.0)), Some(100.0));
        // 700 on screen is 350 in the field: right paddle edge past 340
        assert_eq!(input.paddle_target(Vec2::new(800.0, 10.0)), None);
        assert_eq!(input.paddle_target(Vec2::new(778.0, 10.0)), Some(339.0));
    }

    #[test]
    fn test_collapsed_region_ignored() {
        let input = PointerInput::new(FieldRegion::new(Vec2::ZERO, Vec2::ZERO));
        assert_eq!(input.paddle_target(Vec2::ZERO), None);
    }

    #[test]
    fn test_pointer_outside_region_ignored() {
        let input = PointerInput::new(FieldRegion::new(
            Vec2::new(200.0, 50.0),
            Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
        ));
        // Left of the field
        assert_eq!(input.paddle_target(Vec2::new(150.0, 100.0)), None);
        // Below the field, horizontally fine
        assert_eq!(input.paddle_target(Vec2::new(300.0, 600.0)), None);
    }
}
