use bevy::prelude::*;

use crate::spline::{CoordinateSpace, CurveOracle};

/// One arc-length interval of a spline, used to place a single instance.
///
/// Positions and tangents are in the curve's local space. Both tangents are
/// capped to the section length.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SegmentInfo {
    /// Position of this segment in generation order.
    pub index: usize,
    /// Arc length at which the segment starts.
    pub start_distance: f32,
    /// Arc length at which the segment ends.
    pub end_distance: f32,
    pub start_position: Vec3,
    pub start_tangent: Vec3,
    pub end_position: Vec3,
    pub end_tangent: Vec3,
}

impl SegmentInfo {
    /// Sample `curve` for the segment at `index`.
    pub fn sample(curve: &impl CurveOracle, index: usize, section_length: f32) -> Self {
        let (start_distance, end_distance) = segment_bounds(index, section_length);
        let space = CoordinateSpace::Local;

        Self {
            index,
            start_distance,
            end_distance,
            start_position: curve.position_at_distance(start_distance, space),
            start_tangent: clamp_tangent(curve.tangent_at_distance(start_distance, space), section_length),
            end_position: curve.position_at_distance(end_distance, space),
            end_tangent: clamp_tangent(curve.tangent_at_distance(end_distance, space), section_length),
        }
    }

    /// Straight-line direction from start to end, falling back to the start
    /// tangent when both positions coincide.
    pub fn direction(&self) -> Vec3 {
        let chord = self.end_position - self.start_position;
        if chord.length_squared() > 1e-8 {
            chord.normalize()
        } else {
            self.start_tangent.normalize_or_zero()
        }
    }
}

/// Arc-length interval `[start, end)` covered by the segment at `index`.
pub fn segment_bounds(index: usize, section_length: f32) -> (f32, f32) {
    (
        index as f32 * section_length,
        (index + 1) as f32 * section_length,
    )
}

/// Cap the magnitude of `tangent` at `max_length`, keeping its direction.
/// Shorter tangents are returned unchanged.
pub fn clamp_tangent(tangent: Vec3, max_length: f32) -> Vec3 {
    tangent.clamp_length_max(max_length.max(0.0))
}
