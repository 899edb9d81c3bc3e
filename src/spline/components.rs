use bevy::prelude::*;

use super::types::SplineType;

/// A 3D spline component. Control points are expressed in the entity's
/// local space.
#[derive(Component, Debug, Clone, Reflect, Default)]
#[reflect(Component)]
pub struct Spline {
    /// The type of spline interpolation.
    pub spline_type: SplineType,
    /// Control points defining the spline shape.
    pub control_points: Vec<Vec3>,
    /// Whether the spline forms a closed loop.
    pub closed: bool,
}

impl Spline {
    /// Create a new open spline with the given type and control points.
    pub fn new(spline_type: SplineType, control_points: Vec<Vec3>) -> Self {
        Self {
            spline_type,
            control_points,
            closed: false,
        }
    }

    /// Create a new closed spline.
    pub fn closed(spline_type: SplineType, control_points: Vec<Vec3>) -> Self {
        Self {
            spline_type,
            control_points,
            closed: true,
        }
    }

    /// Evaluate the spline at parameter t (0.0 to 1.0).
    pub fn evaluate(&self, t: f32) -> Option<Vec3> {
        self.spline_type
            .evaluate(&self.control_points, t, self.closed)
    }

    /// Evaluate the tangent at parameter t.
    pub fn evaluate_tangent(&self, t: f32) -> Option<Vec3> {
        self.spline_type
            .evaluate_tangent(&self.control_points, t, self.closed)
    }

    /// Check if the spline has enough points to be valid.
    pub fn is_valid(&self) -> bool {
        self.control_points.len() >= self.spline_type.min_points()
    }

    /// Uniformly scale all control points about the first one.
    ///
    /// Arc length scales by exactly `factor`.
    pub fn scale_about_start(&mut self, factor: f32) {
        let Some(&origin) = self.control_points.first() else {
            return;
        };
        for point in &mut self.control_points {
            *point = origin + (*point - origin) * factor;
        }
    }
}
