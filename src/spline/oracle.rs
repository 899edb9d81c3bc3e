//! Distance-based curve queries.
//!
//! Placement never works in t-parameter space: it asks a [`CurveOracle`] for
//! positions and tangents at arc-length distances. [`SplineCurve`] adapts a
//! [`Spline`] to that interface.

use bevy::math::Affine3A;
use bevy::prelude::*;

use super::{ArcLengthTable, Spline, DEFAULT_ARC_LENGTH_SAMPLES};

/// The space in which curve queries are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateSpace {
    /// The curve's own space (control point coordinates).
    #[default]
    Local,
    /// World space, through the curve's transform.
    World,
}

/// A curve that can be queried by distance along its arc length.
pub trait CurveOracle {
    /// Total arc length of the curve.
    fn length(&self) -> f32;

    /// Position at `distance` along the curve.
    fn position_at_distance(&self, distance: f32, space: CoordinateSpace) -> Vec3;

    /// Tangent at `distance` along the curve. Not normalized.
    fn tangent_at_distance(&self, distance: f32, space: CoordinateSpace) -> Vec3;

    /// Reshape the curve so its arc length becomes `length`.
    ///
    /// Returns `false` when the curve cannot be reshaped, in which case the
    /// caller is responsible for sizing the curve.
    fn stretch_to_length(&mut self, _length: f32) -> bool {
        false
    }
}

/// A [`Spline`] paired with its arc length table and world transform.
#[derive(Debug, Clone)]
pub struct SplineCurve {
    spline: Spline,
    table: ArcLengthTable,
    transform: Affine3A,
    samples: usize,
}

impl SplineCurve {
    /// Wrap a spline using the default sample count and an identity transform.
    pub fn new(spline: Spline) -> Self {
        Self::with_samples(spline, DEFAULT_ARC_LENGTH_SAMPLES)
    }

    /// Wrap a spline sampling its arc length with `samples` intervals.
    pub fn with_samples(spline: Spline, samples: usize) -> Self {
        let table = ArcLengthTable::compute(&spline, samples);
        Self {
            spline,
            table,
            transform: Affine3A::IDENTITY,
            samples,
        }
    }

    /// Set the local-to-world transform used for [`CoordinateSpace::World`] queries.
    pub fn with_transform(mut self, transform: &GlobalTransform) -> Self {
        self.transform = transform.affine();
        self
    }

    /// The wrapped spline, including any stretching applied.
    pub fn spline(&self) -> &Spline {
        &self.spline
    }

    /// Unwrap the spline, including any stretching applied.
    pub fn into_spline(self) -> Spline {
        self.spline
    }

    fn t_at(&self, distance: f32) -> f32 {
        self.table.length_to_t(distance)
    }
}

impl CurveOracle for SplineCurve {
    fn length(&self) -> f32 {
        self.table.total_length()
    }

    fn position_at_distance(&self, distance: f32, space: CoordinateSpace) -> Vec3 {
        let local = self.spline.evaluate(self.t_at(distance)).unwrap_or(Vec3::ZERO);
        match space {
            CoordinateSpace::Local => local,
            CoordinateSpace::World => self.transform.transform_point3(local),
        }
    }

    fn tangent_at_distance(&self, distance: f32, space: CoordinateSpace) -> Vec3 {
        let local = self
            .spline
            .evaluate_tangent(self.t_at(distance))
            .unwrap_or(Vec3::ZERO);
        match space {
            CoordinateSpace::Local => local,
            CoordinateSpace::World => self.transform.transform_vector3(local),
        }
    }

    fn stretch_to_length(&mut self, length: f32) -> bool {
        let current = self.length();
        if current <= f32::EPSILON || !length.is_finite() || length <= 0.0 {
            return false;
        }

        self.spline.scale_about_start(length / current);
        self.table = ArcLengthTable::compute(&self.spline, self.samples);
        true
    }
}
