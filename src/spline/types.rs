use bevy::prelude::*;

/// The interpolation scheme used by a [`Spline`](super::Spline).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Default)]
pub enum SplineType {
    /// Cubic Bézier spline - 4 control points per segment, consecutive
    /// segments share their anchor point.
    #[default]
    CubicBezier,
    /// Catmull-Rom spline - passes through all interior control points.
    CatmullRom,
    /// Uniform cubic B-Spline - smooth, does not pass through control points.
    BSpline,
}

impl SplineType {
    /// Get the display name for this spline type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CubicBezier => "Cubic Bézier",
            Self::CatmullRom => "Catmull-Rom",
            Self::BSpline => "B-Spline",
        }
    }

    /// Minimum number of control points required for this spline type.
    pub fn min_points(&self) -> usize {
        4
    }

    /// Number of cubic segments described by `point_count` control points.
    pub fn segment_count(&self, point_count: usize, closed: bool) -> usize {
        if point_count < self.min_points() {
            return 0;
        }
        match self {
            Self::CubicBezier => (point_count - 1) / 3,
            Self::CatmullRom | Self::BSpline if closed => point_count,
            Self::CatmullRom | Self::BSpline => point_count - 3,
        }
    }

    /// Evaluate the position at global parameter `t` in [0, 1].
    pub fn evaluate(&self, points: &[Vec3], t: f32, closed: bool) -> Option<Vec3> {
        let (window, local_t) = self.window(points, t, closed)?;
        let w = self.weights(local_t);
        Some(combine(&window, &w))
    }

    /// Evaluate the derivative at global parameter `t` in [0, 1].
    ///
    /// The derivative is taken with respect to the local segment parameter,
    /// so its magnitude is on the order of the segment's length.
    pub fn evaluate_tangent(&self, points: &[Vec3], t: f32, closed: bool) -> Option<Vec3> {
        let (window, local_t) = self.window(points, t, closed)?;
        let w = self.derivative_weights(local_t);
        Some(combine(&window, &w))
    }

    /// Select the 4 control points driving the segment containing `t`.
    fn window(&self, points: &[Vec3], t: f32, closed: bool) -> Option<([Vec3; 4], f32)> {
        let segments = self.segment_count(points.len(), closed);
        if segments == 0 {
            return None;
        }

        let t_scaled = t.clamp(0.0, 1.0) * segments as f32;
        let segment = (t_scaled.floor() as usize).min(segments - 1);
        let local_t = t_scaled - segment as f32;

        let n = points.len();
        let index = |offset: usize| match self {
            Self::CubicBezier => segment * 3 + offset,
            // Catmull-Rom wraps so the curve runs through point `segment`.
            Self::CatmullRom if closed => (segment + n - 1 + offset) % n,
            Self::BSpline if closed => (segment + offset) % n,
            Self::CatmullRom | Self::BSpline => segment + offset,
        };

        let window = [
            points[index(0)],
            points[index(1)],
            points[index(2)],
            points[index(3)],
        ];
        Some((window, local_t))
    }

    fn weights(&self, t: f32) -> [f32; 4] {
        let t2 = t * t;
        let t3 = t2 * t;
        match self {
            Self::CubicBezier => {
                let mt = 1.0 - t;
                [mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t2, t3]
            }
            Self::CatmullRom => [
                0.5 * (-t + 2.0 * t2 - t3),
                0.5 * (2.0 - 5.0 * t2 + 3.0 * t3),
                0.5 * (t + 4.0 * t2 - 3.0 * t3),
                0.5 * (-t2 + t3),
            ],
            Self::BSpline => [
                (1.0 - 3.0 * t + 3.0 * t2 - t3) / 6.0,
                (4.0 - 6.0 * t2 + 3.0 * t3) / 6.0,
                (1.0 + 3.0 * t + 3.0 * t2 - 3.0 * t3) / 6.0,
                t3 / 6.0,
            ],
        }
    }

    fn derivative_weights(&self, t: f32) -> [f32; 4] {
        let t2 = t * t;
        match self {
            Self::CubicBezier => {
                let mt = 1.0 - t;
                [
                    -3.0 * mt * mt,
                    3.0 * mt * mt - 6.0 * mt * t,
                    6.0 * mt * t - 3.0 * t2,
                    3.0 * t2,
                ]
            }
            Self::CatmullRom => [
                0.5 * (-1.0 + 4.0 * t - 3.0 * t2),
                0.5 * (-10.0 * t + 9.0 * t2),
                0.5 * (1.0 + 8.0 * t - 9.0 * t2),
                0.5 * (-2.0 * t + 3.0 * t2),
            ],
            Self::BSpline => [
                (-3.0 + 6.0 * t - 3.0 * t2) / 6.0,
                (-12.0 * t + 9.0 * t2) / 6.0,
                (3.0 + 6.0 * t - 9.0 * t2) / 6.0,
                3.0 * t2 / 6.0,
            ],
        }
    }
}

fn combine(points: &[Vec3; 4], weights: &[f32; 4]) -> Vec3 {
    points
        .iter()
        .zip(weights)
        .fold(Vec3::ZERO, |acc, (p, w)| acc + *p * *w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_bezier_hits_anchors() {
        let points = line();
        let start = SplineType::CubicBezier.evaluate(&points, 0.0, false).unwrap();
        let end = SplineType::CubicBezier.evaluate(&points, 1.0, false).unwrap();
        assert!((start - Vec3::ZERO).length() < 1e-5);
        assert!((end - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_catmull_rom_passes_interior_points() {
        let points = line();
        let start = SplineType::CatmullRom.evaluate(&points, 0.0, false).unwrap();
        let end = SplineType::CatmullRom.evaluate(&points, 1.0, false).unwrap();
        assert!((start - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
        assert!((end - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_tangent_points_along_line() {
        let points = line();
        for spline_type in [SplineType::CubicBezier, SplineType::CatmullRom, SplineType::BSpline] {
            let tangent = spline_type.evaluate_tangent(&points, 0.5, false).unwrap();
            assert!(tangent.x > 0.0, "{} tangent {tangent:?}", spline_type.name());
            assert!(tangent.y.abs() < 1e-5 && tangent.z.abs() < 1e-5);
        }
    }

    #[test]
    fn test_too_few_points() {
        let points = vec![Vec3::ZERO, Vec3::X];
        assert!(SplineType::CatmullRom.evaluate(&points, 0.5, false).is_none());
        assert_eq!(SplineType::BSpline.segment_count(points.len(), true), 0);
    }
}
