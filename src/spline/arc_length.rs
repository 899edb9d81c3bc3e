//! Arc length parameterization for splines.
//!
//! Converts between arc length and t-parameter space so that placement can
//! be driven by distance along the curve.

use bevy::prelude::*;

use super::Spline;

/// Default number of samples for arc length calculations.
pub const DEFAULT_ARC_LENGTH_SAMPLES: usize = 256;

/// Arc length lookup table for length-to-t conversion.
///
/// The table is built by sampling the spline at regular t intervals and
/// accumulating the distance between samples.
#[derive(Debug, Clone)]
pub struct ArcLengthTable {
    /// (t, cumulative_length) pairs, always starting with (0.0, 0.0).
    samples: Vec<(f32, f32)>,
}

impl ArcLengthTable {
    /// Compute an arc length table for a spline using `samples` intervals.
    pub fn compute(spline: &Spline, samples: usize) -> Self {
        let samples = samples.max(1);
        let mut table = Vec::with_capacity(samples + 1);
        let mut cumulative_length = 0.0;
        let mut prev_point = spline.evaluate(0.0).unwrap_or(Vec3::ZERO);

        table.push((0.0, 0.0));

        for i in 1..=samples {
            let t = i as f32 / samples as f32;
            let point = spline.evaluate(t).unwrap_or(prev_point);
            cumulative_length += (point - prev_point).length();
            table.push((t, cumulative_length));
            prev_point = point;
        }

        Self { samples: table }
    }

    /// Get the total arc length of the spline.
    pub fn total_length(&self) -> f32 {
        self.samples.last().map(|(_, l)| *l).unwrap_or(0.0)
    }

    /// Find the t parameter for a given arc length.
    ///
    /// The length is clamped to the table range, so the result is always
    /// in [0, 1].
    pub fn length_to_t(&self, target_length: f32) -> f32 {
        let total_length = self.total_length();
        if total_length <= 0.0 {
            return 0.0;
        }

        let target = target_length.clamp(0.0, total_length);

        let idx = self
            .samples
            .binary_search_by(|(_, l)| l.partial_cmp(&target).unwrap_or(std::cmp::Ordering::Equal))
            .unwrap_or_else(|i| i.saturating_sub(1));

        if idx >= self.samples.len() - 1 {
            return 1.0;
        }

        let (t0, l0) = self.samples[idx];
        let (t1, l1) = self.samples[idx + 1];

        if (l1 - l0).abs() < 1e-6 {
            return t0;
        }

        let alpha = (target - l0) / (l1 - l0);
        t0 + alpha * (t1 - t0)
    }
}
