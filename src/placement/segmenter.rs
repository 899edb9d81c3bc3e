use bevy::prelude::*;

use crate::spline::CurveOracle;

use super::error::SettingsErrors;
use super::segment::SegmentInfo;
use super::settings::{InstantiationMethod, PlacementSettings};

/// Number of segments `settings` produces on a spline of `spline_length`.
///
/// Returns `-1` when the count cannot be computed: the method is unset, or a
/// length-based method has no positive section length. A negative result
/// used as a loop bound yields no segments.
pub fn segment_count(spline_length: f32, settings: &PlacementSettings) -> i32 {
    let max_sections = || {
        let section_length = settings.section_length;
        if section_length.is_finite() && section_length > 0.0 {
            // Float-to-int casts truncate toward zero and saturate.
            Some((spline_length.max(0.0) / section_length) as i32)
        } else {
            None
        }
    };

    match settings.method {
        InstantiationMethod::None => -1,
        InstantiationMethod::FillSpline => max_sections().unwrap_or(-1),
        InstantiationMethod::InstanceCountSplineClamp => max_sections()
            .map(|max| settings.instance_count.min(max))
            .unwrap_or(-1),
        InstantiationMethod::InstanceCountAdjustSpline => settings.instance_count,
    }
}

/// Compute every segment for `settings` without placing anything.
///
/// The curve is used as-is: no stretching is applied for
/// [`InstantiationMethod::InstanceCountAdjustSpline`].
pub fn compute_segments(
    curve: &impl CurveOracle,
    settings: &PlacementSettings,
) -> Result<Vec<SegmentInfo>, SettingsErrors> {
    settings.validate()?;
    let count = segment_count(curve.length(), settings).max(0) as usize;
    Ok((0..count)
        .map(|index| SegmentInfo::sample(curve, index, settings.section_length))
        .collect())
}

/// Creates and destroys the objects placed along a spline.
pub trait PlacementConsumer {
    /// Identifies a placed object. Use an `Option` to report "nothing placed".
    type Handle;

    /// Place one object for `segment`.
    fn generate_instance(&mut self, segment: &SegmentInfo, settings: &PlacementSettings) -> Self::Handle;

    /// Destroy an object previously returned by [`generate_instance`](Self::generate_instance).
    fn destroy_instance(&mut self, handle: Self::Handle);
}

/// Turns a curve into segments and keeps the handles of everything placed.
///
/// Each [`instantiate`](Self::instantiate) call appends to the list;
/// [`clear_instances`](Self::clear_instances) destroys and empties it.
#[derive(Debug, Clone)]
pub struct SplineSegmenter<H> {
    instances: Vec<H>,
}

impl<H> Default for SplineSegmenter<H> {
    fn default() -> Self {
        Self {
            instances: Vec::new(),
        }
    }
}

impl<H> SplineSegmenter<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles of all placed instances, in placement order.
    pub fn instances(&self) -> &[H] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Number of segments `settings` would produce on `curve` right now.
    pub fn segment_count(&self, curve: &impl CurveOracle, settings: &PlacementSettings) -> i32 {
        segment_count(curve.length(), settings)
    }

    /// Place one instance per segment, appending their handles.
    ///
    /// Nothing is placed if `settings` is invalid; every violation is logged
    /// and returned. For [`InstantiationMethod::InstanceCountAdjustSpline`]
    /// the curve is first stretched to `instance_count * section_length`.
    ///
    /// Returns the number of instances appended.
    pub fn instantiate<C>(
        &mut self,
        curve: &mut impl CurveOracle,
        settings: &PlacementSettings,
        consumer: &mut C,
    ) -> Result<usize, SettingsErrors>
    where
        C: PlacementConsumer<Handle = H>,
    {
        if let Err(errors) = settings.validate() {
            for error in &errors {
                warn!("Spline instantiation aborted: {error}");
            }
            return Err(errors);
        }

        if settings.method == InstantiationMethod::InstanceCountAdjustSpline {
            let target = settings.instance_count.max(0) as f32 * settings.section_length;
            if !curve.stretch_to_length(target) {
                debug!("Curve was not stretched to {target}; caller is responsible for its length");
            }
        }

        // Each segment is handed over as soon as it is sampled.
        let curve = &*curve;
        let count = segment_count(curve.length(), settings).max(0) as usize;
        for index in 0..count {
            let segment = SegmentInfo::sample(curve, index, settings.section_length);
            let handle = consumer.generate_instance(&segment, settings);
            self.instances.push(handle);
        }

        debug!(
            "Placed {count} instances ({}), {} total",
            settings.method.display_name(),
            self.instances.len()
        );
        Ok(count)
    }

    /// Destroy every placed instance in order and empty the list.
    pub fn clear_instances<C>(&mut self, consumer: &mut C)
    where
        C: PlacementConsumer<Handle = H>,
    {
        for handle in self.instances.drain(..) {
            consumer.destroy_instance(handle);
        }
    }
}
