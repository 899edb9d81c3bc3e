//! Spline segmentation: turning a curve and [`PlacementSettings`] into a
//! sequence of contiguous [`SegmentInfo`]s, one per placed instance.
//!
//! Everything here is independent of the ECS. The curve is any
//! [`CurveOracle`](crate::spline::CurveOracle) and instances are created and
//! destroyed through a [`PlacementConsumer`].
//!
//! # Segment count
//!
//! With `max = floor(length / section_length)`:
//!
//! - [`InstantiationMethod::FillSpline`]: `max`. A trailing remainder shorter
//!   than one section is left uncovered.
//! - [`InstantiationMethod::InstanceCountSplineClamp`]: `min(instance_count, max)`.
//! - [`InstantiationMethod::InstanceCountAdjustSpline`]: `instance_count`. The
//!   curve is stretched to `instance_count * section_length` first if it
//!   supports it.
//! - [`InstantiationMethod::None`]: `-1`.
//!
//! Segment `i` covers `[i * section_length, (i + 1) * section_length]`.

mod error;
mod segment;
mod segmenter;
mod settings;

pub use error::*;
pub use segment::*;
pub use segmenter::*;
pub use settings::*;
