//! # bevy_spline_instances
//!
//! A Bevy plugin for placing object instances along 3D splines: fence
//! posts, pipe segments, guardrails.
//!
//! ## Features
//!
//! - Three placement methods: fill the spline, a clamped instance count, or
//!   an exact instance count with the spline resized to fit
//! - Contiguous segments with start/end positions and tangents
//! - Configurable forward and up axes for instance orientation
//! - Optional snapping of instances onto terrain (avian3d)
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_spline_instances::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(SplineInstancesPlugin)
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
//!     let post = commands
//!         .spawn((Mesh3d(meshes.add(Cuboid::new(0.2, 1.0, 0.2))), InstanceSource))
//!         .id();
//!
//!     let fence = commands
//!         .spawn((
//!             Spline::new(
//!                 SplineType::CatmullRom,
//!                 vec![
//!                     Vec3::new(-6.0, 0.0, 0.0),
//!                     Vec3::new(-3.0, 0.0, 2.0),
//!                     Vec3::new(3.0, 0.0, -2.0),
//!                     Vec3::new(6.0, 0.0, 0.0),
//!                 ],
//!             ),
//!             SplineInstantiator::new(
//!                 post,
//!                 PlacementSettings::new(InstantiationMethod::FillSpline, 1.0),
//!             ),
//!         ))
//!         .id();
//!
//!     commands.write_message(InstantiateSpline { entity: fence });
//! }
//! ```
//!
//! ## Plugins
//!
//! - [`SplinePlugin`]: Spline type registration (added automatically)
//! - [`SplineInstancesPlugin`]: Placement along splines
//! - [`SurfaceSnapPlugin`]: Snap placed instances onto colliders (optional)
//!
//! The segmentation itself lives in [`placement`] and can be used without
//! the ECS through [`SplineSegmenter`](placement::SplineSegmenter).

pub mod geometry;
pub mod instantiator;
pub mod placement;
pub mod spline;
pub mod surface;

pub use instantiator::SplineInstancesPlugin;
pub use spline::SplinePlugin;
pub use surface::SurfaceSnapPlugin;

/// Convenient re-exports of commonly used types.
pub mod prelude {
    pub use crate::geometry::CoordinateFrame;
    pub use crate::instantiator::{
        ClearSplineInstances, InstanceList, InstanceSource, InstantiateSpline, MeshPlacement,
        SplineInstance, SplineInstancesPlugin, SplineInstancingConfig, SplineInstantiator,
    };
    pub use crate::placement::{
        compute_segments, segment_count, valid_up_axis_options, InstanceMobility,
        InstantiationMethod, OrientationAxis, PlacementConsumer, PlacementSettings, SegmentInfo,
        SettingsError, SettingsErrors, SplineSegmenter,
    };
    pub use crate::spline::{
        CoordinateSpace, CurveOracle, Spline, SplineCurve, SplinePlugin, SplineType,
    };
    pub use crate::surface::{SurfaceSnap, SurfaceSnapPlugin};
}
