mod components;
mod mesh_placement;
mod systems;

pub use components::*;
pub use mesh_placement::MeshPlacement;

use bevy::prelude::*;

use crate::placement::{InstanceMobility, InstantiationMethod, OrientationAxis, PlacementSettings};
use crate::spline::SplinePlugin;

/// Plugin for placing copies of a template entity along splines.
///
/// Instances are only placed or cleared on request, through the
/// [`InstantiateSpline`] and [`ClearSplineInstances`] messages. Repeated
/// instantiate requests append; clear first for a clean rebuild.
///
/// # Usage
///
/// ```ignore
/// use bevy::prelude::*;
/// use bevy_spline_instances::prelude::*;
///
/// fn setup(mut commands: Commands, asset_server: Res<AssetServer>) {
///     // Template entity (this will be hidden)
///     let post = commands.spawn((
///         Mesh3d(asset_server.load("fence_post.glb#Mesh0/Primitive0")),
///         InstanceSource,
///     )).id();
///
///     commands.spawn((
///         Spline::new(SplineType::CatmullRom, vec![/* points */]),
///         SplineInstantiator::new(
///             post,
///             PlacementSettings::new(InstantiationMethod::FillSpline, 2.0),
///         ),
///     ));
/// }
///
/// fn build_fence(fences: Query<Entity, With<SplineInstantiator>>, mut requests: MessageWriter<InstantiateSpline>) {
///     for entity in &fences {
///         requests.write(InstantiateSpline { entity });
///     }
/// }
/// ```
pub struct SplineInstancesPlugin;

impl Plugin for SplineInstancesPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<SplinePlugin>() {
            app.add_plugins(SplinePlugin);
        }

        app.register_type::<OrientationAxis>()
            .register_type::<InstantiationMethod>()
            .register_type::<InstanceMobility>()
            .register_type::<PlacementSettings>()
            .register_type::<SplineInstantiator>()
            .register_type::<InstanceSource>()
            .register_type::<SplineInstance>()
            .register_type::<SplineInstancingConfig>()
            .init_resource::<SplineInstancingConfig>()
            .add_message::<InstantiateSpline>()
            .add_message::<ClearSplineInstances>()
            .add_systems(
                Update,
                (
                    systems::hide_source_entities,
                    systems::handle_clear_requests,
                    systems::handle_instantiate_requests,
                    systems::cleanup_removed_instantiators,
                )
                    .chain(),
            );
    }
}
