use bevy::prelude::*;

use crate::placement::InstantiationMethod;
use crate::spline::{Spline, SplineCurve};
use crate::surface::SurfaceSnap;

use super::{
    ClearSplineInstances, InstanceList, InstanceSource, InstantiateSpline, MeshPlacement,
    SplineInstance, SplineInstancingConfig, SplineInstantiator,
};

/// Hide entities marked as instance templates.
pub fn hide_source_entities(mut sources: Query<&mut Visibility, Added<InstanceSource>>) {
    for mut visibility in &mut sources {
        *visibility = Visibility::Hidden;
    }
}

/// Place instances for every [`InstantiateSpline`] request.
#[allow(clippy::type_complexity)]
pub fn handle_instantiate_requests(
    mut commands: Commands,
    mut requests: MessageReader<InstantiateSpline>,
    config: Res<SplineInstancingConfig>,
    mut instantiators: Query<(
        &SplineInstantiator,
        &mut Spline,
        &mut InstanceList,
        Option<&GlobalTransform>,
        Option<&SurfaceSnap>,
    )>,
    sources: Query<(Option<&Mesh3d>, Option<&MeshMaterial3d<StandardMaterial>>)>,
) {
    for request in requests.read() {
        let Ok((instantiator, mut spline, mut list, transform, snap)) =
            instantiators.get_mut(request.entity)
        else {
            warn!(
                "Cannot instantiate along {}: it needs both Spline and SplineInstantiator",
                request.entity
            );
            continue;
        };

        if !spline.is_valid() {
            warn!(
                "Cannot instantiate along {}: {} needs at least {} control points",
                request.entity,
                spline.spline_type.name(),
                spline.spline_type.min_points()
            );
            continue;
        }

        let (mesh, material) = sources
            .get(instantiator.source)
            .map(|(mesh, material)| (mesh.cloned(), material.cloned()))
            .unwrap_or_default();
        let spline_transform = transform.copied().unwrap_or_default();

        let mut curve = SplineCurve::with_samples((*spline).clone(), config.arc_length_samples)
            .with_transform(&spline_transform);
        let mut placement = MeshPlacement::new(&mut commands, request.entity)
            .with_source(mesh, material)
            .with_frame(spline_transform, instantiator.reference_up)
            .with_surface_snap(snap.is_some_and(|snap| snap.enabled));

        let Ok(placed) = list
            .segmenter
            .instantiate(&mut curve, &instantiator.settings, &mut placement)
        else {
            continue;
        };

        if instantiator.settings.method == InstantiationMethod::InstanceCountAdjustSpline {
            spline.control_points = curve.into_spline().control_points;
        }

        debug!(
            "Instantiated {placed} instances along {} ({} total)",
            request.entity,
            list.len()
        );
    }
}

/// Despawn instances for every [`ClearSplineInstances`] request.
pub fn handle_clear_requests(
    mut commands: Commands,
    mut requests: MessageReader<ClearSplineInstances>,
    mut lists: Query<&mut InstanceList>,
) {
    for request in requests.read() {
        let Ok(mut list) = lists.get_mut(request.entity) else {
            continue;
        };
        let mut placement = MeshPlacement::new(&mut commands, request.entity);
        list.segmenter.clear_instances(&mut placement);
    }
}

/// Despawn instances when their [`SplineInstantiator`] is removed.
pub fn cleanup_removed_instantiators(
    mut commands: Commands,
    mut removed: RemovedComponents<SplineInstantiator>,
    mut lists: Query<&mut InstanceList>,
    instances: Query<(Entity, &SplineInstance)>,
) {
    for removed_entity in removed.read() {
        if let Ok(mut list) = lists.get_mut(removed_entity) {
            // Entity still alive, its list knows every instance.
            let mut placement = MeshPlacement::new(&mut commands, removed_entity);
            list.segmenter.clear_instances(&mut placement);
            continue;
        }

        for (entity, instance) in &instances {
            if instance.instantiator == removed_entity {
                commands.entity(entity).despawn();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instantiator::SplineInstancesPlugin;
    use crate::placement::{InstantiationMethod, OrientationAxis, PlacementSettings};
    use crate::spline::SplineType;

    fn straight_spline(length: f32) -> Spline {
        Spline::new(
            SplineType::CubicBezier,
            (0..4).map(|i| Vec3::X * length * i as f32 / 3.0).collect(),
        )
    }

    fn setup(settings: PlacementSettings) -> (App, Entity) {
        let mut app = App::new();
        app.add_plugins(SplineInstancesPlugin);

        let source = app
            .world_mut()
            .spawn((Mesh3d(Handle::default()), InstanceSource))
            .id();
        let spline = app
            .world_mut()
            .spawn((
                straight_spline(9.0),
                SplineInstantiator::new(source, settings),
                Transform::from_xyz(0.0, 0.0, 5.0),
                GlobalTransform::from_xyz(0.0, 0.0, 5.0),
            ))
            .id();

        (app, spline)
    }

    fn instance_count(app: &mut App) -> usize {
        app.world_mut()
            .query::<&SplineInstance>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn test_instantiate_and_clear() {
        let (mut app, spline) = setup(PlacementSettings::new(InstantiationMethod::FillSpline, 2.0));

        app.world_mut().write_message(InstantiateSpline { entity: spline });
        app.update();

        assert_eq!(instance_count(&mut app), 4);
        let list = app.world().get::<InstanceList>(spline).unwrap();
        assert_eq!(list.len(), 4);
        assert!(list.entities().iter().all(Option::is_some));

        app.world_mut().write_message(ClearSplineInstances { entity: spline });
        app.update();

        assert_eq!(instance_count(&mut app), 0);
        assert!(app.world().get::<InstanceList>(spline).unwrap().is_empty());
    }

    #[test]
    fn test_repeated_requests_append() {
        let (mut app, spline) = setup(PlacementSettings::new(InstantiationMethod::FillSpline, 4.0));

        app.world_mut().write_message(InstantiateSpline { entity: spline });
        app.update();
        app.world_mut().write_message(InstantiateSpline { entity: spline });
        app.update();

        assert_eq!(instance_count(&mut app), 4);
    }

    #[test]
    fn test_invalid_settings_spawn_nothing() {
        let settings = PlacementSettings::default().with_axes(OrientationAxis::None, OrientationAxis::Z);
        let (mut app, spline) = setup(settings);

        app.world_mut().write_message(InstantiateSpline { entity: spline });
        app.update();

        assert_eq!(instance_count(&mut app), 0);
        assert!(app.world().get::<InstanceList>(spline).unwrap().is_empty());
    }

    #[test]
    fn test_instances_are_placed_in_world_space() {
        let (mut app, spline) = setup(PlacementSettings::new(InstantiationMethod::FillSpline, 4.0));

        app.world_mut().write_message(InstantiateSpline { entity: spline });
        app.update();

        let mut placed: Vec<(usize, Vec3)> = app
            .world_mut()
            .query::<(&SplineInstance, &Transform)>()
            .iter(app.world())
            .map(|(instance, transform)| (instance.index, transform.translation))
            .collect();
        placed.sort_by_key(|(index, _)| *index);

        assert!((placed[0].1 - Vec3::new(0.0, 0.0, 5.0)).length() < 0.05);
        assert!((placed[1].1 - Vec3::new(4.0, 0.0, 5.0)).length() < 0.05);

        let mut up_axes = app.world_mut().query::<&SplineInstance>();
        assert!(up_axes.iter(app.world()).all(|instance| instance.up_axis == Vec3::Z));
    }

    #[test]
    fn test_adjust_spline_writes_back_control_points() {
        let settings = PlacementSettings::new(InstantiationMethod::InstanceCountAdjustSpline, 2.0)
            .with_instance_count(6);
        let (mut app, spline) = setup(settings);

        app.world_mut().write_message(InstantiateSpline { entity: spline });
        app.update();

        assert_eq!(instance_count(&mut app), 6);
        let last = *app.world().get::<Spline>(spline).unwrap().control_points.last().unwrap();
        assert!((last - Vec3::new(12.0, 0.0, 0.0)).length() < 0.05);
    }

    #[test]
    fn test_source_without_mesh_records_empty_handles() {
        let mut app = App::new();
        app.add_plugins(SplineInstancesPlugin);

        let source = app.world_mut().spawn(InstanceSource).id();
        let spline = app
            .world_mut()
            .spawn((
                straight_spline(9.0),
                SplineInstantiator::new(source, PlacementSettings::new(InstantiationMethod::FillSpline, 4.0)),
            ))
            .id();

        app.world_mut().write_message(InstantiateSpline { entity: spline });
        app.update();

        let list = app.world().get::<InstanceList>(spline).unwrap();
        assert_eq!(list.entities(), &[None, None]);
        assert_eq!(instance_count(&mut app), 0);
    }

    #[test]
    fn test_removing_instantiator_despawns_instances() {
        let (mut app, spline) = setup(PlacementSettings::new(InstantiationMethod::FillSpline, 2.0));

        app.world_mut().write_message(InstantiateSpline { entity: spline });
        app.update();
        assert_eq!(instance_count(&mut app), 4);

        app.world_mut().entity_mut(spline).remove::<SplineInstantiator>();
        app.update();

        assert_eq!(instance_count(&mut app), 0);
    }
}
