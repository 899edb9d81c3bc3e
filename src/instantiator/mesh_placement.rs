use bevy::prelude::*;

use crate::geometry::CoordinateFrame;
use crate::placement::{PlacementConsumer, PlacementSettings, SegmentInfo};
use crate::surface::NeedsSurfaceSnap;

use super::SplineInstance;

/// Spawns one mesh entity per segment through [`Commands`].
///
/// Instances are top-level entities placed in world space using the
/// spline's global transform.
pub struct MeshPlacement<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    instantiator: Entity,
    spline_transform: GlobalTransform,
    reference_up: Vec3,
    mesh: Option<Mesh3d>,
    material: Option<MeshMaterial3d<StandardMaterial>>,
    surface_snap: bool,
}

impl<'a, 'w, 's> MeshPlacement<'a, 'w, 's> {
    pub fn new(commands: &'a mut Commands<'w, 's>, instantiator: Entity) -> Self {
        Self {
            commands,
            instantiator,
            spline_transform: GlobalTransform::IDENTITY,
            reference_up: Vec3::Y,
            mesh: None,
            material: None,
            surface_snap: false,
        }
    }

    /// Set the visuals cloned onto each instance.
    pub fn with_source(
        mut self,
        mesh: Option<Mesh3d>,
        material: Option<MeshMaterial3d<StandardMaterial>>,
    ) -> Self {
        self.mesh = mesh;
        self.material = material;
        self
    }

    /// Set the spline's transform and local reference up direction.
    pub fn with_frame(mut self, spline_transform: GlobalTransform, reference_up: Vec3) -> Self {
        self.spline_transform = spline_transform;
        self.reference_up = reference_up;
        self
    }

    /// Mark spawned instances for surface snapping.
    pub fn with_surface_snap(mut self, enabled: bool) -> Self {
        self.surface_snap = enabled;
        self
    }

    /// Local-space transform of the instance placed on `segment`.
    pub fn local_transform(&self, segment: &SegmentInfo, settings: &PlacementSettings) -> Transform {
        let direction = segment.direction();
        let rotation = CoordinateFrame::from_tangent_with_up(direction, self.reference_up)
            .rotation_for_axes(settings.forward_axis, settings.up_axis)
            .unwrap_or(Quat::IDENTITY);

        // Half the gap on each side of the instance.
        let translation = segment.start_position + direction * settings.spacing * 0.5;

        Transform::from_translation(translation).with_rotation(rotation)
    }
}

impl PlacementConsumer for MeshPlacement<'_, '_, '_> {
    type Handle = Option<Entity>;

    fn generate_instance(&mut self, segment: &SegmentInfo, settings: &PlacementSettings) -> Option<Entity> {
        let Some(mesh) = self.mesh.clone() else {
            debug!(
                "Instantiator {} has no source mesh, skipping segment {}",
                self.instantiator, segment.index
            );
            return None;
        };

        let local = self.local_transform(segment, settings);
        let world = self.spline_transform.mul_transform(local).compute_transform();

        let mut entity_commands = self.commands.spawn((
            world,
            mesh,
            SplineInstance {
                instantiator: self.instantiator,
                index: segment.index,
                up_axis: settings.up_axis.to_vec3().unwrap_or(Vec3::Y),
            },
            settings.mobility,
            Visibility::default(),
        ));

        if let Some(material) = &self.material {
            entity_commands.insert(material.clone());
        }
        if self.surface_snap {
            entity_commands.insert(NeedsSurfaceSnap);
        }

        Some(entity_commands.id())
    }

    fn destroy_instance(&mut self, handle: Option<Entity>) {
        let Some(entity) = handle else {
            return;
        };
        if let Ok(mut entity_commands) = self.commands.get_entity(entity) {
            entity_commands.despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    use crate::placement::OrientationAxis;

    #[test]
    fn test_local_transform_orients_and_offsets() {
        let mut world = World::new();
        let transform = world
            .run_system_once(|mut commands: Commands| {
                let placement = MeshPlacement::new(&mut commands, Entity::PLACEHOLDER)
                    .with_frame(GlobalTransform::IDENTITY, Vec3::Z);
                let segment = SegmentInfo {
                    start_position: Vec3::new(0.0, 10.0, 0.0),
                    end_position: Vec3::new(0.0, 20.0, 0.0),
                    ..default()
                };
                let settings = PlacementSettings::default()
                    .with_axes(OrientationAxis::X, OrientationAxis::Z)
                    .with_spacing(4.0);
                placement.local_transform(&segment, &settings)
            })
            .unwrap();

        assert!((transform.translation - Vec3::new(0.0, 12.0, 0.0)).length() < 1e-4);
        assert!((transform.rotation * Vec3::X - Vec3::Y).length() < 1e-4);
        assert!((transform.rotation * Vec3::Z - Vec3::Z).length() < 1e-4);
    }
}
