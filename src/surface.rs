//! Snapping placed instances onto terrain.
//!
//! Instances spawned by a [`SplineInstantiator`](crate::instantiator::SplineInstantiator)
//! with a [`SurfaceSnap`] component are raycast downward with avian3d and
//! moved onto the first surface hit.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::transform::TransformSystems;

use crate::instantiator::SplineInstance;

/// Configuration for snapping instances onto surfaces.
///
/// Add this component next to a `SplineInstantiator`.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct SurfaceSnap {
    /// Whether snapping is enabled.
    pub enabled: bool,
    /// Offset above the instance to start the raycast from.
    /// Increase this if your spline passes through terrain.
    pub ray_origin_offset: f32,
    /// Maximum distance to cast the ray downward.
    pub max_distance: f32,
    /// Offset along the surface normal to prevent z-fighting.
    pub normal_offset: f32,
    /// Whether to align instance rotation to the surface normal.
    pub align_to_normal: bool,
    /// Optional collision layers to query against.
    /// If None, all layers are queried.
    #[reflect(ignore)]
    pub collision_layers: Option<LayerMask>,
}

impl Default for SurfaceSnap {
    fn default() -> Self {
        Self {
            enabled: true,
            ray_origin_offset: 10.0,
            max_distance: 100.0,
            normal_offset: 0.0,
            align_to_normal: false,
            collision_layers: None,
        }
    }
}

impl SurfaceSnap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ray origin offset.
    pub fn with_ray_offset(mut self, offset: f32) -> Self {
        self.ray_origin_offset = offset;
        self
    }

    /// Set the maximum raycast distance.
    pub fn with_max_distance(mut self, distance: f32) -> Self {
        self.max_distance = distance;
        self
    }

    /// Set the normal offset.
    pub fn with_normal_offset(mut self, offset: f32) -> Self {
        self.normal_offset = offset;
        self
    }

    /// Enable alignment to surface normal.
    pub fn with_normal_alignment(mut self, align: bool) -> Self {
        self.align_to_normal = align;
        self
    }

    /// Set collision layers to query.
    pub fn with_layers(mut self, layers: LayerMask) -> Self {
        self.collision_layers = Some(layers);
        self
    }

    fn filter(&self) -> SpatialQueryFilter {
        match self.collision_layers {
            Some(layers) => SpatialQueryFilter::default().with_mask(layers),
            None => SpatialQueryFilter::default(),
        }
    }
}

/// Marker for instances waiting to be snapped.
/// Added at spawn, removed once a surface is hit.
#[derive(Component, Debug, Clone, Copy)]
pub struct NeedsSurfaceSnap;

/// Run condition: avian3d physics is present.
pub fn physics_available(gravity: Option<Res<Gravity>>) -> bool {
    gravity.is_some()
}

/// Turn `rotation` so that the instance-local `local_up` points along
/// `normal`, using the shortest arc so the heading moves as little as possible.
fn align_up_to_normal(rotation: Quat, local_up: Vec3, normal: Vec3) -> Quat {
    let up = (rotation * local_up).normalize_or_zero();
    let normal = normal.normalize_or_zero();
    if up == Vec3::ZERO || normal == Vec3::ZERO {
        return rotation;
    }
    (Quat::from_rotation_arc(up, normal) * rotation).normalize()
}

/// Move `transform` onto a downward ray hit at `distance` with surface `normal`.
///
/// Returns `false` on a miss, leaving the transform untouched.
fn apply_surface_hit(
    transform: &mut Transform,
    config: &SurfaceSnap,
    local_up: Vec3,
    hit: Option<(f32, Vec3)>,
) -> bool {
    let Some((distance, normal)) = hit else {
        return false;
    };

    let ray_origin = transform.translation + Vec3::Y * config.ray_origin_offset;
    transform.translation = ray_origin + Vec3::NEG_Y * distance + normal * config.normal_offset;
    if config.align_to_normal {
        transform.rotation = align_up_to_normal(transform.rotation, local_up, normal);
    }
    true
}

/// Drop the marker from instances whose instantiator has no enabled [`SurfaceSnap`].
pub fn release_disabled_snaps(
    mut commands: Commands,
    snaps: Query<&SurfaceSnap>,
    instances: Query<(Entity, &SplineInstance), With<NeedsSurfaceSnap>>,
) {
    for (entity, instance) in &instances {
        if !snaps.get(instance.instantiator).is_ok_and(|snap| snap.enabled) {
            commands.entity(entity).remove::<NeedsSurfaceSnap>();
        }
    }
}

/// Snap marked instances onto the surface below them.
pub fn snap_instances_to_surface(
    mut commands: Commands,
    spatial_query: SpatialQuery,
    snaps: Query<&SurfaceSnap>,
    mut instances: Query<(Entity, &SplineInstance, &mut Transform), With<NeedsSurfaceSnap>>,
) {
    for (entity, instance, mut transform) in &mut instances {
        let Ok(config) = snaps.get(instance.instantiator) else {
            continue;
        };
        if !config.enabled {
            continue;
        }

        let ray_origin = transform.translation + Vec3::Y * config.ray_origin_offset;
        let hit = spatial_query
            .cast_ray(
                ray_origin,
                Dir3::NEG_Y,
                config.max_distance,
                true,
                &config.filter(),
            )
            .map(|hit| (hit.distance, hit.normal));

        // No hit: keep the marker and retry next frame (colliders may not exist yet).
        if apply_surface_hit(&mut transform, config, instance.up_axis, hit) {
            commands.entity(entity).remove::<NeedsSurfaceSnap>();
        }
    }
}

/// Plugin adding surface snapping for spline instances.
///
/// Snapping only runs while avian3d's physics plugins are installed.
pub struct SurfaceSnapPlugin;

impl Plugin for SurfaceSnapPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SurfaceSnap>().add_systems(
            PostUpdate,
            (
                release_disabled_snaps,
                snap_instances_to_surface.run_if(physics_available),
            )
                .chain()
                .after(TransformSystems::Propagate),
        );
    }
}
