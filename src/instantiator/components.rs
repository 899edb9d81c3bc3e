use bevy::prelude::*;

use crate::placement::{PlacementSettings, SplineSegmenter};

/// Places copies of a template entity along the [`Spline`](crate::spline::Spline)
/// on the same entity.
///
/// Nothing happens until an [`InstantiateSpline`] message names this entity.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(InstanceList)]
pub struct SplineInstantiator {
    /// Placement rules.
    pub settings: PlacementSettings,
    /// The template entity to copy. Its `Mesh3d` and `MeshMaterial3d` are
    /// cloned onto every instance.
    pub source: Entity,
    /// Reference up direction in the spline's local space.
    pub reference_up: Vec3,
}

impl Default for SplineInstantiator {
    fn default() -> Self {
        Self {
            settings: PlacementSettings::default(),
            source: Entity::PLACEHOLDER,
            reference_up: Vec3::Y,
        }
    }
}

impl SplineInstantiator {
    /// Create an instantiator copying `source` with the given settings.
    pub fn new(source: Entity, settings: PlacementSettings) -> Self {
        Self {
            source,
            settings,
            ..default()
        }
    }

    /// Set the reference up direction.
    pub fn with_reference_up(mut self, up: Vec3) -> Self {
        self.reference_up = up;
        self
    }
}

/// Instances placed by a [`SplineInstantiator`], in placement order.
///
/// `None` entries mark segments for which nothing was spawned.
#[derive(Component, Debug, Clone, Default)]
pub struct InstanceList {
    pub(crate) segmenter: SplineSegmenter<Option<Entity>>,
}

impl InstanceList {
    pub fn entities(&self) -> &[Option<Entity>] {
        self.segmenter.instances()
    }

    pub fn len(&self) -> usize {
        self.segmenter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segmenter.is_empty()
    }
}

/// Marker component for template entities. They are hidden when added.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct InstanceSource;

/// Added to every spawned instance.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct SplineInstance {
    /// The entity holding the [`SplineInstantiator`].
    pub instantiator: Entity,
    /// Index of the segment this instance was placed on.
    pub index: usize,
    /// Instance-local axis that was turned onto the spline's up.
    pub up_axis: Vec3,
}

/// Global options for spline instancing.
#[derive(Resource, Debug, Clone, Reflect)]
#[reflect(Resource, Default)]
pub struct SplineInstancingConfig {
    /// Samples used to build arc length tables.
    pub arc_length_samples: usize,
}

impl Default for SplineInstancingConfig {
    fn default() -> Self {
        Self {
            arc_length_samples: crate::spline::DEFAULT_ARC_LENGTH_SAMPLES,
        }
    }
}

/// Request to place instances along a spline. Appends to existing instances.
#[derive(Message, Debug, Clone, Copy)]
pub struct InstantiateSpline {
    /// Entity with [`Spline`](crate::spline::Spline) and [`SplineInstantiator`].
    pub entity: Entity,
}

/// Request to despawn every instance placed along a spline.
#[derive(Message, Debug, Clone, Copy)]
pub struct ClearSplineInstances {
    pub entity: Entity,
}
