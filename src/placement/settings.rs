use bevy::prelude::*;

use super::error::{SettingsError, SettingsErrors};

/// A signed cardinal axis used to align placed instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
#[reflect(Default)]
pub enum OrientationAxis {
    /// No axis selected. Never valid for instantiation.
    None,
    #[default]
    X,
    Y,
    Z,
    NegX,
    NegY,
    NegZ,
}

impl OrientationAxis {
    /// Every axis, `None` included, in display order.
    pub const ALL: [Self; 7] = [
        Self::None,
        Self::X,
        Self::Y,
        Self::Z,
        Self::NegX,
        Self::NegY,
        Self::NegZ,
    ];

    /// The axis pointing the other way. `None` is its own opposite.
    pub fn opposite(self) -> Self {
        match self {
            Self::None => Self::None,
            Self::X => Self::NegX,
            Self::Y => Self::NegY,
            Self::Z => Self::NegZ,
            Self::NegX => Self::X,
            Self::NegY => Self::Y,
            Self::NegZ => Self::Z,
        }
    }

    /// Unit vector for this axis.
    pub fn to_vec3(self) -> Option<Vec3> {
        match self {
            Self::None => None,
            Self::X => Some(Vec3::X),
            Self::Y => Some(Vec3::Y),
            Self::Z => Some(Vec3::Z),
            Self::NegX => Some(Vec3::NEG_X),
            Self::NegY => Some(Vec3::NEG_Y),
            Self::NegZ => Some(Vec3::NEG_Z),
        }
    }

    /// Get the display name for this axis.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::NegX => "-X",
            Self::NegY => "-Y",
            Self::NegZ => "-Z",
        }
    }

    /// Whether `other` lies on the same line as this axis.
    pub fn is_parallel_to(self, other: Self) -> bool {
        self != Self::None && (other == self || other == self.opposite())
    }
}

/// Up axes that can be combined with `forward`.
///
/// An unset forward axis only admits an unset up axis. Otherwise every axis
/// except `None`, `forward` and its opposite is allowed.
pub fn valid_up_axis_options(forward: OrientationAxis) -> Vec<OrientationAxis> {
    if forward == OrientationAxis::None {
        return vec![OrientationAxis::None];
    }
    OrientationAxis::ALL
        .into_iter()
        .filter(|&candidate| candidate != OrientationAxis::None && !forward.is_parallel_to(candidate))
        .collect()
}

/// How the number of instances along a spline is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Default)]
pub enum InstantiationMethod {
    /// Unset. Segment count queries return `-1`.
    None,
    /// Place `instance_count` instances, capped by what fits on the spline.
    InstanceCountSplineClamp,
    /// Place exactly `instance_count` instances, resizing the spline to fit.
    InstanceCountAdjustSpline,
    /// Place as many whole sections as fit on the spline.
    #[default]
    FillSpline,
}

impl InstantiationMethod {
    /// Get the display name for this method.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::InstanceCountSplineClamp => "Instance Count (Clamp To Spline)",
            Self::InstanceCountAdjustSpline => "Instance Count (Adjust Spline)",
            Self::FillSpline => "Fill Spline",
        }
    }

    /// Whether `instance_count` drives this method.
    pub fn uses_instance_count(&self) -> bool {
        matches!(
            self,
            Self::InstanceCountSplineClamp | Self::InstanceCountAdjustSpline
        )
    }
}

/// Mobility hint forwarded to placed instances. Not interpreted by placement.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component, Default)]
pub enum InstanceMobility {
    #[default]
    Static,
    Stationary,
    Movable,
}

/// Rules for placing instances along a spline.
#[derive(Debug, Clone, PartialEq, Reflect)]
#[reflect(Default)]
pub struct PlacementSettings {
    /// Local axis of the instance aligned with the spline direction.
    pub forward_axis: OrientationAxis,
    /// Local axis of the instance aligned with the up direction.
    pub up_axis: OrientationAxis,
    /// How the instance count is chosen.
    pub method: InstantiationMethod,
    /// Requested instance count, for the instance-count methods.
    pub instance_count: i32,
    /// Arc length covered by each segment.
    pub section_length: f32,
    /// Gap reserved between placed instances.
    pub spacing: f32,
    /// Mobility hint for placed instances.
    pub mobility: InstanceMobility,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            forward_axis: OrientationAxis::X,
            up_axis: OrientationAxis::Z,
            method: InstantiationMethod::FillSpline,
            instance_count: 0,
            section_length: 100.0,
            spacing: 0.0,
            mobility: InstanceMobility::Static,
        }
    }
}

impl PlacementSettings {
    /// Create settings for the given method and section length.
    pub fn new(method: InstantiationMethod, section_length: f32) -> Self {
        Self {
            method,
            section_length,
            ..default()
        }
    }

    /// Set the forward and up axes.
    pub fn with_axes(mut self, forward: OrientationAxis, up: OrientationAxis) -> Self {
        self.forward_axis = forward;
        self.up_axis = up;
        self
    }

    /// Set the requested instance count.
    pub fn with_instance_count(mut self, count: i32) -> Self {
        self.instance_count = count;
        self
    }

    /// Set the spacing between instances.
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the mobility hint.
    pub fn with_mobility(mut self, mobility: InstanceMobility) -> Self {
        self.mobility = mobility;
        self
    }

    /// Reset `up_axis` to `None` if it is incompatible with `forward_axis`.
    ///
    /// Returns `true` if the value was changed.
    pub fn sanitize_up_axis(&mut self) -> bool {
        if valid_up_axis_options(self.forward_axis).contains(&self.up_axis) {
            return false;
        }
        self.up_axis = OrientationAxis::None;
        true
    }

    /// Check every field, reporting all violations at once.
    pub fn validate(&self) -> Result<(), SettingsErrors> {
        let mut errors = Vec::new();

        if self.forward_axis == OrientationAxis::None {
            errors.push(SettingsError::ForwardAxisUnset);
        }
        if self.up_axis == OrientationAxis::None {
            errors.push(SettingsError::UpAxisUnset);
        }
        if self.method == InstantiationMethod::None {
            errors.push(SettingsError::MethodUnset);
        }
        if self.forward_axis.is_parallel_to(self.up_axis) {
            errors.push(SettingsError::ParallelAxes {
                forward: self.forward_axis,
                up: self.up_axis,
            });
        }
        if !(self.section_length.is_finite() && self.section_length > 0.0) {
            errors.push(SettingsError::InvalidSectionLength(self.section_length));
        }

        SettingsErrors::from_vec(errors).map_or(Ok(()), Err)
    }
}
