//! Orientation of placed instances along a spline.

use bevy::prelude::*;

use crate::placement::OrientationAxis;

/// An orthonormal frame along a spline: tangent, right, and corrected up.
///
/// The frame is constructed from a tangent direction with automatic handling
/// of degenerate cases (e.g., when tangent is parallel to the preferred up).
#[derive(Debug, Clone, Copy)]
pub struct CoordinateFrame {
    /// The tangent (forward along spline) direction.
    pub tangent: Vec3,
    /// The right direction, `tangent × preferred_up`.
    pub right: Vec3,
    /// The up direction, perpendicular to tangent and right.
    pub up: Vec3,
}

impl CoordinateFrame {
    /// Build a frame from a tangent and preferred up direction.
    ///
    /// When the tangent is parallel to `preferred_up`, X is used as the
    /// reference axis instead, then Z if the tangent is also along X.
    pub fn from_tangent_with_up(tangent: Vec3, preferred_up: Vec3) -> Self {
        let tangent = tangent.normalize_or_zero();

        let right = [preferred_up, Vec3::X, Vec3::Z]
            .into_iter()
            .map(|reference| tangent.cross(reference).normalize_or_zero())
            .find(|right| right.length_squared() > 0.001)
            .unwrap_or(Vec3::ZERO);
        let up = right.cross(tangent).normalize_or_zero();

        Self { tangent, right, up }
    }

    /// Check if this frame is valid (non-degenerate).
    pub fn is_valid(&self) -> bool {
        self.tangent.length_squared() > 0.001
            && self.right.length_squared() > 0.001
            && self.up.length_squared() > 0.001
    }

    /// Rotation taking an instance's local `forward` axis onto the tangent
    /// and its local `up` axis onto the frame's up.
    ///
    /// Returns `None` if either axis is unset, the axes are parallel, or the
    /// frame is degenerate.
    pub fn rotation_for_axes(&self, forward: OrientationAxis, up: OrientationAxis) -> Option<Quat> {
        if !self.is_valid() || forward.is_parallel_to(up) {
            return None;
        }
        let local_forward = forward.to_vec3()?;
        let local_up = up.to_vec3()?;

        // forward × up maps onto tangent × up, which is `right`.
        let local = Mat3::from_cols(local_forward, local_up, local_forward.cross(local_up));
        let world = Mat3::from_cols(self.tangent, self.up, self.right);

        Some(Quat::from_mat3(&(world * local.transpose())).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn test_frame_basic() {
        let frame = CoordinateFrame::from_tangent_with_up(Vec3::X, Vec3::Z);
        assert!(frame.is_valid());
        assert_vec_eq(frame.tangent, Vec3::X);
        assert_vec_eq(frame.up, Vec3::Z);
        assert_vec_eq(frame.right, Vec3::NEG_Y);
    }

    #[test]
    fn test_frame_degenerate_tangent_along_up() {
        let frame = CoordinateFrame::from_tangent_with_up(Vec3::Y, Vec3::Y);
        assert!(frame.is_valid());
        assert!(frame.up.dot(Vec3::Y).abs() < 1e-4);
    }

    #[test]
    fn test_zero_tangent_is_invalid() {
        let frame = CoordinateFrame::from_tangent_with_up(Vec3::ZERO, Vec3::Y);
        assert!(!frame.is_valid());
        assert!(frame
            .rotation_for_axes(OrientationAxis::X, OrientationAxis::Y)
            .is_none());
    }

    #[test]
    fn test_rotation_maps_axes() {
        let tangent = Vec3::new(1.0, 0.0, 1.0);
        let frame = CoordinateFrame::from_tangent_with_up(tangent, Vec3::Y);

        for (forward, up) in [
            (OrientationAxis::X, OrientationAxis::Z),
            (OrientationAxis::NegZ, OrientationAxis::Y),
            (OrientationAxis::Y, OrientationAxis::NegX),
        ] {
            let rotation = frame.rotation_for_axes(forward, up).unwrap();
            assert_vec_eq(rotation * forward.to_vec3().unwrap(), frame.tangent);
            assert_vec_eq(rotation * up.to_vec3().unwrap(), frame.up);
        }
    }

    #[test]
    fn test_rotation_rejects_bad_axes() {
        let frame = CoordinateFrame::from_tangent_with_up(Vec3::X, Vec3::Y);
        assert!(frame
            .rotation_for_axes(OrientationAxis::None, OrientationAxis::Y)
            .is_none());
        assert!(frame
            .rotation_for_axes(OrientationAxis::Z, OrientationAxis::NegZ)
            .is_none());
    }
}
