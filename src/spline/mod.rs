mod arc_length;
mod components;
mod oracle;
mod types;

pub use arc_length::*;
pub use components::*;
pub use oracle::*;
pub use types::*;

use bevy::prelude::*;

/// Plugin that registers spline types for reflection/serialization.
pub struct SplinePlugin;

impl Plugin for SplinePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SplineType>().register_type::<Spline>();
    }
}
