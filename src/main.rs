//! Example fence builder.
//!
//! Run with: `cargo run`

use bevy::prelude::*;
use bevy_spline_instances::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(SplineInstancesPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, (handle_keys, draw_splines))
        .run();
}

#[derive(Component)]
struct Fence;

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 10.0, 14.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(30.0, 30.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
    ));

    // Fence rail section: long along X, the instance forward axis
    let rail = commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::new(1.8, 0.15, 0.1))),
            MeshMaterial3d(materials.add(Color::srgb(0.55, 0.35, 0.2))),
            InstanceSource,
        ))
        .id();

    let settings = PlacementSettings::new(InstantiationMethod::FillSpline, 2.0)
        .with_axes(OrientationAxis::X, OrientationAxis::Y)
        .with_instance_count(5)
        .with_spacing(0.2);

    let fence = commands
        .spawn((
            Spline::new(
                SplineType::CatmullRom,
                vec![
                    Vec3::new(-9.0, 0.5, 2.0),
                    Vec3::new(-6.0, 0.5, 0.0),
                    Vec3::new(-2.0, 0.5, 3.0),
                    Vec3::new(2.0, 0.5, -3.0),
                    Vec3::new(6.0, 0.5, 0.0),
                    Vec3::new(9.0, 0.5, 2.0),
                ],
            ),
            SplineInstantiator::new(rail, settings).with_reference_up(Vec3::Y),
            Transform::default(),
            Fence,
        ))
        .id();

    commands.write_message(InstantiateSpline { entity: fence });

    println!("I: instantiate  C: clear  R: rebuild  M: cycle method  H: help");
}

fn handle_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut fences: Query<(Entity, &mut SplineInstantiator, &Spline, &InstanceList), With<Fence>>,
    mut instantiate: MessageWriter<InstantiateSpline>,
    mut clear: MessageWriter<ClearSplineInstances>,
) {
    for (entity, mut instantiator, spline, list) in &mut fences {
        if keyboard.just_pressed(KeyCode::KeyI) {
            instantiate.write(InstantiateSpline { entity });
        }
        if keyboard.just_pressed(KeyCode::KeyC) {
            clear.write(ClearSplineInstances { entity });
        }
        if keyboard.just_pressed(KeyCode::KeyR) {
            clear.write(ClearSplineInstances { entity });
            instantiate.write(InstantiateSpline { entity });
        }
        if keyboard.just_pressed(KeyCode::KeyM) {
            let settings = &mut instantiator.settings;
            settings.method = match settings.method {
                InstantiationMethod::FillSpline => InstantiationMethod::InstanceCountSplineClamp,
                InstantiationMethod::InstanceCountSplineClamp => {
                    InstantiationMethod::InstanceCountAdjustSpline
                }
                _ => InstantiationMethod::FillSpline,
            };
            println!("Method: {}", settings.method.display_name());
        }
        if keyboard.just_pressed(KeyCode::KeyH) {
            let length = SplineCurve::new(spline.clone()).length();
            println!("\n=== Fence ===");
            println!("Method:    {}", instantiator.settings.method.display_name());
            println!("Length:    {length:.2}");
            println!("Segments:  {}", segment_count(length, &instantiator.settings));
            println!("Instances: {}", list.len());
            println!("=============\n");
        }
    }
}

fn draw_splines(splines: Query<(&Spline, &GlobalTransform)>, mut gizmos: Gizmos) {
    for (spline, transform) in &splines {
        let curve = SplineCurve::new(spline.clone()).with_transform(transform);
        let length = curve.length();
        let steps = 64;
        let points = (0..=steps).map(|i| {
            curve.position_at_distance(length * i as f32 / steps as f32, CoordinateSpace::World)
        });
        gizmos.linestrip(points, Color::srgb(1.0, 0.8, 0.2));
    }
}
