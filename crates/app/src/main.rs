use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::WinitSettings;

use simulation::sim_rng::{random_seed, SimRng};

fn main() {
    let seed = random_seed();
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Eco-Route Engine".to_string(),
            resolution: (1280.0, 800.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    // Effects and truck routes animate every frame.
    .insert_resource(WinitSettings::game())
    .insert_resource(ClearColor(Color::srgb_u8(2, 6, 5)))
    // Inserted before SimulationPlugin so its default seed is not used.
    .insert_resource(SimRng::from_seed_u64(seed))
    .add_systems(Startup, spawn_camera)
    .add_plugins((simulation::SimulationPlugin, ui::UiPlugin));

    info!("Eco-Route starting with bin layout seed {}", seed);
    app.run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
