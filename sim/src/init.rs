use std::path::PathBuf;
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_app::ScheduleRunnerPlugin;
use bevy_log::{error, info};
use bevy_rapier3d::prelude::*;
use pond_water::sets::PondUpdateSet;
use pond_water::{WaterPhysicsConfig, WaterPhysicsPlugin, WaterPreset};

use crate::load_config::load_water_config;
use crate::scene::spawn_pond;
use crate::telemetry::{count_ticks, log_floaters, SimulationRun};

#[derive(Debug, Clone)]
pub struct SimSettings {
    pub config_path: Option<PathBuf>,
    pub preset: WaterPreset,
    pub seed: Option<u64>,
    pub water_level: f32,
    pub tick_rate: u32,
    pub ticks: u64,
}

fn resolve_config(settings: &SimSettings) -> Result<WaterPhysicsConfig, Box<dyn std::error::Error>> {
    let preset = settings.preset.to_config();
    let mut config = match &settings.config_path {
        Some(path) => load_water_config(path, preset)?,
        None => preset,
    };

    if let Some(seed) = settings.seed {
        config = config.with_seed(seed);
    }

    Ok(config)
}

pub fn init(settings: SimSettings) -> AppExit {
    let step = Duration::from_secs_f64(1.0 / settings.tick_rate as f64);

    let mut app = App::new();
    // Time advances by exactly one step per frame, as fast as the CPU allows.
    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::ZERO)));
    app.add_plugins(bevy::log::LogPlugin::default());
    app.add_plugins(TransformPlugin);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step));

    app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default());
    app.insert_resource(TimestepMode::Fixed {
        dt: step.as_secs_f32(),
        substeps: 1,
    });

    let config = match resolve_config(&settings) {
        Ok(config) => config,
        Err(err) => {
            error!("Failed to load water config: {}", err);
            return AppExit::error();
        }
    };

    let water = match WaterPhysicsPlugin::new(config, settings.water_level) {
        Ok(plugin) => plugin,
        Err(err) => {
            error!("Invalid water config: {}", err);
            return AppExit::error();
        }
    };
    app.add_plugins(water);

    app.insert_resource(SimulationRun::new(settings.ticks, settings.tick_rate));
    app.add_systems(Startup, spawn_pond);
    app.add_systems(
        Update,
        (log_floaters, count_ticks)
            .chain()
            .in_set(PondUpdateSet::Telemetry),
    );

    info!(
        "Simulating {:?} water at level {} for {} ticks ({} Hz)",
        settings.preset, settings.water_level, settings.ticks, settings.tick_rate
    );

    app.run()
}
