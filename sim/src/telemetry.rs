use bevy::prelude::*;
use bevy_log::info;
use bevy_rapier3d::prelude::Velocity;
use pond_water::{SimulationClock, WaterPhysics, WaterSurface};

use crate::scene::Floater;

/// Tick budget for a headless run.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SimulationRun {
    pub total_ticks: u64,
    pub tick: u64,
    /// Log body states every this many ticks
    pub log_every: u64,
}

impl SimulationRun {
    pub fn new(total_ticks: u64, tick_rate: u32) -> Self {
        Self {
            total_ticks,
            tick: 0,
            log_every: tick_rate.max(1) as u64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatState {
    Airborne,
    Floating,
    Sunk,
}

/// Where a prop sits relative to the local water surface.
pub fn classify(center_y: f32, surface_y: f32, half_height: f32) -> FloatState {
    if center_y - half_height > surface_y {
        FloatState::Airborne
    } else if center_y + half_height < surface_y {
        FloatState::Sunk
    } else {
        FloatState::Floating
    }
}

pub fn log_floaters(
    run: Res<SimulationRun>,
    clock: Res<SimulationClock>,
    surface: Res<WaterSurface>,
    engine: Res<WaterPhysics>,
    floaters: Query<(&Name, &Transform, &Velocity, &Floater)>,
) {
    let last_tick = run.tick + 1 >= run.total_ticks;
    if run.tick % run.log_every != 0 && !last_tick {
        return;
    }

    // Same phase the water forces of this frame used.
    let time = clock.step_start();
    for (name, transform, velocity, floater) in floaters.iter() {
        let position = transform.translation;
        let surface_y = engine.surface_height(position.x, position.z, time, surface.level);
        info!(
            "[t={:.2}] {}: {:?} at {:.2?}, speed {:.2}, surface {:.2}",
            time,
            name,
            classify(position.y, surface_y, floater.half_height),
            position,
            velocity.linvel.length(),
            surface_y
        );
    }
}

pub fn count_ticks(mut run: ResMut<SimulationRun>, mut exit: EventWriter<AppExit>) {
    run.tick += 1;
    if run.tick >= run.total_ticks {
        info!("Simulation finished after {} ticks", run.tick);
        exit.write(AppExit::Success);
    }
}
