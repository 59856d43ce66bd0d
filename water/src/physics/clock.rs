use bevy_ecs::resource::Resource;

/// Phase clock fed to the wave field. Only ever moves forward.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationClock {
    time: f32,
    step_start: f32,
}

impl SimulationClock {
    pub fn new(time: f32) -> Self {
        Self {
            time,
            step_start: time,
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Phase the most recent step was evaluated at.
    pub fn step_start(&self) -> f32 {
        self.step_start
    }

    /// Negative and non-finite steps are ignored.
    pub fn advance(&mut self, delta: f32) {
        if delta.is_finite() && delta > 0.0 {
            self.step_start = self.time;
            self.time += delta;
        }
    }
}
