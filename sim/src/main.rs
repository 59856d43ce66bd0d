use std::path::PathBuf;

use bevy::app::AppExit;
use clap::{Parser, ValueEnum};
use pond_water::WaterPreset;

mod init;
mod load_config;
mod scene;
mod telemetry;

pub const TICKS_PER_SECOND: u32 = 60;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PresetArg {
    Still,
    Pond,
    Breezy,
    Storm,
}

impl From<PresetArg> for WaterPreset {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Still => WaterPreset::Still,
            PresetArg::Pond => WaterPreset::Pond,
            PresetArg::Breezy => WaterPreset::Breezy,
            PresetArg::Storm => WaterPreset::Storm,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Headless pond simulation with wave-field buoyancy", long_about = None)]
struct Args {
    /// RON file with water physics overrides
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = PresetArg::Pond)]
    preset: PresetArg,

    #[arg(short, long, default_value_t = 10.0)]
    seconds: f32,

    #[arg(short, long, default_value_t = TICKS_PER_SECOND)]
    tick_rate: u32,

    #[arg(short, long, default_value_t = 0.0)]
    water_level: f32,

    /// Seed for sample point placement
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> AppExit {
    let args = Args::parse();

    if !(args.seconds.is_finite() && args.seconds > 0.0) {
        eprintln!("Error: seconds must be a positive number.");
        eprintln!("Got: {}", args.seconds);
        std::process::exit(1);
    }

    if args.tick_rate < 1 || args.tick_rate > 1000 {
        eprintln!("Error: tick_rate must be between 1 and 1000 (inclusive).");
        eprintln!("Got: {}", args.tick_rate);
        std::process::exit(1);
    }

    if !args.water_level.is_finite() {
        eprintln!("Error: water_level must be finite.");
        std::process::exit(1);
    }

    init::init(init::SimSettings {
        config_path: args.config,
        preset: args.preset.into(),
        seed: args.seed,
        water_level: args.water_level,
        tick_rate: args.tick_rate,
        ticks: (args.seconds * args.tick_rate as f32).ceil() as u64,
    })
}
