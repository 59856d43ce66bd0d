use bevy_log::info;
use pond_water::WaterPhysicsConfig;
use ron::de::from_str;
use std::fs;
use std::path::Path;

/// Read a water config from a RON file, or return `fallback` if the file
/// does not exist.
pub fn load_water_config(
    path: &Path,
    fallback: WaterPhysicsConfig,
) -> Result<WaterPhysicsConfig, Box<dyn std::error::Error>> {
    if !path.exists() {
        info!(
            "Water config file not found: {}. Using preset values.",
            path.display()
        );
        return Ok(fallback);
    }

    let contents: String = fs::read_to_string(path)?;
    let config: WaterPhysicsConfig = from_str(&contents)?;

    info!("Found water config file from disk: {}", path.display());

    Ok(config)
}
