//! Water surface description shared by physics and rendering.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │   WaterPhysicsConfig (RON)   │
//! └──────────────┬───────────────┘
//!                ▼
//!        ┌───────────────┐
//!        │   WaveField   │  height(x, z, t), surface_normal(x, z, t)
//!        └───────┬───────┘
//!        ┌───────┴────────┐
//!        ▼                ▼
//! ┌─────────────┐  ┌─────────────┐
//! │ WaterPhysics│  │  Renderer   │
//! │  buoyancy   │  │  vertex     │
//! │  drag/surge │  │  animation  │
//! └─────────────┘  └─────────────┘
//! ```

pub mod config;
pub mod waves;

pub use config::{SamplingMode, WaterPhysicsConfig, WaterPreset};
pub use waves::WaveField;
