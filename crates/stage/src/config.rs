use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use voxshape_capture::ClassifierConfig;
use voxshape_common::Bounds;
use voxshape_spawn::SpawnConfig;

/// Errors from loading a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {field} = {value}")]
    Invalid { field: &'static str, value: f32 },
}

/// Everything the stage needs to run. Every field has a default, so a
/// config file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub canvas: Bounds,
    /// Frames per second for `Stage::run`.
    pub frame_rate: u32,
    pub spawn: SpawnConfig,
    pub classifier: ClassifierConfig,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            canvas: Bounds::default(),
            frame_rate: 60,
            spawn: SpawnConfig::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl StageConfig {
    /// Load a JSON config file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the numeric fields the spawn path samples from.
    ///
    /// Canvas extents must be finite and non-negative. `max_speed` must be
    /// finite and non-negative. JSON numbers beyond `f32::MAX` arrive here
    /// as infinity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("canvas.width", self.canvas.width),
            ("canvas.height", self.canvas.height),
            ("spawn.max_speed", self.spawn.max_speed),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid { field, value });
            }
        }
        Ok(())
    }

    /// Save as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Time between frames. A zero frame rate is treated as 1 fps.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.frame_rate.max(1)))
    }
}
