//! Pipeline configuration (TOML)
//!
//! ```toml
//! [sorting]
//! per_strip = false
//!
//! [fog]
//! clamp_min = 0
//! clamp_max = 0xFFFFFFFF
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::render_state::{FogClamp, RenderFlags};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub sorting: SortingConfig,
    #[serde(default)]
    pub fog: FogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortingConfig {
    /// Sort translucent polygons per strip (enables depth writes when sorting)
    #[serde(default)]
    pub per_strip: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FogConfig {
    #[serde(default)]
    pub clamp_min: u32,
    #[serde(default = "default_clamp_max")]
    pub clamp_max: u32,
}

fn default_clamp_max() -> u32 {
    0xFFFF_FFFF
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            clamp_min: 0,
            clamp_max: default_clamp_max(),
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Initial render flags for a pipeline manager
    pub fn render_flags(&self) -> RenderFlags {
        RenderFlags {
            per_strip_sorting: self.sorting.per_strip,
            fog_clamp: FogClamp {
                min: self.fog.clamp_min,
                max: self.fog.clamp_max,
            },
        }
    }
}
