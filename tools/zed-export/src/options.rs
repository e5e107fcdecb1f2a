//! Export configuration
//!
//! Coordinate convention and winding are decided once per export by the
//! caller (CLI flags or the manifest) and applied uniformly to every mesh.

use glam::Vec3;
use serde::Deserialize;

/// Mapping from the source tool's axes to the file's axes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AxisConvention {
    /// Keep coordinates exactly as authored
    #[default]
    AsAuthored,
    /// Convert Z-up (right-handed) to Y-up: `(x, y, z) -> (x, z, -y)`
    ZUpToYUp,
}

impl AxisConvention {
    /// Remap a position or direction into the output convention
    pub fn apply(self, v: Vec3) -> Vec3 {
        match self {
            AxisConvention::AsAuthored => v,
            AxisConvention::ZUpToYUp => Vec3::new(v.x, v.z, -v.y),
        }
    }
}

/// Options for one export invocation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Axis remap applied after the world transform
    pub axis: AxisConvention,
    /// Reverse triangle winding
    pub flip_winding: bool,
    /// Model name for the meta chunk (defaults to the output file stem)
    pub name: Option<String>,
}

impl ExportOptions {
    pub fn new(axis: AxisConvention, flip_winding: bool) -> Self {
        Self {
            axis,
            flip_winding,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
