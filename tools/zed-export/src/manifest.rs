//! Manifest parsing and build orchestration
//!
//! Parses zed.toml and exports one `.zed` file per model entry.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::export::export_model;
use crate::formats::ZED_EXT;
use crate::mesh::{load_meshes, select_meshes};
use crate::options::{AxisConvention, ExportOptions};

/// Root manifest structure
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub output: OutputConfig,
    /// Defaults applied to every model
    #[serde(default)]
    pub export: ExportOptions,
    #[serde(default)]
    pub models: BTreeMap<String, ModelEntry>,
    /// Directory the manifest was loaded from; relative paths resolve here
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("build/")
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ModelEntry {
    Simple(PathBuf),
    Detailed {
        path: PathBuf,
        /// Model name in the meta chunk (defaults to the entry key)
        #[serde(default)]
        name: Option<String>,
        /// Objects to include (empty means all)
        #[serde(default)]
        objects: Vec<String>,
        #[serde(default)]
        axis: Option<AxisConvention>,
        #[serde(default)]
        flip_winding: Option<bool>,
    },
}

impl ModelEntry {
    pub fn path(&self) -> &Path {
        match self {
            ModelEntry::Simple(p) => p,
            ModelEntry::Detailed { path, .. } => path,
        }
    }

    pub fn objects(&self) -> &[String] {
        match self {
            ModelEntry::Simple(_) => &[],
            ModelEntry::Detailed { objects, .. } => objects,
        }
    }

    /// Export options for this entry: manifest defaults overridden per model
    pub fn options(&self, key: &str, defaults: &ExportOptions) -> ExportOptions {
        let mut options = defaults.clone();
        options.name = Some(key.to_string());

        if let ModelEntry::Detailed {
            name,
            axis,
            flip_winding,
            ..
        } = self
        {
            if let Some(name) = name {
                options.name = Some(name.clone());
            }
            if let Some(axis) = axis {
                options.axis = *axis;
            }
            if let Some(flip) = flip_winding {
                options.flip_winding = *flip;
            }
        }
        options
    }
}

impl Manifest {
    /// Source path of an entry, resolved against the manifest directory
    pub fn source_path(&self, entry: &ModelEntry) -> PathBuf {
        self.base_dir.join(entry.path())
    }
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    let mut manifest: Manifest = toml::from_str(&content)
        .with_context(|| format!("Failed to parse manifest: {:?}", path))?;
    manifest.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok(manifest)
}

/// Validate a manifest without building
pub fn validate(manifest: &Manifest) -> Result<()> {
    if manifest.models.is_empty() {
        bail!("Manifest lists no models");
    }

    for (key, entry) in &manifest.models {
        let source = manifest.source_path(entry);
        if !source.exists() {
            bail!("Model '{}' source not found: {:?}", key, source);
        }

        let options = entry.options(key, &manifest.export);
        if options.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            bail!("Model '{}' has an empty name", key);
        }

        let objects = entry.objects();
        if let Some(duplicate) = objects
            .iter()
            .enumerate()
            .find(|&(i, object)| objects[..i].contains(object))
            .map(|(_, object)| object)
        {
            bail!("Model '{}' lists object '{}' twice", key, duplicate);
        }
    }
    Ok(())
}

/// Build every model in the manifest, in key order
pub fn build_all(manifest: &Manifest, output_override: Option<&Path>) -> Result<()> {
    let output_dir = match output_override {
        Some(dir) => dir.to_path_buf(),
        None => manifest.base_dir.join(&manifest.output.dir),
    };
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    for (key, entry) in &manifest.models {
        let source = manifest.source_path(entry);
        let output = output_dir.join(format!("{}.{}", key, ZED_EXT));
        tracing::info!("Exporting model: {} -> {:?}", key, output);

        let meshes = load_meshes(&source)?;
        let meshes = select_meshes(meshes, entry.objects())
            .with_context(|| format!("Model '{}' from {:?}", key, source))?;
        let options = entry.options(key, &manifest.export);

        export_model(&output, &meshes, &options)
            .with_context(|| format!("Failed to export model '{}'", key))?;
    }

    Ok(())
}
