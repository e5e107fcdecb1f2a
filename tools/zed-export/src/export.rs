//! File export entry point

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use crate::encoder::{EncodeSummary, encode_normalized, normalize_model};
use crate::error::ExportError;
use crate::mesh::{Mesh, Model};
use crate::options::ExportOptions;

/// Export `meshes` as one model to `output`.
///
/// Every mesh is normalized before the file is created, so range and
/// topology errors leave the filesystem untouched. Once writing starts, a
/// failure leaves the output file incomplete.
pub fn export_model(
    output: &Path,
    meshes: &[Mesh],
    options: &ExportOptions,
) -> Result<EncodeSummary, ExportError> {
    let name = model_name(output, options);
    let model = Model::new(&name, meshes);
    let normalized = normalize_model(&model, options)?;

    let file = File::create(output).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("Failed to create {}: {}", output.display(), e),
        )
    })?;
    let summary = encode_normalized(BufWriter::new(file), &name, &normalized)?;

    tracing::info!(
        "Exported {:?}: '{}', {} mesh(es), {} vertices, {} triangles ({} bytes)",
        output,
        name,
        summary.mesh_count,
        summary.vertex_count,
        summary.triangle_count(),
        summary.bytes_written
    );

    Ok(summary)
}

fn model_name(output: &Path, options: &ExportOptions) -> String {
    options
        .name
        .clone()
        .or_else(|| {
            output
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "model".to_string())
}
