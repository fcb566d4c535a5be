//! File-level conversion of a reconstruction output into standardized PLY
//! and compact splat files.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use splat_core::compact::encode_compact;
use splat_core::schema::{self, CANONICAL_ORDER, REQUIRED_ATTRIBUTES};
use splat_core::{standardize, AttributeStore, QuaternionConvention, Result, StandardizeReport};

use crate::atomic_file;
use crate::ply_reader::decode_ply;
use crate::ply_writer::encode_ply;

/// Settings for a conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Attributes the source must carry. Checked before standardization.
    pub required: Vec<String>,
    /// Property order of the standardized PLY file.
    pub property_order: Vec<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            required: REQUIRED_ATTRIBUTES.iter().map(|s| s.to_string()).collect(),
            property_order: CANONICAL_ORDER.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Outcome of a file conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub input_points: usize,
    pub kept: usize,
    pub dropped: usize,
    pub ply_path: PathBuf,
    pub splat_path: PathBuf,
}

/// `scene.ply` -> `scene.splat`.
pub fn splat_path_for<P: AsRef<Path>>(ply_path: P) -> PathBuf {
    ply_path.as_ref().with_extension("splat")
}

/// Validates and standardizes an in-memory source store.
pub fn standardize_store(
    source: &AttributeStore,
    options: &ConvertOptions,
) -> Result<(AttributeStore, StandardizeReport)> {
    schema::check(source, &options.required)?;
    standardize(source)
}

/// Encoded standardized PLY and compact buffers for a source PLY buffer.
pub fn convert_bytes(
    source_ply: &[u8],
    options: &ConvertOptions,
) -> Result<(Vec<u8>, Vec<u8>, StandardizeReport)> {
    let source = decode_ply(source_ply, QuaternionConvention::SOURCE)?;
    let (standard, report) = standardize_store(&source, options)?;
    let ply = encode_ply(&standard, &options.property_order)?;
    let splat = encode_compact(&standard)?;
    Ok((ply, splat, report))
}

/// [`convert_file_with`] using [`ConvertOptions::default`].
pub fn convert_file<I, P, S>(input: I, ply_out: P, splat_out: S) -> Result<ConversionReport>
where
    I: AsRef<Path>,
    P: AsRef<Path>,
    S: AsRef<Path>,
{
    convert_file_with(input, ply_out, splat_out, &ConvertOptions::default())
}

/// Reads a source-convention PLY, validates and standardizes it, and writes
/// the standardized PLY and the compact splat file.
///
/// Nothing is written unless every step before writing succeeds. `ply_out`
/// may equal `input`.
pub fn convert_file_with<I, P, S>(
    input: I,
    ply_out: P,
    splat_out: S,
    options: &ConvertOptions,
) -> Result<ConversionReport>
where
    I: AsRef<Path>,
    P: AsRef<Path>,
    S: AsRef<Path>,
{
    let (input, ply_out, splat_out) = (input.as_ref(), ply_out.as_ref(), splat_out.as_ref());
    info!("Converting {}", input.display());

    let (ply, splat, report) = convert_bytes(&fs::read(input)?, options)?;
    // The PLY may replace the input, so it goes last.
    atomic_file::write_all(&[(splat_out, splat.as_slice()), (ply_out, ply.as_slice())])?;

    info!(
        "Kept {} of {} points -> {}, {}",
        report.kept,
        report.total(),
        ply_out.display(),
        splat_out.display()
    );
    Ok(ConversionReport {
        input_points: report.total(),
        kept: report.kept,
        dropped: report.dropped,
        ply_path: ply_out.to_path_buf(),
        splat_path: splat_out.to_path_buf(),
    })
}

/// Replaces the PLY at `path` with its standardized version and writes the
/// compact file next to it.
pub fn standardize_in_place<P: AsRef<Path>>(path: P) -> Result<ConversionReport> {
    let path = path.as_ref();
    convert_file(path, path, splat_path_for(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splat_path_swaps_extension() {
        assert_eq!(splat_path_for("out/scene.ply"), Path::new("out/scene.splat"));
        assert_eq!(splat_path_for("scene"), Path::new("scene.splat"));
    }

    #[test]
    fn extra_required_attributes_are_checked() {
        let source = AttributeStore::from_columns(
            QuaternionConvention::Wxyz,
            REQUIRED_ATTRIBUTES.iter().map(|n| (*n, vec![0.0f32])),
        )
        .unwrap();
        let mut options = ConvertOptions::default();
        options.required.push("f_rest_0".to_string());
        let err = standardize_store(&source, &options).unwrap_err();
        assert_eq!(err.missing_names(), ["f_rest_0"]);
    }
}
