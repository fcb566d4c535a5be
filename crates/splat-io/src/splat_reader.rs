//! Compact `.splat` reader.

use std::fs;
use std::path::Path;

use splat_core::compact::{decode_compact, CompactSplat};
use splat_core::Result;

/// Read every record of a compact splat file.
pub fn read_splat_file<P: AsRef<Path>>(path: P) -> Result<Vec<CompactSplat>> {
    decode_compact(&fs::read(path)?)
}
