//! Splat I/O library for reading and writing Gaussian splat point clouds.
//!
//! This crate provides readers and writers for the two on-disk forms of a
//! splat cloud and a unified API through common traits.
//!
//! # Supported Formats
//!
//! | Format            | Read | Write | Notes                                  |
//! |-------------------|------|-------|----------------------------------------|
//! | PLY (binary LE)   | ✓    | ✓     | `vertex` element decoded, others skipped |
//! | Compact `.splat`  | ✓    | ✓     | 32 bytes per point, standardized input |
//!
//! # Conversion
//!
//! ```ignore
//! use splat_io::convert::{convert_file, splat_path_for};
//!
//! let report = convert_file("raw.ply", "scene.ply", splat_path_for("scene.ply"))?;
//! println!("kept {} dropped {}", report.kept, report.dropped);
//! ```
//!
//! # Unified Trait API
//!
//! Readers implement [`StoreReader`] and writers implement [`StoreWriter`]:
//!
//! ```ignore
//! use splat_io::{PlyReader, PlyWriter, SplatWriter, StoreReader, StoreWriter};
//!
//! let source = PlyReader::open("raw.ply")?.read_store()?;
//! let (standard, _) = splat_core::standardize(&source)?;
//!
//! let mut ply = PlyWriter::new();
//! ply.add_store(&standard)?;
//! ply.write("scene.ply")?;
//!
//! let mut splat = SplatWriter::new();
//! splat.add_store(&standard)?;
//! splat.write("scene.splat")?;
//! ```

/// Name of the PLY element holding per-point attributes.
pub const VERTEX_ELEMENT: &str = "vertex";

// Reader modules (require decoder feature)
#[cfg(feature = "decoder")]
pub mod ply_reader;
#[cfg(feature = "decoder")]
pub mod splat_reader;

// Writer modules (require encoder feature)
#[cfg(feature = "encoder")]
mod atomic_file;
#[cfg(feature = "encoder")]
pub mod ply_writer;
#[cfg(feature = "encoder")]
pub mod splat_writer;

#[cfg(all(feature = "decoder", feature = "encoder"))]
pub mod convert;

// Traits module is always available
pub mod traits;

// Re-export main types for convenience
#[cfg(all(feature = "decoder", feature = "encoder"))]
pub use convert::{
    convert_file, convert_file_with, splat_path_for, standardize_in_place, ConversionReport,
    ConvertOptions,
};
#[cfg(feature = "decoder")]
pub use ply_reader::{decode_ply, read_ply_store, PlyHeader, PlyReader};
#[cfg(feature = "encoder")]
pub use ply_writer::{encode_ply, write_ply_store, PlyWriter};
#[cfg(feature = "decoder")]
pub use splat_reader::read_splat_file;
#[cfg(feature = "encoder")]
pub use splat_writer::{write_splat_store, SplatWriter};
pub use traits::{encode_with, StoreReader, StoreWriter};
