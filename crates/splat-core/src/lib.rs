//! Splat Core Library
//!
//! In-memory representation and transforms for 3D Gaussian splat point
//! clouds: a columnar [`AttributeStore`], the required-attribute check,
//! display color derivation, WXYZ/XYZW quaternion conventions,
//! standardization into the canonical layout and the compact 32-byte
//! binary encoding.
//!
//! Typical flow:
//!
//! ```
//! use splat_core::{encode_compact, schema, standardize, AttributeStore, QuaternionConvention};
//!
//! let source = AttributeStore::from_columns(
//!     QuaternionConvention::Wxyz,
//!     schema::REQUIRED_ATTRIBUTES.iter().map(|name| (*name, vec![0.0f32; 4])),
//! )?;
//! schema::check_vertex_schema(&source)?;
//! let (standard, report) = standardize(&source)?;
//! assert_eq!(report.kept, 4);
//! assert_eq!(encode_compact(&standard)?.len(), 4 * 32);
//! # Ok::<(), splat_core::SplatError>(())
//! ```

pub mod attribute_store;
pub mod color;
pub mod compact;
pub mod data_types;
pub mod quaternion;
pub mod schema;
pub mod standardizer;
pub mod status;

pub use attribute_store::{AttributeStore, Column, QuaternionConvention};
pub use compact::{decode_compact, encode_compact, CompactSplat, RECORD_SIZE};
pub use data_types::ScalarType;
pub use standardizer::{standardize, StandardizeReport};
pub use status::{Result, SplatError};
