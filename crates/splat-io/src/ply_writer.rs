//! Binary little-endian PLY writer.
//!
//! Every property is written as `float`, in the order the caller chooses.
//! Standardized stores use [`CANONICAL_ORDER`], which is the default.

use std::collections::HashSet;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use rayon::prelude::*;

use splat_core::schema::{self, CANONICAL_ORDER};
use splat_core::{AttributeStore, Result, SplatError};

use crate::atomic_file;
use crate::traits::StoreWriter;
use crate::VERTEX_ELEMENT;

/// Serializes the columns named by `order` as one `vertex` element.
///
/// Fails with [`SplatError::MissingAttributes`] listing every name of
/// `order` the store lacks, and with [`SplatError::InvalidParameter`] if
/// `order` names a property twice.
pub fn encode_ply<S: AsRef<str>>(store: &AttributeStore, order: &[S]) -> Result<Vec<u8>> {
    let mut seen = HashSet::with_capacity(order.len());
    if let Some(name) = order.iter().map(|n| n.as_ref()).find(|n| !seen.insert(*n)) {
        return Err(SplatError::InvalidParameter(format!(
            "property `{name}` appears more than once in the output order"
        )));
    }
    schema::check(store, order)?;
    let columns: Vec<&[f32]> = order
        .iter()
        .map(|name| store.require(name.as_ref()))
        .collect::<Result<_>>()?;

    let mut header = String::from("ply\nformat binary_little_endian 1.0\n");
    header.push_str(&format!("element {VERTEX_ELEMENT} {}\n", store.num_points()));
    for name in order {
        header.push_str(&format!("property float {}\n", name.as_ref()));
    }
    header.push_str("end_header\n");

    let stride = 4 * columns.len();
    let mut bytes = header.into_bytes();
    let header_len = bytes.len();
    bytes.resize(header_len + stride * store.num_points(), 0);

    if stride > 0 {
        bytes[header_len..]
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(i, record)| {
                for (c, column) in columns.iter().enumerate() {
                    LittleEndian::write_f32(&mut record[c * 4..], column[i]);
                }
            });
    }
    Ok(bytes)
}

/// PLY format writer.
///
/// Holds a single encoded vertex element:
///
/// ```ignore
/// let mut writer = PlyWriter::new();
/// writer.add_store(&standardized)?;
/// writer.write("scene.ply")?;
/// ```
#[derive(Debug, Clone)]
pub struct PlyWriter {
    property_order: Vec<String>,
    encoded: Option<Vec<u8>>,
    num_points: usize,
}

impl PlyWriter {
    pub fn new() -> Self {
        Self {
            property_order: CANONICAL_ORDER.iter().map(|s| s.to_string()).collect(),
            encoded: None,
            num_points: 0,
        }
    }

    /// Sets the property order used for stores added afterwards.
    pub fn with_property_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.property_order = order.into_iter().map(Into::into).collect();
        self
    }

    pub fn property_order(&self) -> &[String] {
        &self.property_order
    }

    pub fn point_count(&self) -> usize {
        self.num_points
    }

    pub fn add_store(&mut self, store: &AttributeStore) -> Result<()> {
        if self.encoded.is_some() {
            return Err(SplatError::InvalidParameter(
                "PLY writer already holds a vertex element".to_string(),
            ));
        }
        self.encoded = Some(encode_ply(store, &self.property_order)?);
        self.num_points = store.num_points();
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.encoded
            .clone()
            .ok_or_else(|| SplatError::InvalidParameter("no store added to PLY writer".to_string()))
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        match &self.encoded {
            Some(bytes) => atomic_file::write(path, bytes),
            None => Err(SplatError::InvalidParameter(
                "no store added to PLY writer".to_string(),
            )),
        }
    }
}

impl Default for PlyWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreWriter for PlyWriter {
    fn new() -> Self {
        PlyWriter::new()
    }

    fn add_store(&mut self, store: &AttributeStore) -> Result<()> {
        PlyWriter::add_store(self, store)
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        PlyWriter::to_bytes(self)
    }

    fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        PlyWriter::write(self, path)
    }

    fn point_count(&self) -> usize {
        PlyWriter::point_count(self)
    }
}

// ============================================================================
// Convenience Functions
// ============================================================================

/// Write `store` to `path` in canonical property order.
pub fn write_ply_store<P: AsRef<Path>>(path: P, store: &AttributeStore) -> Result<()> {
    let mut writer = PlyWriter::new();
    writer.add_store(store)?;
    writer.write(path)
}
