//! Binary little-endian PLY reader for Gaussian splat point clouds.
//!
//! Provides both a struct-based API (`PlyReader`) and convenience functions.
//!
//! Only the `vertex` element is decoded into an [`AttributeStore`]. Other
//! elements (camera extrinsics, intrinsics, image size, ...) are accounted
//! for when validating the body length and then skipped.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use rayon::prelude::*;

use splat_core::data_types::ScalarType;
use splat_core::{AttributeStore, QuaternionConvention, Result, SplatError};

use crate::traits::StoreReader;
use crate::VERTEX_ELEMENT;

const END_HEADER: &str = "end_header";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlyProperty {
    pub name: String,
    pub scalar_type: ScalarType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlyElement {
    pub name: String,
    pub count: usize,
    pub properties: Vec<PlyProperty>,
}

impl PlyElement {
    /// Bytes per entry of this element.
    pub fn record_size(&self) -> usize {
        self.properties.iter().map(|p| p.scalar_type.byte_length()).sum()
    }

    /// Bytes taken by all entries, or `None` on overflow.
    pub fn body_size(&self) -> Option<usize> {
        self.count.checked_mul(self.record_size())
    }
}

/// Parsed PLY header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlyHeader {
    pub elements: Vec<PlyElement>,
    /// Byte length of the header including the `end_header` line.
    pub header_len: usize,
}

impl PlyHeader {
    /// Parses the header at the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut elements: Vec<PlyElement> = Vec::new();
        let mut format_seen = false;
        let mut pos = 0usize;
        let mut line_no = 0usize;

        loop {
            if pos >= bytes.len() {
                return Err(SplatError::Header(format!("no `{END_HEADER}` line")));
            }
            let (raw, next) = match bytes[pos..].iter().position(|&b| b == b'\n') {
                Some(nl) => (&bytes[pos..pos + nl], pos + nl + 1),
                None => (&bytes[pos..], bytes.len()),
            };
            pos = next;
            line_no += 1;

            let line = std::str::from_utf8(raw)
                .map_err(|_| SplatError::Header(format!("line {line_no} is not valid text")))?
                .trim_end_matches('\r')
                .trim();

            if line_no == 1 {
                if line != "ply" {
                    return Err(SplatError::Header("missing `ply` magic".to_string()));
                }
                continue;
            }
            if line == END_HEADER {
                break;
            }

            let mut tokens = line.split_whitespace();
            match tokens.next() {
                None | Some("comment") | Some("obj_info") => {}
                Some("format") => {
                    let format = tokens.next().unwrap_or_default();
                    if format != "binary_little_endian" {
                        return Err(SplatError::UnsupportedFeature(format!(
                            "PLY format `{format}` (only binary_little_endian is read)"
                        )));
                    }
                    format_seen = true;
                }
                Some("element") => {
                    let (name, count) = match (tokens.next(), tokens.next()) {
                        (Some(name), Some(count)) => (name, count),
                        _ => return Err(SplatError::Header(format!("line {line_no}: bad element"))),
                    };
                    let count = count.parse().map_err(|_| {
                        SplatError::Header(format!("line {line_no}: bad element count `{count}`"))
                    })?;
                    elements.push(PlyElement {
                        name: name.to_string(),
                        count,
                        properties: Vec::new(),
                    });
                }
                Some("property") => {
                    let element = elements.last_mut().ok_or_else(|| {
                        SplatError::Header(format!("line {line_no}: property before any element"))
                    })?;
                    let (ty, name) = match (tokens.next(), tokens.next()) {
                        (Some("list"), _) => {
                            return Err(SplatError::UnsupportedFeature(format!(
                                "list property in element `{}`",
                                element.name
                            )))
                        }
                        (Some(ty), Some(name)) => (ty, name),
                        _ => return Err(SplatError::Header(format!("line {line_no}: bad property"))),
                    };
                    let scalar_type = ScalarType::from_ply_name(ty).ok_or_else(|| {
                        SplatError::Header(format!("line {line_no}: unknown type `{ty}`"))
                    })?;
                    if element.properties.iter().any(|p| p.name == name) {
                        return Err(SplatError::Header(format!(
                            "duplicate property `{name}` in element `{}`",
                            element.name
                        )));
                    }
                    element.properties.push(PlyProperty {
                        name: name.to_string(),
                        scalar_type,
                    });
                }
                Some(other) => {
                    return Err(SplatError::Header(format!(
                        "line {line_no}: unexpected keyword `{other}`"
                    )))
                }
            }
        }

        if !format_seen {
            return Err(SplatError::Header("no `format` line".to_string()));
        }
        Ok(Self {
            elements,
            header_len: pos,
        })
    }

    pub fn element(&self, name: &str) -> Option<&PlyElement> {
        self.elements.iter().find(|e| e.name == name)
    }

    /// Total body bytes implied by the header.
    pub fn body_size(&self) -> Result<usize> {
        self.elements.iter().try_fold(0usize, |acc, e| {
            e.body_size()
                .and_then(|size| acc.checked_add(size))
                .ok_or_else(|| SplatError::Header(format!("element `{}` is too large", e.name)))
        })
    }

    /// Byte offset of element `name` within the body.
    fn element_offset(&self, name: &str) -> usize {
        self.elements
            .iter()
            .take_while(|e| e.name != name)
            .filter_map(PlyElement::body_size)
            .sum()
    }
}

/// Decodes the `vertex` element of a binary PLY buffer.
///
/// Columns follow the declared property order and are tagged with
/// `convention`. Non-float properties are converted to `f32`.
pub fn decode_ply(bytes: &[u8], convention: QuaternionConvention) -> Result<AttributeStore> {
    let header = PlyHeader::parse(bytes)?;
    let vertex = header
        .element(VERTEX_ELEMENT)
        .ok_or_else(|| SplatError::MissingElement(VERTEX_ELEMENT.to_string()))?;

    let body = &bytes[header.header_len..];
    let expected = header.body_size()?;
    if body.len() != expected {
        return Err(SplatError::BodySize {
            expected,
            found: body.len(),
        });
    }
    for skipped in header.elements.iter().filter(|e| e.name != VERTEX_ELEMENT) {
        debug!("Skipping PLY element `{}` ({} entries)", skipped.name, skipped.count);
    }
    for property in vertex.properties.iter().filter(|p| p.scalar_type.is_integral()) {
        debug!(
            "Converting integer property `{}` ({}) to float",
            property.name,
            property.scalar_type.ply_name()
        );
    }

    let start = header.element_offset(VERTEX_ELEMENT);
    let stride = vertex.record_size();
    let data = &body[start..start + vertex.count * stride];

    let mut offsets = Vec::with_capacity(vertex.properties.len());
    let mut offset = 0usize;
    for property in &vertex.properties {
        offsets.push(offset);
        offset += property.scalar_type.byte_length();
    }

    let columns: Vec<Vec<f32>> = vertex
        .properties
        .par_iter()
        .zip(offsets.par_iter())
        .map(|(property, &offset)| {
            (0..vertex.count)
                .map(|i| property.scalar_type.read_le_f32(&data[i * stride + offset..]))
                .collect::<Vec<f32>>()
        })
        .collect();

    let mut store = AttributeStore::new(convention);
    for (property, values) in vertex.properties.iter().zip(columns) {
        store.add_column(property.name.as_str(), values)?;
    }
    debug!(
        "Decoded {} points with {} properties",
        store.num_points(),
        store.num_columns()
    );
    Ok(store)
}

/// PLY format reader.
///
/// Reads the vertex element of a binary little-endian PLY file. Files are
/// assumed to hold source-convention (WXYZ) rotations unless configured
/// otherwise with [`with_convention`](Self::with_convention).
#[derive(Debug)]
pub struct PlyReader {
    path: PathBuf,
    convention: QuaternionConvention,
}

impl PlyReader {
    /// Open a PLY file for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(SplatError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )));
        }
        Ok(Self {
            path,
            convention: QuaternionConvention::SOURCE,
        })
    }

    pub fn with_convention(mut self, convention: QuaternionConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse only the header of the file.
    pub fn read_header(&self) -> Result<PlyHeader> {
        PlyHeader::parse(&fs::read(&self.path)?)
    }

    pub fn read_store(&mut self) -> Result<AttributeStore> {
        decode_ply(&fs::read(&self.path)?, self.convention)
    }
}

impl StoreReader for PlyReader {
    fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        PlyReader::open(path)
    }

    fn read_store(&mut self) -> Result<AttributeStore> {
        PlyReader::read_store(self)
    }
}

// ============================================================================
// Convenience Functions
// ============================================================================

/// Read a source-convention store from a binary PLY file.
pub fn read_ply_store<P: AsRef<Path>>(path: P) -> Result<AttributeStore> {
    PlyReader::open(path)?.read_store()
}
