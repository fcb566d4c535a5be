//! Fixed 32-byte-per-point binary splat format.
//!
//! Record layout, all floats little-endian:
//!
//! | Offset | Size | Content                                   |
//! |--------|------|-------------------------------------------|
//! | 0      | 12   | position `x, y, z` (`f32`)                |
//! | 12     | 12   | linear scale `exp(scale_0..2)` (`f32`)    |
//! | 24     | 4    | color `R, G, B, A` (`u8`)                 |
//! | 28     | 4    | unit rotation `x, y, z, w` (`u8`, 128 = 0) |
//!
//! There is no header; a file holds exactly `32 * N` bytes.

use byteorder::{ByteOrder, LittleEndian};
use rayon::prelude::*;

use crate::attribute_store::{AttributeStore, QuaternionConvention};
use crate::color;
use crate::quaternion;
use crate::schema::CANONICAL_ORDER;
use crate::status::{Result, SplatError};

/// Size in bytes of one encoded point.
pub const RECORD_SIZE: usize = 32;

/// One point of the compact format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompactSplat {
    pub position: [f32; 3],
    /// Linear (already exponentiated) scale.
    pub scale: [f32; 3],
    pub color: [u8; 4],
    /// Quantized XYZW rotation.
    pub rotation: [u8; 4],
}

impl CompactSplat {
    /// Builds a record from standardized (log-scale, logit-opacity, XYZW)
    /// attribute values.
    pub fn from_attributes(
        position: [f32; 3],
        log_scale: [f32; 3],
        rotation_xyzw: [f32; 4],
        f_dc: [f32; 3],
        opacity: f32,
    ) -> Self {
        Self {
            position,
            scale: log_scale.map(f32::exp),
            color: color::rgba_to_u8(color::derive_rgba(f_dc, opacity)),
            rotation: quaternion::quantize(rotation_xyzw),
        }
    }

    pub fn write_to(&self, out: &mut [u8]) {
        for (i, v) in self.position.iter().chain(&self.scale).enumerate() {
            LittleEndian::write_f32(&mut out[i * 4..], *v);
        }
        out[24..28].copy_from_slice(&self.color);
        out[28..32].copy_from_slice(&self.rotation);
    }

    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut out = [0u8; RECORD_SIZE];
        self.write_to(&mut out);
        out
    }

    /// Parses one record from the first [`RECORD_SIZE`] bytes of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < RECORD_SIZE {
            return Err(SplatError::BodySize {
                expected: RECORD_SIZE,
                found: bytes.len(),
            });
        }
        let f = |i: usize| LittleEndian::read_f32(&bytes[i * 4..]);
        let mut color = [0u8; 4];
        let mut rotation = [0u8; 4];
        color.copy_from_slice(&bytes[24..28]);
        rotation.copy_from_slice(&bytes[28..32]);
        Ok(Self {
            position: [f(0), f(1), f(2)],
            scale: [f(3), f(4), f(5)],
            color,
            rotation,
        })
    }

    /// Dequantized XYZW rotation; only approximately unit length.
    pub fn rotation_xyzw(&self) -> [f32; 4] {
        self.rotation.map(quaternion::component_from_u8)
    }
}

/// Encodes every point of a standardized store.
///
/// The store must be in [`QuaternionConvention::Xyzw`] and hold all of
/// [`CANONICAL_ORDER`]; the output is exactly `RECORD_SIZE * num_points`
/// bytes in row order.
pub fn encode_compact(store: &AttributeStore) -> Result<Vec<u8>> {
    if store.convention() != QuaternionConvention::STANDARD {
        return Err(SplatError::ConventionMismatch {
            expected: QuaternionConvention::STANDARD,
            found: store.convention(),
        });
    }
    let [x, y, z, s0, s1, s2, r0, r1, r2, r3, c0, c1, c2, op] = store.require_all(CANONICAL_ORDER)?;

    let mut out = vec![0u8; RECORD_SIZE * store.num_points()];
    out.par_chunks_mut(RECORD_SIZE)
        .enumerate()
        .for_each(|(i, record)| {
            CompactSplat::from_attributes(
                [x[i], y[i], z[i]],
                [s0[i], s1[i], s2[i]],
                [r0[i], r1[i], r2[i], r3[i]],
                [c0[i], c1[i], c2[i]],
                op[i],
            )
            .write_to(record);
        });
    Ok(out)
}

/// Parses a compact buffer back into records.
pub fn decode_compact(bytes: &[u8]) -> Result<Vec<CompactSplat>> {
    if bytes.len() % RECORD_SIZE != 0 {
        return Err(SplatError::BodySize {
            expected: (bytes.len() / RECORD_SIZE + 1) * RECORD_SIZE,
            found: bytes.len(),
        });
    }
    bytes
        .par_chunks_exact(RECORD_SIZE)
        .map(CompactSplat::from_bytes)
        .collect()
}
