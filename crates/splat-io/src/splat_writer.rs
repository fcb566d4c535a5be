//! Compact `.splat` writer (32 bytes per point, no header).

use std::path::Path;

use splat_core::compact::encode_compact;
use splat_core::{AttributeStore, Result};

use crate::atomic_file;
use crate::traits::StoreWriter;

/// Writer for the compact binary splat format.
///
/// Accepts standardized (XYZW) stores only. Adding several stores appends
/// their records in order.
#[derive(Debug, Clone, Default)]
pub struct SplatWriter {
    encoded: Vec<u8>,
    num_points: usize,
}

impl SplatWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_store(&mut self, store: &AttributeStore) -> Result<()> {
        self.encoded.extend_from_slice(&encode_compact(store)?);
        self.num_points += store.num_points();
        Ok(())
    }

    pub fn point_count(&self) -> usize {
        self.num_points
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        atomic_file::write(path, &self.encoded)
    }
}

impl StoreWriter for SplatWriter {
    fn new() -> Self {
        SplatWriter::new()
    }

    fn add_store(&mut self, store: &AttributeStore) -> Result<()> {
        SplatWriter::add_store(self, store)
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.encoded.clone())
    }

    fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        SplatWriter::write(self, path)
    }

    fn point_count(&self) -> usize {
        SplatWriter::point_count(self)
    }
}

/// Write a standardized store to `path` in the compact format.
pub fn write_splat_store<P: AsRef<Path>>(path: P, store: &AttributeStore) -> Result<()> {
    let mut writer = SplatWriter::new();
    writer.add_store(store)?;
    writer.write(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::encode_with;
    use splat_core::schema::CANONICAL_ORDER;
    use splat_core::{QuaternionConvention, SplatError, RECORD_SIZE};

    fn standard_store(points: usize) -> AttributeStore {
        AttributeStore::from_columns(
            QuaternionConvention::Xyzw,
            CANONICAL_ORDER.iter().map(|name| (*name, vec![0.0f32; points])),
        )
        .unwrap()
    }

    #[test]
    fn stores_are_appended_in_order() {
        let mut writer = SplatWriter::new();
        writer.add_store(&standard_store(2)).unwrap();
        writer.add_store(&standard_store(3)).unwrap();
        assert_eq!(writer.point_count(), 5);
        assert_eq!(StoreWriter::to_bytes(&writer).unwrap().len(), 5 * RECORD_SIZE);
    }

    #[test]
    fn encode_with_matches_direct_encoding() {
        let store = standard_store(4);
        assert_eq!(
            encode_with::<SplatWriter>(&store).unwrap(),
            encode_compact(&store).unwrap()
        );
    }

    #[test]
    fn source_convention_store_is_refused() {
        let source = AttributeStore::from_columns(
            QuaternionConvention::Wxyz,
            CANONICAL_ORDER.iter().map(|name| (*name, vec![0.0f32; 1])),
        )
        .unwrap();
        let mut writer = SplatWriter::new();
        assert!(matches!(
            writer.add_store(&source),
            Err(SplatError::ConventionMismatch { .. })
        ));
        assert_eq!(writer.point_count(), 0);
    }
}
