//! Common traits for store readers and writers.
//!
//! These traits define consistent interfaces for the PLY and compact splat
//! formats, so pipeline code can stay generic over the output format:
//!
//! ```ignore
//! use splat_io::{PlyWriter, SplatWriter, StoreWriter};
//!
//! fn save<W: StoreWriter>(store: &AttributeStore, path: &str) -> Result<()> {
//!     let mut writer = W::new();
//!     writer.add_store(store)?;
//!     writer.write(path)
//! }
//!
//! save::<PlyWriter>(&standardized, "scene.ply")?;
//! save::<SplatWriter>(&standardized, "scene.splat")?;
//! ```

use std::path::Path;

use splat_core::{AttributeStore, Result};

/// Common interface for store writers.
pub trait StoreWriter: Sized {
    /// Create a new writer instance.
    fn new() -> Self;

    /// Add a store to be written.
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if the format cannot represent this store (missing columns,
    ///   wrong quaternion convention)
    fn add_store(&mut self, store: &AttributeStore) -> Result<()>;

    /// Encoded file contents of everything added so far.
    fn to_bytes(&self) -> Result<Vec<u8>>;

    /// Write all added stores to a file.
    ///
    /// # Arguments
    /// * `path` - Output file path
    fn write<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Get the number of points added.
    fn point_count(&self) -> usize;
}

/// Common interface for store readers.
pub trait StoreReader: Sized {
    /// Open a file for reading.
    ///
    /// # Arguments
    /// * `path` - Input file path
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;

    /// Read the point attributes of the file.
    fn read_store(&mut self) -> Result<AttributeStore>;
}

/// Encodes `store` with writer `W` in one call.
pub fn encode_with<W: StoreWriter>(store: &AttributeStore) -> Result<Vec<u8>> {
    let mut writer = W::new();
    writer.add_store(store)?;
    writer.to_bytes()
}
