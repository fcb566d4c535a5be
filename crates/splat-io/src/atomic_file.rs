//! Whole-file writes that never leave a partially written target behind.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use splat_core::Result;

/// Sibling path used while `path` is being written.
pub(crate) fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writes `bytes` to a temporary sibling of `path`, then renames it over
/// `path`. The temporary file is removed if either step fails.
pub(crate) fn write<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let temp = temp_path_for(path);
    let result = fs::write(&temp, bytes).and_then(|()| fs::rename(&temp, path));
    if let Err(err) = result {
        let _ = fs::remove_file(&temp);
        return Err(err.into());
    }
    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Writes several files so that no target is replaced unless every
/// temporary file was written.
///
/// Targets are renamed into place in the order given; put a target that
/// must survive a failed run (such as the input file) last.
pub(crate) fn write_all(files: &[(&Path, &[u8])]) -> Result<()> {
    let temps: Vec<PathBuf> = files.iter().map(|(path, _)| temp_path_for(path)).collect();
    let remove_temps = || {
        for temp in &temps {
            let _ = fs::remove_file(temp);
        }
    };

    for (temp, (_, bytes)) in temps.iter().zip(files) {
        if let Err(err) = fs::write(temp, bytes) {
            remove_temps();
            return Err(err.into());
        }
    }
    for (temp, (path, bytes)) in temps.iter().zip(files) {
        if let Err(err) = fs::rename(temp, path) {
            remove_temps();
            return Err(err.into());
        }
        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_is_a_sibling() {
        let temp = temp_path_for(Path::new("out/scene.ply"));
        assert_eq!(temp, Path::new("out/scene.ply.tmp"));
    }

    #[test]
    fn replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.bin");
        fs::write(&path, b"old contents").unwrap();
        write(&path, b"new").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("a.bin");
        assert!(write(&path, b"data").is_err());
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn blocked_target_leaves_later_targets_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("scene.splat");
        fs::create_dir(&blocked).unwrap();
        let kept = dir.path().join("scene.ply");
        fs::write(&kept, b"original").unwrap();

        assert!(write_all(&[
            (blocked.as_path(), &b"splat"[..]),
            (kept.as_path(), &b"standard"[..]),
        ]).is_err());
        assert_eq!(fs::read(&kept).unwrap(), b"original");
        assert!(!temp_path_for(&blocked).exists());
        assert!(!temp_path_for(&kept).exists());
    }

    #[test]
    fn writes_every_target() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");
        write_all(&[(a.as_path(), &b"first"[..]), (b.as_path(), &b"second"[..])]).unwrap();
        assert_eq!(fs::read(&a).unwrap(), b"first");
        assert_eq!(fs::read(&b).unwrap(), b"second");
    }
}
