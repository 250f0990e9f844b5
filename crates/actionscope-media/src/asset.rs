// crates/actionscope-media/src/asset.rs
//
// The fixed sample clip played for every bucket click. Loading only validates
// the file (present, regular, non-empty) so a bad path surfaces as a load
// error in the panel; the decoder opens the path itself.

use std::path::{Path, PathBuf};

use actionscope_core::error::LoadError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoAsset {
    path: PathBuf,
    len:  u64,
}

impl VideoAsset {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let meta = std::fs::metadata(path)
            .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
        if !meta.is_file() || meta.len() == 0 {
            return Err(LoadError::EmptyAsset { path: path.to_path_buf() });
        }
        tracing::info!("video asset {} ({} bytes)", path.display(), meta.len());
        Ok(Self { path: path.to_path_buf(), len: meta.len() })
    }

    pub fn path(&self) -> &Path { &self.path }

    /// File size in bytes at validation time.
    pub fn len(&self) -> u64 { self.len }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_without_keeping_contents() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.mp4");
        std::fs::write(&path, [0u8, 0, 0, 24, b'f', b't', b'y', b'p']).unwrap();
        let asset = VideoAsset::load(&path).unwrap();
        assert_eq!(asset.len(), 8);
        assert_eq!(asset.path(), path.as_path());
    }

    #[test]
    fn missing_empty_and_directory_paths_fail() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            VideoAsset::load(&dir.path().join("none.mp4")),
            Err(LoadError::Io { .. })
        ));
        let empty = dir.path().join("empty.mp4");
        std::fs::write(&empty, b"").unwrap();
        assert!(matches!(VideoAsset::load(&empty), Err(LoadError::EmptyAsset { .. })));
        assert!(matches!(VideoAsset::load(dir.path()), Err(LoadError::EmptyAsset { .. })));
    }
}
