use crate::models::error::{KeeperError, KeeperResult};
use camino::Utf8Path;
use walkdir::WalkDir;

pub struct FileUtils;

impl FileUtils {
    /// Recursively copies a directory tree from source to destination,
    /// preserving relative structure. Walk and copy errors are propagated;
    /// a partially written destination is left behind on failure.
    pub fn copy_recursive(src: &Utf8Path, dst: &Utf8Path) -> KeeperResult<()> {
        std::fs::create_dir_all(dst)?;

        for entry in WalkDir::new(src) {
            let entry = entry?;
            let src_path = Utf8Path::from_path(entry.path()).ok_or_else(|| {
                KeeperError::NonUtf8Path(format!("{:?}", entry.path()))
            })?;

            let rel_path = src_path.strip_prefix(src)?;
            let dst_path = dst.join(rel_path);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dst_path)?;
            } else {
                if let Some(parent) = dst_path.parent() {
                    if !parent.exists() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                std::fs::copy(src_path, &dst_path)?;
            }
        }

        Ok(())
    }

    /// Counts files (not directories) in the tree rooted at `root`.
    /// Best-effort: unreadable entries are skipped rather than failing the
    /// count.
    pub fn count_files(root: &Utf8Path) -> u64 {
        WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| !e.file_type().is_dir())
            .count() as u64
    }
}
