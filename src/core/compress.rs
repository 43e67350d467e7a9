use crate::models::error::{KeeperError, KeeperResult};
use camino::Utf8Path;
use std::fs::File;
use std::io;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub struct Compression;

impl Compression {
    /// Writes a zip archive of the tree rooted at `source` to
    /// `archive_path`. Entry names are the `/`-joined paths relative to the
    /// source root; directory entries are added explicitly so empty
    /// directories survive extraction.
    pub fn zip_dir(source: &Utf8Path, archive_path: &Utf8Path) -> KeeperResult<()> {
        let file = File::create(archive_path)?;
        let mut writer = ZipWriter::new(file);

        for entry in WalkDir::new(source) {
            let entry = entry?;
            let path = Utf8Path::from_path(entry.path()).ok_or_else(|| {
                KeeperError::NonUtf8Path(format!("{:?}", entry.path()))
            })?;

            let rel_path = path.strip_prefix(source)?;
            if rel_path.as_str().is_empty() {
                continue; // the source root itself
            }

            let name = rel_path
                .components()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join("/");

            let mut options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

            // Preserve permissions so executables stay executable after extraction
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Ok(metadata) = entry.metadata() {
                    options = options.unix_permissions(metadata.permissions().mode());
                }
            }

            if entry.file_type().is_dir() {
                writer.add_directory(name, options)?;
            } else {
                writer.start_file(name, options)?;
                let mut input = File::open(path)?;
                io::copy(&mut input, &mut writer)?;
            }
        }

        writer.finish()?;
        Ok(())
    }
}
