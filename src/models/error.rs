use std::io;
use thiserror::Error;

pub type KeeperResult<T> = Result<T, KeeperError>;

#[derive(Error, Debug)]
pub enum KeeperError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid UTF-8 path: {0}")]
    NonUtf8Path(String),

    #[error("Path prefix error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging setup error: {0}")]
    Logging(String),
}

impl KeeperError {
    /// True when the underlying cause is a permission denial, wherever it
    /// surfaced: direct I/O, the directory walker, or the zip layer.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            KeeperError::Io(e) => e.kind() == io::ErrorKind::PermissionDenied,
            KeeperError::Archive(zip::result::ZipError::Io(e)) => {
                e.kind() == io::ErrorKind::PermissionDenied
            }
            KeeperError::Walk(e) => e
                .io_error()
                .is_some_and(|io| io.kind() == io::ErrorKind::PermissionDenied),
            _ => false,
        }
    }
}
