pub mod backup;
pub mod compress;
pub mod scheduler;
pub mod version;
