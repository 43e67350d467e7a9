pub mod backup;
pub mod error;
