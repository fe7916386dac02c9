pub mod base;
pub mod disk;
pub mod input;

pub use base::{ReportStorage, StorageError};
pub use disk::DiskStorage;
pub use input::load_urls;
