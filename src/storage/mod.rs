//! Record persistence backends.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;
pub use traits::RecordStore;
