pub mod media;
pub mod storage;

pub use media::{MediaError, MediaKind, MediaPolicy, UploadRequest};
