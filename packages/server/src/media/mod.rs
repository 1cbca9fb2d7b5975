//! Course media lifecycle: validated upload, storage, and delivery.

mod delivery;
mod store;
mod upload;

pub use delivery::{Disposition, content_disposition_value, media_response};
pub use store::{CourseMediaStore, DbCourseMediaStore, MediaInfo};
pub use upload::{attach_media, read_upload};
