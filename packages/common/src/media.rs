//! Upload acceptance rules for course media.
//!
//! A [`MediaPolicy`] is a pure predicate over an [`UploadRequest`]: it never
//! touches storage, so callers run it before any write.

use std::fmt;

use thiserror::Error;

/// Size ceiling for media attached to a course (15 MiB).
pub const COURSE_MEDIA_MAX_BYTES: u64 = 15 * 1024 * 1024;

const MIB: u64 = 1024 * 1024;

/// Broad class of an accepted media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An accepted on-disk format: the extensions and MIME names that denote it.
struct MediaFormat {
    kind: MediaKind,
    extensions: &'static [&'static str],
    mime_types: &'static [&'static str],
}

const FORMATS: &[MediaFormat] = &[
    MediaFormat {
        kind: MediaKind::Image,
        extensions: &["jpg", "jpeg"],
        mime_types: &["image/jpeg", "image/jpg"],
    },
    MediaFormat {
        kind: MediaKind::Image,
        extensions: &["png"],
        mime_types: &["image/png"],
    },
    MediaFormat {
        kind: MediaKind::Image,
        extensions: &["gif"],
        mime_types: &["image/gif"],
    },
    MediaFormat {
        kind: MediaKind::Video,
        extensions: &["mp4"],
        mime_types: &["video/mp4"],
    },
    MediaFormat {
        kind: MediaKind::Video,
        extensions: &["mov"],
        mime_types: &["video/quicktime", "video/mov"],
    },
    MediaFormat {
        kind: MediaKind::Audio,
        extensions: &["mp3"],
        mime_types: &["audio/mpeg", "audio/mp3"],
    },
    MediaFormat {
        kind: MediaKind::Audio,
        extensions: &["wav"],
        mime_types: &["audio/wav", "audio/x-wav", "audio/wave"],
    },
];

/// Reasons an upload is refused before it reaches storage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MediaError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("Only image, video, and audio files are allowed")]
    UnsupportedType,

    #[error("File too large. Max {} allowed.", format_limit(.limit))]
    TooLarge { actual: u64, limit: u64 },

    #[error("{0}")]
    InvalidFilename(&'static str),
}

fn format_limit(limit: &u64) -> String {
    let limit = *limit;
    if limit >= MIB && limit % MIB == 0 {
        format!("{} MB", limit / MIB)
    } else {
        format!("{limit} bytes")
    }
}

/// One incoming file transfer, fully buffered.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

impl UploadRequest {
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Type and size rules applied to one upload route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaPolicy {
    max_bytes: u64,
}

impl MediaPolicy {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// The policy for media attached to a course.
    pub fn course_media() -> Self {
        Self::new(COURSE_MEDIA_MAX_BYTES)
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Accept or reject an upload. Oversized payloads are refused whatever
    /// their type.
    pub fn validate(&self, upload: &UploadRequest) -> Result<MediaKind, MediaError> {
        self.check_size(upload.len())?;
        validate_filename(&upload.filename)?;
        classify(&upload.filename, &upload.content_type)
    }

    /// Size half of [`validate`](Self::validate), usable while a body is
    /// still arriving.
    pub fn check_size(&self, actual: u64) -> Result<(), MediaError> {
        if actual > self.max_bytes {
            return Err(MediaError::TooLarge {
                actual,
                limit: self.max_bytes,
            });
        }
        Ok(())
    }
}

impl Default for MediaPolicy {
    fn default() -> Self {
        Self::course_media()
    }
}

/// Resolve the media class of a file. The extension and the declared MIME
/// type must each name an allowed format.
pub fn classify(filename: &str, content_type: &str) -> Result<MediaKind, MediaError> {
    let ext = extension(filename).ok_or(MediaError::UnsupportedType)?;
    let by_ext = FORMATS
        .iter()
        .find(|f| f.extensions.contains(&ext.as_str()))
        .ok_or(MediaError::UnsupportedType)?;

    let mime = essence(content_type);
    if !FORMATS.iter().any(|f| f.mime_types.contains(&mime.as_str())) {
        return Err(MediaError::UnsupportedType);
    }

    Ok(by_ext.kind)
}

/// Filenames are kept verbatim; only values that cannot be carried in a
/// response header are refused.
pub fn validate_filename(filename: &str) -> Result<(), MediaError> {
    if filename.trim().is_empty() {
        return Err(MediaError::InvalidFilename("Filename cannot be empty"));
    }
    if filename.chars().count() > 255 {
        return Err(MediaError::InvalidFilename(
            "Filename must be at most 255 characters",
        ));
    }
    if filename.chars().any(|c| c.is_control()) {
        return Err(MediaError::InvalidFilename(
            "Invalid filename: control characters are not allowed",
        ));
    }
    Ok(())
}

fn extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.trim().rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// `Video/MP4; codecs="avc1"` -> `video/mp4`
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
