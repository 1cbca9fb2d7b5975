use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::error::StorageError;
use super::hash::ContentHash;

pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Immutable blobs keyed by the SHA-256 of their content.
///
/// Writing the same bytes twice yields the same hash and a single stored copy.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes and return their content hash.
    async fn put(&self, data: &[u8]) -> Result<ContentHash, StorageError>;

    /// Open a blob for streaming.
    async fn get_stream(&self, hash: &ContentHash) -> Result<BoxReader, StorageError>;

    /// Whether a blob with this hash is already stored.
    async fn exists(&self, hash: &ContentHash) -> Result<bool, StorageError>;
}
