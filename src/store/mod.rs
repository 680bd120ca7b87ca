pub mod memory;
pub mod spanner;

pub use memory::MemoryStore;
pub use spanner::SpannerStore;

use anyhow::Result;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`KvStore`] operations.
///
/// Boxing keeps the trait object-safe so handlers can share an `Arc<dyn KvStore>`.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Key-value backend the request handlers read from and write to.
///
/// Keys and values are opaque text. A `put` fully replaces whatever was stored
/// under the key before. Errors are backend failures only; an absent key is
/// `Ok(None)`.
pub trait KvStore: Send + Sync + 'static {
    /// Look up the text stored under `key`.
    fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>>;

    /// Store `value` under `key`, overwriting any previous value.
    fn put<'a>(&'a self, key: &'a str, value: String) -> StoreFuture<'a, ()>;
}
