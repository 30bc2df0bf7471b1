//! In-memory backends.
//!
//! These keep everything in process memory behind a `tokio` read-write lock, and are the default backends of the
//! server binary. Data does not survive a restart; a durable backend plugs in by implementing the traits in
//! [`crate::traits`].
mod content;
mod media;

pub use content::MemoryContentStore;
pub use media::MemoryMediaStore;
