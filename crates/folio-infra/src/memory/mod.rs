//! In-memory store implementations - the fallback when no database or
//! bucket is configured, and the stores used by handler tests.

mod media;
mod posts;

pub use media::InMemoryMediaStore;
pub use posts::InMemoryPostRepository;
