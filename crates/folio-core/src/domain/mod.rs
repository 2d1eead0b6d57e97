//! Domain entities - the core business objects.

mod media;
mod post;

pub use media::{
    ALLOWED_CONTENT_TYPES, MAX_UPLOAD_BYTES, MediaObject, UPLOAD_PREFIX, Upload, check_content_type,
    check_size, storage_key,
};
pub use post::{NewPost, Post, PostChanges, PostQuery, PostSummary};
