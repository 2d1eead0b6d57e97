//! Object storage - S3-compatible buckets (AWS S3, Cloudflare R2, MinIO).

mod s3;

pub use s3::{S3Config, S3MediaStore};
