use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostChanges, PostQuery, PostSummary};
use crate::error::RepoError;

/// Post repository - the only table the blog owns.
///
/// Posts are addressed by slug; the numeric id is informational.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// List summaries, newest first.
    async fn list(&self, query: PostQuery) -> Result<Vec<PostSummary>, RepoError>;

    /// Find a post by slug, regardless of its published flag.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Insert a post. A taken slug yields [`RepoError::Constraint`].
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Apply a partial update. Zero affected rows yields [`RepoError::NotFound`].
    async fn update(&self, slug: &str, changes: PostChanges) -> Result<(), RepoError>;

    /// Delete by slug. Zero affected rows yields [`RepoError::NotFound`].
    async fn delete(&self, slug: &str) -> Result<(), RepoError>;

    /// Backend name for health reporting.
    fn backend(&self) -> &'static str;
}
