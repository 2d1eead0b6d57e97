//! In-memory post repository - used when no database is configured.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use folio_core::domain::{NewPost, Post, PostChanges, PostQuery, PostSummary};
use folio_core::error::RepoError;
use folio_core::ports::PostRepository;

#[derive(Default)]
struct Table {
    rows: Vec<Post>,
    next_id: i32,
}

impl Table {
    fn slug_taken(&self, slug: &str, except_id: Option<i32>) -> bool {
        self.rows
            .iter()
            .any(|p| p.slug == slug && Some(p.id) != except_id)
    }
}

/// Post table held in process memory behind an async RwLock.
///
/// Each instance is an independent store; the application state owns the
/// handle. Data is lost on process restart.
pub struct InMemoryPostRepository {
    table: RwLock<Table>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Number of stored posts.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self, query: PostQuery) -> Result<Vec<PostSummary>, RepoError> {
        let table = self.table.read().await;

        let mut posts: Vec<&Post> = table
            .rows
            .iter()
            .filter(|p| query.include_unpublished || p.published)
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let limit = query.limit.map_or(usize::MAX, |l| l as usize);
        Ok(posts.into_iter().take(limit).map(Post::summary).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|p| p.slug == slug).cloned())
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;

        if table.slug_taken(&new_post.slug, None) {
            return Err(RepoError::Constraint(format!(
                "slug '{}' already exists",
                new_post.slug
            )));
        }

        let id = table.next_id;
        table.next_id += 1;

        let post = new_post.into_post(id, Utc::now());
        table.rows.push(post.clone());
        Ok(post)
    }

    async fn update(&self, slug: &str, changes: PostChanges) -> Result<(), RepoError> {
        let mut table = self.table.write().await;

        let index = table
            .rows
            .iter()
            .position(|p| p.slug == slug)
            .ok_or(RepoError::NotFound)?;

        if let Some(new_slug) = &changes.slug {
            let id = table.rows[index].id;
            if table.slug_taken(new_slug, Some(id)) {
                return Err(RepoError::Constraint(format!(
                    "slug '{new_slug}' already exists"
                )));
            }
        }

        changes.apply(&mut table.rows[index], Utc::now());
        Ok(())
    }

    async fn delete(&self, slug: &str) -> Result<(), RepoError> {
        let mut table = self.table.write().await;

        let before = table.rows.len();
        table.rows.retain(|p| p.slug != slug);

        if table.rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
