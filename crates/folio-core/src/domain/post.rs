use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Post entity - a blog post as stored and served in full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Listing view of this post, without the body.
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            id: self.id,
            slug: self.slug.clone(),
            title: self.title.clone(),
            excerpt: self.excerpt.clone(),
            cover_image: self.cover_image.clone(),
            published: self.published,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A post without its content, as returned by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostQuery {
    /// Include drafts. Only honoured for authenticated callers.
    pub include_unpublished: bool,
    pub limit: Option<u32>,
}

/// A post about to be created. The store assigns `id` and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    pub published: bool,
}

impl NewPost {
    /// Check the fields every post must carry.
    pub fn validate(&self) -> Result<(), DomainError> {
        let missing = [
            self.title.trim().is_empty(),
            self.slug.trim().is_empty(),
            self.content.trim().is_empty(),
        ];

        if missing.iter().any(|m| *m) {
            return Err(DomainError::Validation(
                "Title, slug, and content are required".to_string(),
            ));
        }

        Ok(())
    }

    /// Materialize the post with a store-assigned id.
    pub fn into_post(self, id: i32, now: DateTime<Utc>) -> Post {
        Post {
            id,
            slug: self.slug,
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            cover_image: self.cover_image,
            published: self.published,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. `None` leaves a field untouched; for the nullable
/// columns `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<Option<String>>,
    pub content: Option<String>,
    pub cover_image: Option<Option<String>>,
    pub published: Option<bool>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.slug.is_none()
            && self.title.is_none()
            && self.excerpt.is_none()
            && self.content.is_none()
            && self.cover_image.is_none()
            && self.published.is_none()
    }

    /// Supplied required fields must not be blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        let blank = [&self.title, &self.slug, &self.content]
            .into_iter()
            .flatten()
            .any(|value| value.trim().is_empty());

        if blank {
            return Err(DomainError::Validation(
                "Title, slug, and content cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Apply the supplied fields and bump `updated_at`.
    pub fn apply(self, post: &mut Post, now: DateTime<Utc>) {
        if let Some(slug) = self.slug {
            post.slug = slug;
        }
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(excerpt) = self.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(cover_image) = self.cover_image {
            post.cover_image = cover_image;
        }
        if let Some(published) = self.published {
            post.published = published;
        }
        post.updated_at = now;
    }
}
