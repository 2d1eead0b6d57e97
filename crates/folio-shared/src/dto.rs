//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

use folio_core::domain::{NewPost, Post, PostChanges, PostSummary};

/// Request to create a post. Fields are optional on the wire so that
/// missing values surface as a validation error rather than a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub cover_image: Option<String>,
    pub published: Option<bool>,
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            slug: req.slug.unwrap_or_default(),
            title: req.title.unwrap_or_default(),
            excerpt: req.excerpt.filter(|e| !e.is_empty()),
            content: req.content.unwrap_or_default(),
            cover_image: req.cover_image.filter(|c| !c.is_empty()),
            published: req.published.unwrap_or(false),
        }
    }
}

/// Partial update. An explicit `null` clears `excerpt` / `cover_image`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub excerpt: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub cover_image: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

impl From<UpdatePostRequest> for PostChanges {
    fn from(req: UpdatePostRequest) -> Self {
        Self {
            slug: req.slug,
            title: req.title,
            excerpt: req.excerpt,
            content: req.content,
            cover_image: req.cover_image,
            published: req.published,
        }
    }
}

/// Query string of `GET /api/posts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPostsParams {
    pub limit: Option<u32>,
    /// `all=true` asks for drafts as well.
    pub all: Option<String>,
}

impl ListPostsParams {
    pub fn wants_unpublished(&self) -> bool {
        self.all.as_deref() == Some("true")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<PostSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub post: Post,
}

/// Response to a successful create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Response to a stored upload. `url` is served by `GET /media/{key}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
    pub key: String,
}

/// Response of `GET /api/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
}
