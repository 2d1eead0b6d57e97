//! Blog post handlers.

use actix_web::{HttpRequest, HttpResponse, web};

use folio_core::domain::{NewPost, PostChanges, PostQuery};
use folio_shared::dto::{
    CreatePostRequest, CreatedResponse, ListPostsParams, PostListResponse, PostResponse,
    SuccessResponse, UpdatePostRequest,
};

use crate::caching::{CachePolicy, conditional_json};
use crate::middleware::auth::{Admin, AuthStatus};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_not_found() -> AppError {
    AppError::NotFound("Post not found".to_string())
}

/// GET /api/posts
///
/// Drafts are listed only for `?all=true` from an authenticated caller.
pub async fn list_posts(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthStatus,
    params: web::Query<ListPostsParams>,
) -> AppResult<HttpResponse> {
    let query = PostQuery {
        include_unpublished: params.wants_unpublished() && auth.is_authenticated(),
        limit: params.limit,
    };

    let posts = state.posts.list(query).await?;

    // Only the bare listing is shared-cached; `all` is the admin console's URL.
    let policy = if params.all.is_some() || auth.is_authenticated() {
        CachePolicy::no_store()
    } else if query.limit.is_some() {
        CachePolicy::revalidate()
    } else {
        CachePolicy::public_content()
    };

    conditional_json(&req, &PostListResponse { posts }, policy)
}

/// GET /api/posts/{slug}
pub async fn get_post(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthStatus,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .find_by_slug(&slug)
        .await?
        .filter(|post| post.published || auth.is_authenticated())
        .ok_or_else(post_not_found)?;

    let policy = if post.published && !auth.is_authenticated() {
        CachePolicy::public_content()
    } else {
        CachePolicy::no_store()
    };

    conditional_json(&req, &PostResponse { post }, policy)
}

/// POST /api/posts
pub async fn create_post(
    _admin: Admin,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let new_post = NewPost::from(body.into_inner());
    new_post.validate()?;

    let post = state.posts.create(new_post).await?;
    tracing::info!(id = post.id, slug = %post.slug, "Post created");

    Ok(HttpResponse::Created().json(CreatedResponse {
        success: true,
        id: post.id,
    }))
}

/// PUT /api/posts/{slug}
pub async fn update_post(
    _admin: Admin,
    state: web::Data<AppState>,
    slug: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let changes = PostChanges::from(body.into_inner());
    if changes.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }
    changes.validate()?;

    state.posts.update(&slug, changes).await?;
    tracing::info!(slug = %slug, "Post updated");

    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}

/// DELETE /api/posts/{slug}
pub async fn delete_post(
    _admin: Admin,
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.posts.delete(&slug).await?;
    tracing::info!(slug = %slug, "Post deleted");

    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}
