//! SQL post repository backed by SeaORM.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, SqlErr,
};

use folio_core::domain::{NewPost, Post, PostChanges, PostQuery, PostSummary};
use folio_core::error::RepoError;
use folio_core::ports::PostRepository;

use super::entity::post::{self, ActiveModel, Entity as PostEntity, SummaryRow};

/// Post repository over a SeaORM connection.
pub struct SqlPostRepository {
    pub(crate) db: DbConn,
}

impl SqlPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn map_db_err(err: DbErr) -> RepoError {
    classify(err.sql_err(), err)
}

/// Constraint violations first, then connection versus query failures.
pub(crate) fn classify(sql_err: Option<SqlErr>, err: DbErr) -> RepoError {
    if let Some(SqlErr::UniqueConstraintViolation(msg)) = sql_err {
        return RepoError::Constraint(msg);
    }

    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn list(&self, query: PostQuery) -> Result<Vec<PostSummary>, RepoError> {
        let mut select = PostEntity::find().select_only().columns([
            post::Column::Id,
            post::Column::Slug,
            post::Column::Title,
            post::Column::Excerpt,
            post::Column::CoverImage,
            post::Column::Published,
            post::Column::CreatedAt,
            post::Column::UpdatedAt,
        ]);

        if !query.include_unpublished {
            select = select.filter(post::Column::Published.eq(true));
        }

        let rows = select
            .order_by_desc(post::Column::CreatedAt)
            .limit(query.limit.map(u64::from))
            .into_model::<SummaryRow>()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        tracing::debug!(slug = %new_post.slug, "Inserting post");

        let model = ActiveModel::for_insert(new_post, Utc::now().fixed_offset())
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, slug: &str, changes: PostChanges) -> Result<(), RepoError> {
        let mut update = PostEntity::update_many();

        if let Some(title) = changes.title {
            update = update.col_expr(post::Column::Title, Expr::value(title));
        }
        if let Some(new_slug) = changes.slug {
            update = update.col_expr(post::Column::Slug, Expr::value(new_slug));
        }
        if let Some(excerpt) = changes.excerpt {
            update = update.col_expr(post::Column::Excerpt, Expr::value(excerpt));
        }
        if let Some(content) = changes.content {
            update = update.col_expr(post::Column::Content, Expr::value(content));
        }
        if let Some(cover_image) = changes.cover_image {
            update = update.col_expr(post::Column::CoverImage, Expr::value(cover_image));
        }
        if let Some(published) = changes.published {
            update = update.col_expr(post::Column::Published, Expr::value(published));
        }

        let result = update
            .col_expr(
                post::Column::UpdatedAt,
                Expr::value(Utc::now().fixed_offset()),
            )
            .filter(post::Column::Slug.eq(slug))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, slug: &str) -> Result<(), RepoError> {
        let result = PostEntity::delete_many()
            .filter(post::Column::Slug.eq(slug))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
