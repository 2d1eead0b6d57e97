//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, FromQueryResult, Set};

use folio_core::domain::{NewPost, Post, PostSummary};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub slug: String,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub excerpt: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub cover_image: Option<String>,
    pub published: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Listing row - every column except `content`.
#[derive(Clone, Debug, FromQueryResult)]
pub struct SummaryRow {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub published: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            slug: model.slug,
            title: model.title,
            excerpt: model.excerpt,
            content: model.content,
            cover_image: model.cover_image,
            published: model.published,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<SummaryRow> for PostSummary {
    fn from(row: SummaryRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            title: row.title,
            excerpt: row.excerpt,
            cover_image: row.cover_image,
            published: row.published,
            created_at: row.created_at.into(),
            updated_at: row.updated_at.into(),
        }
    }
}

impl ActiveModel {
    /// Insert model for a new post; the database assigns `id`.
    pub fn for_insert(post: NewPost, now: DateTimeWithTimeZone) -> Self {
        Self {
            id: NotSet,
            slug: Set(post.slug),
            title: Set(post.title),
            excerpt: Set(post.excerpt),
            content: Set(post.content),
            cover_image: Set(post.cover_image),
            published: Set(post.published),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}
