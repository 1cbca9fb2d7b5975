use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub created_by: i32,
    #[sea_orm(belongs_to, from = "created_by", to = "id")]
    pub owner: HasOne<super::user::Entity>,

    // Media columns are written together by a single UPDATE: either all
    // NULL or all set.
    /// SHA-256 of the payload in the blob store.
    pub media_hash: Option<String>,
    pub media_content_type: Option<String>,
    /// Original upload filename, verbatim.
    pub media_filename: Option<String>,
    pub media_size: Option<i64>,

    #[sea_orm(column_type = "Text", nullable)]
    pub transcript: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub summary: Option<String>,
    /// JSON array of `{question, options, correct_answer}`.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub quiz: Option<Json>,

    #[sea_orm(has_many)]
    pub enrollments: HasMany<super::enrollment::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
