use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;

use crate::entity::{course, enrollment};

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync only creates unique keys, so plain lookup indexes
/// are created here on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Course listing: ORDER BY created_at DESC
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_course_created_at")
        .table(course::Entity)
        .col(course::Column::CreatedAt)
        .to_string(PostgresQueryBuilder);
    create_index(db, "idx_course_created_at", &stmt).await;

    // Dashboard queries: WHERE user_id = ? ORDER BY updated_at DESC
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_enrollment_user_updated")
        .table(enrollment::Entity)
        .col(enrollment::Column::UserId)
        .col(enrollment::Column::UpdatedAt)
        .to_string(PostgresQueryBuilder);
    create_index(db, "idx_enrollment_user_updated", &stmt).await;

    Ok(())
}

async fn create_index(db: &DatabaseConnection, name: &str, stmt: &str) {
    match db.execute_unprepared(stmt).await {
        Ok(_) => info!("Ensured index {} exists", name),
        Err(e) => tracing::warn!("Failed to create index {}: {}", name, e),
    }
}
