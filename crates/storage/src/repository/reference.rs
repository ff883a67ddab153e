use sqlx::PgConnection;

use crate::error::{ReferenceKind, Result, StorageError};
use crate::models::{Category, TrainingCenter};

/// Resolve a category by its unique name. Missing names are a client error,
/// not a storage failure.
pub async fn category_by_name(conn: &mut PgConnection, name: &str) -> Result<Category> {
    sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE name = $1")
        .bind(name)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| StorageError::ReferenceNotFound {
            kind: ReferenceKind::Category,
            name: name.to_string(),
        })
}

/// Resolve a training center by its unique name.
pub async fn training_center_by_name(conn: &mut PgConnection, name: &str) -> Result<TrainingCenter> {
    sqlx::query_as::<_, TrainingCenter>("SELECT id, name FROM training_centers WHERE name = $1")
        .bind(name)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| StorageError::ReferenceNotFound {
            kind: ReferenceKind::TrainingCenter,
            name: name.to_string(),
        })
}
