use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Athlete row as stored. `id` and `created_at` are assigned at creation and
/// never change; the reference columns hold resolved foreign keys.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Athlete {
    pub id: Uuid,
    pub created_at: chrono::NaiveDateTime,
    pub name: String,
    pub cpf: String,
    pub weight: f64,
    pub height: f64,
    pub sex: String,
    pub category_id: i32,
    pub training_center_id: i32,
}
