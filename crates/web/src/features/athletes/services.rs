use sqlx::PgPool;
use storage::{
    dto::athlete::{AthleteFilters, AthleteRecord, CreateAthleteRequest, UpdateAthleteRequest},
    error::Result,
    models::Athlete,
    repository::athlete::AthleteRepository,
};
use uuid::Uuid;

/// List athletes matching the optional filters
pub async fn list_athletes(pool: &PgPool, filters: &AthleteFilters) -> Result<Vec<AthleteRecord>> {
    let repo = AthleteRepository::new(pool);
    repo.list(filters).await
}

/// Get athlete by id
pub async fn get_athlete_by_id(pool: &PgPool, id: Uuid) -> Result<AthleteRecord> {
    let repo = AthleteRepository::new(pool);
    repo.find_by_id(id).await
}

/// Register a new athlete
pub async fn create_athlete(pool: &PgPool, request: &CreateAthleteRequest) -> Result<Athlete> {
    let repo = AthleteRepository::new(pool);
    repo.create(request).await
}

/// Partially update an athlete
pub async fn update_athlete(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateAthleteRequest,
) -> Result<AthleteRecord> {
    let repo = AthleteRepository::new(pool);
    repo.update(id, request).await
}

/// Delete an athlete
pub async fn delete_athlete(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = AthleteRepository::new(pool);
    repo.delete(id).await
}
