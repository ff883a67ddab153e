use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::athlete::{
    AthleteFilters, AthleteRecord, CreateAthleteRequest, UpdateAthleteRequest,
};
use crate::error::{Result, StorageError};
use crate::models::Athlete;
use crate::repository::reference;

const SELECT_RECORD: &str = "SELECT a.id, a.created_at, a.name, a.cpf, a.weight, a.height, a.sex, \
     c.name AS category_name, t.name AS training_center_name \
     FROM athletes a \
     JOIN categories c ON c.id = a.category_id \
     JOIN training_centers t ON t.id = a.training_center_id";

pub struct AthleteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List athletes with optional name/cpf filters, AND-combined.
    /// Order is whatever the store returns; pagination happens upstream.
    pub async fn list(&self, filters: &AthleteFilters) -> Result<Vec<AthleteRecord>> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_RECORD);
        let mut has_where = false;

        if let Some(name) = &filters.name {
            query.push(" WHERE a.name ILIKE ");
            query.push_bind(format!("%{}%", name));
            has_where = true;
        }

        if let Some(cpf) = &filters.cpf {
            query.push(if has_where { " AND " } else { " WHERE " });
            query.push("a.cpf = ");
            query.push_bind(cpf);
        }

        let athletes = query
            .build_query_as::<AthleteRecord>()
            .fetch_all(self.pool)
            .await?;

        Ok(athletes)
    }

    /// Fetch one athlete by id, joined with its reference names.
    pub async fn find_by_id(&self, id: Uuid) -> Result<AthleteRecord> {
        let athlete = sqlx::query_as::<_, AthleteRecord>(&format!("{SELECT_RECORD} WHERE a.id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(athlete)
    }

    /// Register a new athlete. Both reference names are resolved and the row
    /// inserted inside one transaction, so a failed lookup or a cpf collision
    /// leaves nothing behind.
    pub async fn create(&self, req: &CreateAthleteRequest) -> Result<Athlete> {
        let mut tx = self.pool.begin().await?;

        let category = reference::category_by_name(&mut *tx, &req.category.name).await?;
        let training_center =
            reference::training_center_by_name(&mut *tx, &req.training_center.name).await?;

        let athlete = Athlete {
            id: Uuid::new_v4(),
            created_at: Utc::now().naive_utc(),
            name: req.name.clone(),
            cpf: req.cpf.clone(),
            weight: req.weight,
            height: req.height,
            sex: req.sex.clone(),
            category_id: category.id,
            training_center_id: training_center.id,
        };

        let inserted = sqlx::query(
            "INSERT INTO athletes \
             (id, created_at, name, cpf, weight, height, sex, category_id, training_center_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(athlete.id)
        .bind(athlete.created_at)
        .bind(&athlete.name)
        .bind(&athlete.cpf)
        .bind(athlete.weight)
        .bind(athlete.height)
        .bind(&athlete.sex)
        .bind(athlete.category_id)
        .bind(athlete.training_center_id)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {
                tx.commit().await?;
                Ok(athlete)
            }
            Err(e) => {
                let e = StorageError::from(e);
                if e.is_unique_violation() {
                    Err(StorageError::DuplicateCpf(req.cpf.clone()))
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Apply a sparse update. Reference names included in the request are
    /// re-resolved the same way create resolves them; scalar fields present
    /// in the request overwrite, absent fields stay untouched.
    pub async fn update(&self, id: Uuid, req: &UpdateAthleteRequest) -> Result<AthleteRecord> {
        let mut tx = self.pool.begin().await?;

        let mut athlete = sqlx::query_as::<_, Athlete>(
            "SELECT id, created_at, name, cpf, weight, height, sex, category_id, training_center_id \
             FROM athletes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        if let Some(category) = &req.category {
            athlete.category_id = reference::category_by_name(&mut *tx, &category.name)
                .await?
                .id;
        }
        if let Some(training_center) = &req.training_center {
            athlete.training_center_id =
                reference::training_center_by_name(&mut *tx, &training_center.name)
                    .await?
                    .id;
        }

        req.apply_scalar_fields(&mut athlete);

        let updated = sqlx::query(
            "UPDATE athletes \
             SET name = $1, cpf = $2, weight = $3, height = $4, sex = $5, \
                 category_id = $6, training_center_id = $7 \
             WHERE id = $8",
        )
        .bind(&athlete.name)
        .bind(&athlete.cpf)
        .bind(athlete.weight)
        .bind(athlete.height)
        .bind(&athlete.sex)
        .bind(athlete.category_id)
        .bind(athlete.training_center_id)
        .bind(athlete.id)
        .execute(&mut *tx)
        .await;

        match updated {
            Ok(_) => {
                tx.commit().await?;
                self.find_by_id(id).await
            }
            Err(e) => {
                let e = StorageError::from(e);
                if e.is_unique_violation() {
                    Err(StorageError::DuplicateCpf(
                        req.cpf.clone().unwrap_or_else(|| athlete.cpf.clone()),
                    ))
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Delete by id. A zero-row delete means the id never existed.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM athletes WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
