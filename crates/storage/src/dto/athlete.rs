use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::Athlete;

/// Category reference as it appears in request and response bodies.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryRef {
    #[validate(length(min = 1, max = 50, message = "Category name must be between 1 and 50 characters"))]
    pub name: String,
}

/// Training center reference as it appears in request and response bodies.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TrainingCenterRef {
    #[validate(length(min = 1, max = 50, message = "Training center name must be between 1 and 50 characters"))]
    pub name: String,
}

/// Response containing athlete data with its resolved references.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteResponse {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub name: String,
    pub cpf: String,
    pub weight: f64,
    pub height: f64,
    pub sex: String,
    pub category: CategoryRef,
    pub training_center: TrainingCenterRef,
}

/// Athlete joined with its category and training center names, as fetched
/// for list/get responses.
#[derive(Debug, Clone, FromRow)]
pub struct AthleteRecord {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub name: String,
    pub cpf: String,
    pub weight: f64,
    pub height: f64,
    pub sex: String,
    pub category_name: String,
    pub training_center_name: String,
}

impl From<AthleteRecord> for AthleteResponse {
    fn from(record: AthleteRecord) -> Self {
        Self {
            id: record.id,
            created_at: record.created_at,
            name: record.name,
            cpf: record.cpf,
            weight: record.weight,
            height: record.height,
            sex: record.sex,
            category: CategoryRef {
                name: record.category_name,
            },
            training_center: TrainingCenterRef {
                name: record.training_center_name,
            },
        }
    }
}

impl AthleteResponse {
    /// Response for a freshly created athlete. The nested category and
    /// training center objects echo the request bodies rather than the
    /// resolved reference rows.
    pub fn created(athlete: Athlete, req: &CreateAthleteRequest) -> Self {
        Self {
            id: athlete.id,
            created_at: athlete.created_at,
            name: athlete.name,
            cpf: athlete.cpf,
            weight: athlete.weight,
            height: athlete.height,
            sex: athlete.sex,
            category: req.category.clone(),
            training_center: req.training_center.clone(),
        }
    }
}

/// Request payload for registering a new athlete
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAthleteRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 11, message = "cpf must have at most 11 characters"))]
    pub cpf: String,

    #[validate(range(min = 0.0, message = "Weight must not be negative"))]
    pub weight: f64,

    #[validate(range(min = 0.0, message = "Height must not be negative"))]
    pub height: f64,

    #[validate(custom(function = "validate_sex"))]
    pub sex: String,

    #[validate(nested)]
    pub category: CategoryRef,

    #[validate(nested)]
    pub training_center: TrainingCenterRef,
}

/// Sparse payload for partially updating an athlete. Only fields present in
/// the request are applied; `id` and `created_at` are never writable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAthleteRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 11))]
    pub cpf: Option<String>,

    #[validate(range(min = 0.0))]
    pub weight: Option<f64>,

    #[validate(range(min = 0.0))]
    pub height: Option<f64>,

    #[validate(custom(function = "validate_sex"))]
    pub sex: Option<String>,

    #[validate(nested)]
    pub category: Option<CategoryRef>,

    #[validate(nested)]
    pub training_center: Option<TrainingCenterRef>,
}

impl UpdateAthleteRequest {
    /// Apply the scalar fields present in this request onto the stored row.
    /// Reference fields are resolved separately by the repository.
    pub fn apply_scalar_fields(&self, athlete: &mut Athlete) {
        if let Some(name) = &self.name {
            athlete.name = name.clone();
        }
        if let Some(cpf) = &self.cpf {
            athlete.cpf = cpf.clone();
        }
        if let Some(weight) = self.weight {
            athlete.weight = weight;
        }
        if let Some(height) = self.height {
            athlete.height = height;
        }
        if let Some(sex) = &self.sex {
            athlete.sex = sex.clone();
        }
    }
}

/// Query filters for the list endpoint. The name filter keeps its original
/// wire spelling `nome`; it matches as a case-insensitive substring, while
/// `cpf` matches exactly.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct AthleteFilters {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    pub cpf: Option<String>,
}

fn validate_sex(sex: &str) -> Result<(), validator::ValidationError> {
    const VALID_SEXES: &[&str] = &["M", "F"];

    if VALID_SEXES.contains(&sex) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_sex"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_create_request() -> CreateAthleteRequest {
        CreateAthleteRequest {
            name: "Joao".to_string(),
            cpf: "12345678900".to_string(),
            weight: 75.5,
            height: 1.70,
            sex: "M".to_string(),
            category: CategoryRef {
                name: "Scale".to_string(),
            },
            training_center: TrainingCenterRef {
                name: "CT King".to_string(),
            },
        }
    }

    fn sample_athlete() -> Athlete {
        Athlete {
            id: Uuid::new_v4(),
            created_at: chrono::NaiveDate::from_ymd_opt(2024, 5, 10)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            name: "Joao".to_string(),
            cpf: "12345678900".to_string(),
            weight: 75.5,
            height: 1.70,
            sex: "M".to_string(),
            category_id: 1,
            training_center_id: 1,
        }
    }

    #[test]
    fn create_request_validates() {
        assert!(sample_create_request().validate().is_ok());

        let mut bad_sex = sample_create_request();
        bad_sex.sex = "X".to_string();
        assert!(bad_sex.validate().is_err());

        let mut empty_name = sample_create_request();
        empty_name.name.clear();
        assert!(empty_name.validate().is_err());

        let mut long_cpf = sample_create_request();
        long_cpf.cpf = "123456789001234".to_string();
        assert!(long_cpf.validate().is_err());

        let mut negative_weight = sample_create_request();
        negative_weight.weight = -1.0;
        assert!(negative_weight.validate().is_err());

        let mut empty_category = sample_create_request();
        empty_category.category.name.clear();
        assert!(empty_category.validate().is_err());
    }

    #[test]
    fn created_response_echoes_request_references() {
        let req = sample_create_request();
        let athlete = sample_athlete();
        let id = athlete.id;

        let response = AthleteResponse::created(athlete, &req);

        assert_eq!(response.id, id);
        assert_eq!(response.category.name, "Scale");
        assert_eq!(response.training_center.name, "CT King");
    }

    #[test]
    fn sparse_update_touches_only_present_fields() {
        let mut athlete = sample_athlete();
        let before = athlete.clone();

        let update = UpdateAthleteRequest {
            weight: Some(80.5),
            ..Default::default()
        };
        update.apply_scalar_fields(&mut athlete);

        assert_eq!(athlete.weight, 80.5);
        assert_eq!(athlete.id, before.id);
        assert_eq!(athlete.created_at, before.created_at);
        assert_eq!(athlete.name, before.name);
        assert_eq!(athlete.cpf, before.cpf);
        assert_eq!(athlete.height, before.height);
        assert_eq!(athlete.sex, before.sex);
    }

    #[test]
    fn sparse_update_deserializes_missing_fields_as_none() {
        let update: UpdateAthleteRequest =
            serde_json::from_value(json!({ "weight": 80.5 })).unwrap();

        assert_eq!(update.weight, Some(80.5));
        assert!(update.name.is_none());
        assert!(update.cpf.is_none());
        assert!(update.category.is_none());
        assert!(update.training_center.is_none());
    }

    #[test]
    fn filters_accept_nome_wire_name() {
        let filters: AthleteFilters =
            serde_json::from_value(json!({ "nome": "ana", "cpf": "12345678900" })).unwrap();

        assert_eq!(filters.name.as_deref(), Some("ana"));
        assert_eq!(filters.cpf.as_deref(), Some("12345678900"));
    }

    #[test]
    fn record_converts_to_response_with_nested_references() {
        let record = AthleteRecord {
            id: Uuid::new_v4(),
            created_at: chrono::NaiveDate::from_ymd_opt(2024, 5, 10)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            name: "Joao".to_string(),
            cpf: "12345678900".to_string(),
            weight: 75.5,
            height: 1.70,
            sex: "M".to_string(),
            category_name: "Scale".to_string(),
            training_center_name: "CT King".to_string(),
        };

        let response = AthleteResponse::from(record);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["category"]["name"], "Scale");
        assert_eq!(value["training_center"]["name"], "CT King");
        assert_eq!(value["cpf"], "12345678900");
    }
}
