//! Driver repository for database operations.
//!
//! Implements driver CRUD operations using SeaORM.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde_json::json;
use uuid::Uuid;

use crate::entities::drivers;
use bluebird_core::driver::{
    Driver, DriverError, DriverRepository as DriverRepoTrait, NewDriver, Route, Shift,
};

/// Driver repository implementation.
#[derive(Debug, Clone)]
pub struct DriverRepository {
    db: DatabaseConnection,
}

impl DriverRepository {
    /// Create a new driver repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl DriverRepoTrait for DriverRepository {
    async fn create(&self, input: NewDriver) -> Result<Driver, DriverError> {
        let now = Utc::now();
        let active_model = drivers::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            phone: Set(input.phone),
            governorate: Set(input.governorate),
            area: Set(input.area),
            street_address: Set(input.street_address),
            account_number: Set(input.account_number),
            bank_name: Set(input.bank_name),
            account_holder: Set(input.account_holder),
            iban: Set(input.iban),
            car_type: Set(input.car_type),
            car_number: Set(input.car_number),
            has_ac: Set(input.has_ac),
            shift_type: Set(input.shift_type),
            license_expiry_date: Set(input.license_expiry_date),
            is_working: Set(input.is_working),
            company: Set(input.company),
            start_time: Set(input.start_time),
            end_time: Set(input.end_time),
            is_rented: Set(input.is_rented),
            car_owner_name: Set(input.car_owner_name),
            car_owner_phone: Set(input.car_owner_phone),
            route: Set(input.route.as_ref().map(to_json)),
            additional_shifts: Set(to_json(&input.additional_shifts)),
            personal_image_url: Set(input.personal_image_url),
            personal_license_urls: Set(to_json(&input.personal_license_urls)),
            car_license_urls: Set(to_json(&input.car_license_urls)),
            id_card_urls: Set(to_json(&input.id_card_urls)),
            car_images_urls: Set(to_json(&input.car_images_urls)),
            personal_image_public_id: Set(input.personal_image_public_id),
            personal_license_public_ids: Set(to_json(&input.personal_license_public_ids)),
            car_license_public_ids: Set(to_json(&input.car_license_public_ids)),
            id_card_public_ids: Set(to_json(&input.id_card_public_ids)),
            car_images_public_ids: Set(to_json(&input.car_images_public_ids)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| DriverError::repository(e.to_string()))?;

        Ok(to_domain(model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, DriverError> {
        let model = drivers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DriverError::repository(e.to_string()))?;

        Ok(model.map(to_domain))
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Driver>, DriverError> {
        let models = drivers::Entity::find()
            .order_by_desc(drivers::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DriverError::repository(e.to_string()))?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DriverError> {
        let result = drivers::Entity::delete_many()
            .filter(drivers::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| DriverError::repository(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

/// Serialize a value into a JSONB column, falling back to an empty array.
fn to_json<T: serde::Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or_else(|_| json!([]))
}

/// Deserialize a JSONB list column, tolerating unexpected shapes.
fn string_list(value: serde_json::Value) -> Vec<String> {
    serde_json::from_value(value).unwrap_or_default()
}

/// Convert database model to domain model.
fn to_domain(model: drivers::Model) -> Driver {
    Driver {
        id: model.id,
        name: model.name,
        phone: model.phone,
        governorate: model.governorate,
        area: model.area,
        street_address: model.street_address,
        account_number: model.account_number,
        bank_name: model.bank_name,
        account_holder: model.account_holder,
        iban: model.iban,
        car_type: model.car_type,
        car_number: model.car_number,
        has_ac: model.has_ac,
        shift_type: model.shift_type,
        license_expiry_date: model.license_expiry_date,
        is_working: model.is_working,
        company: model.company,
        start_time: model.start_time,
        end_time: model.end_time,
        is_rented: model.is_rented,
        car_owner_name: model.car_owner_name,
        car_owner_phone: model.car_owner_phone,
        route: model
            .route
            .and_then(|v| serde_json::from_value::<Route>(v).ok()),
        additional_shifts: serde_json::from_value::<Vec<Shift>>(model.additional_shifts)
            .unwrap_or_default(),
        personal_image_url: model.personal_image_url,
        personal_license_urls: string_list(model.personal_license_urls),
        car_license_urls: string_list(model.car_license_urls),
        id_card_urls: string_list(model.id_card_urls),
        car_images_urls: string_list(model.car_images_urls),
        personal_image_public_id: model.personal_image_public_id,
        personal_license_public_ids: string_list(model.personal_license_public_ids),
        car_license_public_ids: string_list(model.car_license_public_ids),
        id_card_public_ids: string_list(model.id_card_public_ids),
        car_images_public_ids: string_list(model.car_images_public_ids),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
