//! `SeaORM` Entity for the drivers table.
//!
//! Nested document structures (route, additional shifts, URL and handle
//! lists) are stored as JSONB columns.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "drivers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub governorate: String,
    pub area: String,
    pub street_address: String,
    pub account_number: String,
    pub bank_name: String,
    pub account_holder: String,
    pub iban: String,
    pub car_type: String,
    pub car_number: String,
    pub has_ac: String,
    pub shift_type: String,
    pub license_expiry_date: String,
    pub is_working: String,
    pub company: String,
    pub start_time: String,
    pub end_time: String,
    pub is_rented: bool,
    pub car_owner_name: String,
    pub car_owner_phone: String,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub route: Option<Json>,
    #[sea_orm(column_type = "JsonBinary")]
    pub additional_shifts: Json,
    pub personal_image_url: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub personal_license_urls: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub car_license_urls: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub id_card_urls: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub car_images_urls: Json,
    pub personal_image_public_id: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub personal_license_public_ids: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub car_license_public_ids: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub id_card_public_ids: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub car_images_public_ids: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
