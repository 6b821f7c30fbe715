//! Drivers table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DRIVERS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS drivers CASCADE;")
            .await?;
        Ok(())
    }
}

const DRIVERS_SQL: &str = r"
-- Driver records with document-shaped substructures stored as JSONB
CREATE TABLE drivers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name TEXT NOT NULL DEFAULT '',
    phone TEXT NOT NULL DEFAULT '',
    governorate TEXT NOT NULL DEFAULT '',
    area TEXT NOT NULL DEFAULT '',
    street_address TEXT NOT NULL DEFAULT '',
    account_number TEXT NOT NULL DEFAULT '',
    bank_name TEXT NOT NULL DEFAULT '',
    account_holder TEXT NOT NULL DEFAULT '',
    iban TEXT NOT NULL DEFAULT '',
    car_type TEXT NOT NULL DEFAULT '',
    car_number TEXT NOT NULL DEFAULT '',
    has_ac TEXT NOT NULL DEFAULT '',
    shift_type TEXT NOT NULL DEFAULT '',
    license_expiry_date TEXT NOT NULL DEFAULT '',
    is_working TEXT NOT NULL DEFAULT '',
    company TEXT NOT NULL DEFAULT '',
    start_time TEXT NOT NULL DEFAULT '',
    end_time TEXT NOT NULL DEFAULT '',
    is_rented BOOLEAN NOT NULL DEFAULT FALSE,
    car_owner_name TEXT NOT NULL DEFAULT '',
    car_owner_phone TEXT NOT NULL DEFAULT '',
    route JSONB,
    additional_shifts JSONB NOT NULL DEFAULT '[]',
    personal_image_url TEXT,
    personal_license_urls JSONB NOT NULL DEFAULT '[]',
    car_license_urls JSONB NOT NULL DEFAULT '[]',
    id_card_urls JSONB NOT NULL DEFAULT '[]',
    car_images_urls JSONB NOT NULL DEFAULT '[]',
    personal_image_public_id TEXT,
    personal_license_public_ids JSONB NOT NULL DEFAULT '[]',
    car_license_public_ids JSONB NOT NULL DEFAULT '[]',
    id_card_public_ids JSONB NOT NULL DEFAULT '[]',
    car_images_public_ids JSONB NOT NULL DEFAULT '[]',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Listing is always newest first
CREATE INDEX idx_drivers_created ON drivers(created_at DESC);
";
