//! Driver domain types.
//!
//! Field names serialize in the camelCase form the HTTP clients already
//! speak; the nested route structures are document-shaped value objects
//! owned entirely by the driver record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::Artifact;

/// A host assigned to a waypoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Host {
    /// Client-side identifier.
    pub id: String,
    /// Host name.
    pub name: String,
    /// Contact phone.
    pub phone: String,
    /// Whether this host supervises the waypoint.
    pub is_supervisor: bool,
}

/// A stop along a route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Waypoint {
    /// Client-side identifier.
    pub id: String,
    /// Waypoint name.
    pub name: String,
    /// Planned arrival time.
    pub arrival_time: String,
    /// Hosts assigned to this stop.
    pub hosts: Vec<Host>,
}

/// A driver's route with its waypoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Route {
    /// Route start point.
    pub start_point: String,
    /// Route end point.
    pub end_point: String,
    /// Intermediate stops.
    pub waypoints: Vec<Waypoint>,
}

/// An additional shift with its own schedule and route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Shift {
    /// Company the shift is driven for.
    pub company: String,
    /// Shift start time.
    pub start_time: String,
    /// Shift end time.
    pub end_time: String,
    /// Route driven during the shift.
    pub route: Option<Route>,
}

/// A persisted driver record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    /// Unique identifier.
    pub id: Uuid,
    /// Driver name.
    pub name: String,
    /// Contact phone.
    pub phone: String,
    /// Governorate of residence.
    pub governorate: String,
    /// Area within the governorate.
    pub area: String,
    /// Street address.
    pub street_address: String,
    /// Bank account number.
    pub account_number: String,
    /// Bank name.
    pub bank_name: String,
    /// Account holder name.
    pub account_holder: String,
    /// IBAN.
    pub iban: String,
    /// Vehicle type.
    pub car_type: String,
    /// Vehicle plate number.
    pub car_number: String,
    /// Whether the vehicle has air conditioning.
    #[serde(rename = "hasAC")]
    pub has_ac: String,
    /// Shift type.
    pub shift_type: String,
    /// License expiry date.
    pub license_expiry_date: String,
    /// Whether the driver currently works.
    pub is_working: String,
    /// Company the driver works for.
    pub company: String,
    /// Primary shift start time.
    pub start_time: String,
    /// Primary shift end time.
    pub end_time: String,
    /// Whether the vehicle is rented from a third party.
    pub is_rented: bool,
    /// Vehicle owner name (rented vehicles).
    pub car_owner_name: String,
    /// Vehicle owner phone (rented vehicles).
    pub car_owner_phone: String,
    /// Primary route.
    pub route: Option<Route>,
    /// Additional shifts beyond the primary one.
    pub additional_shifts: Vec<Shift>,

    /// Personal image URL.
    pub personal_image_url: Option<String>,
    /// Personal license URLs.
    pub personal_license_urls: Vec<String>,
    /// Car license URLs.
    pub car_license_urls: Vec<String>,
    /// Identity card URLs.
    pub id_card_urls: Vec<String>,
    /// Car photo URLs.
    pub car_images_urls: Vec<String>,

    /// Deletion handle for the personal image (remote mode only).
    pub personal_image_public_id: Option<String>,
    /// Deletion handles for personal licenses, index-aligned with the URLs.
    pub personal_license_public_ids: Vec<String>,
    /// Deletion handles for car licenses, index-aligned with the URLs.
    pub car_license_public_ids: Vec<String>,
    /// Deletion handles for identity cards, index-aligned with the URLs.
    pub id_card_public_ids: Vec<String>,
    /// Deletion handles for car photos, index-aligned with the URLs.
    pub car_images_public_ids: Vec<String>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a driver record.
#[derive(Debug, Clone, Default)]
pub struct NewDriver {
    /// Driver name.
    pub name: String,
    /// Contact phone.
    pub phone: String,
    /// Governorate of residence.
    pub governorate: String,
    /// Area within the governorate.
    pub area: String,
    /// Street address.
    pub street_address: String,
    /// Bank account number.
    pub account_number: String,
    /// Bank name.
    pub bank_name: String,
    /// Account holder name.
    pub account_holder: String,
    /// IBAN.
    pub iban: String,
    /// Vehicle type.
    pub car_type: String,
    /// Vehicle plate number.
    pub car_number: String,
    /// Whether the vehicle has air conditioning.
    pub has_ac: String,
    /// Shift type.
    pub shift_type: String,
    /// License expiry date.
    pub license_expiry_date: String,
    /// Whether the driver currently works.
    pub is_working: String,
    /// Company the driver works for.
    pub company: String,
    /// Primary shift start time.
    pub start_time: String,
    /// Primary shift end time.
    pub end_time: String,
    /// Whether the vehicle is rented from a third party.
    pub is_rented: bool,
    /// Vehicle owner name (rented vehicles).
    pub car_owner_name: String,
    /// Vehicle owner phone (rented vehicles).
    pub car_owner_phone: String,
    /// Primary route.
    pub route: Option<Route>,
    /// Additional shifts beyond the primary one.
    pub additional_shifts: Vec<Shift>,

    /// Personal image URL.
    pub personal_image_url: Option<String>,
    /// Personal license URLs.
    pub personal_license_urls: Vec<String>,
    /// Car license URLs.
    pub car_license_urls: Vec<String>,
    /// Identity card URLs.
    pub id_card_urls: Vec<String>,
    /// Car photo URLs.
    pub car_images_urls: Vec<String>,

    /// Deletion handle for the personal image (remote mode only).
    pub personal_image_public_id: Option<String>,
    /// Deletion handles for personal licenses, index-aligned with the URLs.
    pub personal_license_public_ids: Vec<String>,
    /// Deletion handles for car licenses, index-aligned with the URLs.
    pub car_license_public_ids: Vec<String>,
    /// Deletion handles for identity cards, index-aligned with the URLs.
    pub id_card_public_ids: Vec<String>,
    /// Deletion handles for car photos, index-aligned with the URLs.
    pub car_images_public_ids: Vec<String>,
}

impl Driver {
    /// Every stored artifact referenced by this record, URL paired with its
    /// deletion handle where one exists.
    #[must_use]
    pub fn artifacts(&self) -> Vec<Artifact> {
        let mut artifacts = Vec::new();

        if let Some(url) = &self.personal_image_url {
            artifacts.push(Artifact {
                url: url.clone(),
                public_id: self.personal_image_public_id.clone(),
            });
        }

        let slots: [(&Vec<String>, &Vec<String>); 4] = [
            (&self.personal_license_urls, &self.personal_license_public_ids),
            (&self.car_license_urls, &self.car_license_public_ids),
            (&self.id_card_urls, &self.id_card_public_ids),
            (&self.car_images_urls, &self.car_images_public_ids),
        ];
        for (urls, public_ids) in slots {
            for (i, url) in urls.iter().enumerate() {
                artifacts.push(Artifact {
                    url: url.clone(),
                    public_id: public_ids.get(i).cloned(),
                });
            }
        }

        artifacts
    }
}
