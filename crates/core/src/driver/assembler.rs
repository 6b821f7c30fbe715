//! Assembles a driver record from a multipart form submission.
//!
//! The form arrives as flat text fields plus JSON-encoded nested structures
//! (`route`, `additionalShifts`) plus the already-stored file artifacts. A
//! malformed JSON field never rejects the submission; it is treated as if the
//! field had not been sent.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use super::types::{NewDriver, Route, Shift};
use crate::storage::{Artifact, StoredFile};

/// Decodes a JSON-encoded form field, treating absence and malformed input
/// alike as "not sent".
#[must_use]
pub fn parse_json_field<T: DeserializeOwned>(raw: Option<&str>) -> Option<T> {
    raw.and_then(|s| serde_json::from_str(s).ok())
}

/// Stored artifacts grouped back into the record's file slots.
#[derive(Debug, Default)]
struct ArtifactGroup {
    personal_image: Option<Artifact>,
    personal_licenses: Vec<Artifact>,
    car_licenses: Vec<Artifact>,
    id_cards: Vec<Artifact>,
    car_images: Vec<Artifact>,
}

fn group_by_field(stored: &[StoredFile]) -> ArtifactGroup {
    let mut group = ArtifactGroup::default();
    for file in stored {
        match file.field.as_str() {
            "personalImage" => {
                if group.personal_image.is_none() {
                    group.personal_image = Some(file.artifact.clone());
                }
            }
            "personalLicense" => group.personal_licenses.push(file.artifact.clone()),
            "carLicense" => group.car_licenses.push(file.artifact.clone()),
            "idCard" => group.id_cards.push(file.artifact.clone()),
            "carImage" => group.car_images.push(file.artifact.clone()),
            _ => {}
        }
    }
    group
}

fn urls(artifacts: &[Artifact]) -> Vec<String> {
    artifacts.iter().map(|a| a.url.clone()).collect()
}

/// Deletion handles for a slot. Either every artifact carries one (remote
/// mode, index-aligned with the URLs) or the list is empty (local mode).
fn public_ids(artifacts: &[Artifact]) -> Vec<String> {
    artifacts
        .iter()
        .map(|a| a.public_id.clone())
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default()
}

/// Builds the persistable record from form fields and stored artifacts.
#[must_use]
pub fn assemble_driver(fields: &HashMap<String, String>, stored: &[StoredFile]) -> NewDriver {
    let get = |name: &str| fields.get(name).cloned().unwrap_or_default();
    let group = group_by_field(stored);

    NewDriver {
        name: get("name"),
        phone: get("phone"),
        governorate: get("governorate"),
        area: get("area"),
        street_address: get("streetAddress"),
        account_number: get("accountNumber"),
        bank_name: get("bankName"),
        account_holder: get("accountHolder"),
        iban: get("iban"),
        car_type: get("carType"),
        car_number: get("carNumber"),
        has_ac: get("hasAC"),
        shift_type: get("shiftType"),
        license_expiry_date: get("licenseExpiryDate"),
        is_working: get("isWorking"),
        company: get("company"),
        start_time: get("startTime"),
        end_time: get("endTime"),
        is_rented: fields.get("isRented").is_some_and(|v| v == "true"),
        car_owner_name: get("carOwnerName"),
        car_owner_phone: get("carOwnerPhone"),
        route: parse_json_field::<Route>(fields.get("route").map(String::as_str)),
        additional_shifts: parse_json_field::<Vec<Shift>>(
            fields.get("additionalShifts").map(String::as_str),
        )
        .unwrap_or_default(),

        personal_image_url: group.personal_image.as_ref().map(|a| a.url.clone()),
        personal_image_public_id: group
            .personal_image
            .as_ref()
            .and_then(|a| a.public_id.clone()),
        personal_license_urls: urls(&group.personal_licenses),
        personal_license_public_ids: public_ids(&group.personal_licenses),
        car_license_urls: urls(&group.car_licenses),
        car_license_public_ids: public_ids(&group.car_licenses),
        id_card_urls: urls(&group.id_cards),
        id_card_public_ids: public_ids(&group.id_cards),
        car_images_urls: urls(&group.car_images),
        car_images_public_ids: public_ids(&group.car_images),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn stored(field: &str, url: &str, public_id: Option<&str>) -> StoredFile {
        StoredFile {
            field: field.to_string(),
            artifact: Artifact {
                url: url.to_string(),
                public_id: public_id.map(str::to_string),
            },
        }
    }

    #[test]
    fn test_flat_fields_mapped() {
        let form = fields(&[
            ("name", "Ahmed"),
            ("phone", "0100123"),
            ("streetAddress", "12 Nile St"),
            ("hasAC", "yes"),
        ]);

        let driver = assemble_driver(&form, &[]);

        assert_eq!(driver.name, "Ahmed");
        assert_eq!(driver.phone, "0100123");
        assert_eq!(driver.street_address, "12 Nile St");
        assert_eq!(driver.has_ac, "yes");
    }

    #[test]
    fn test_optional_strings_default_to_empty() {
        let driver = assemble_driver(&fields(&[("name", "Ahmed")]), &[]);

        assert_eq!(driver.car_number, "");
        assert_eq!(driver.car_owner_name, "");
        assert_eq!(driver.car_owner_phone, "");
    }

    #[rstest]
    #[case(Some("true"), true)]
    #[case(Some("1"), false)]
    #[case(Some("yes"), false)]
    #[case(Some("TRUE"), false)]
    #[case(Some(""), false)]
    #[case(None, false)]
    fn test_is_rented_exact_literal(#[case] value: Option<&str>, #[case] expected: bool) {
        let form = match value {
            Some(v) => fields(&[("isRented", v)]),
            None => HashMap::new(),
        };
        assert_eq!(assemble_driver(&form, &[]).is_rented, expected);
    }

    #[test]
    fn test_valid_route_parses() {
        let form = fields(&[("route", r#"{"startPoint":"A","endPoint":"B","waypoints":[]}"#)]);

        let driver = assemble_driver(&form, &[]);

        let route = driver.route.unwrap();
        assert_eq!(route.start_point, "A");
        assert_eq!(route.end_point, "B");
    }

    #[test]
    fn test_malformed_route_becomes_absent() {
        let form = fields(&[("route", "{not json")]);

        let driver = assemble_driver(&form, &[]);

        assert!(driver.route.is_none());
    }

    #[test]
    fn test_malformed_additional_shifts_defaults_to_empty() {
        let form = fields(&[("additionalShifts", "[{]")]);

        let driver = assemble_driver(&form, &[]);

        assert!(driver.additional_shifts.is_empty());
    }

    #[test]
    fn test_additional_shifts_parse_with_routes() {
        let json = r#"[{"company":"Acme","startTime":"06:00","endTime":"14:00",
                        "route":{"startPoint":"X","endPoint":"Y","waypoints":[]}}]"#;
        let form = fields(&[("additionalShifts", json)]);

        let driver = assemble_driver(&form, &[]);

        assert_eq!(driver.additional_shifts.len(), 1);
        assert_eq!(driver.additional_shifts[0].company, "Acme");
        assert_eq!(
            driver.additional_shifts[0].route.as_ref().unwrap().start_point,
            "X"
        );
    }

    #[test]
    fn test_artifacts_grouped_by_field() {
        let files = vec![
            stored("personalImage", "https://cdn/p.png", Some("k/p")),
            stored("carImage", "https://cdn/c1.png", Some("k/c1")),
            stored("carImage", "https://cdn/c2.png", Some("k/c2")),
            stored("idCard", "https://cdn/id.png", Some("k/id")),
        ];

        let driver = assemble_driver(&HashMap::new(), &files);

        assert_eq!(driver.personal_image_url.as_deref(), Some("https://cdn/p.png"));
        assert_eq!(driver.personal_image_public_id.as_deref(), Some("k/p"));
        assert_eq!(driver.car_images_urls.len(), 2);
        assert_eq!(driver.car_images_public_ids.len(), 2);
        assert_eq!(driver.car_images_public_ids[1], "k/c2");
        assert_eq!(driver.id_card_urls.len(), 1);
        assert!(driver.personal_license_urls.is_empty());
    }

    #[test]
    fn test_local_mode_artifacts_leave_handles_empty() {
        let files = vec![
            stored("carLicense", "http://localhost/uploads/licenses/a.png", None),
            stored("carLicense", "http://localhost/uploads/licenses/b.png", None),
        ];

        let driver = assemble_driver(&HashMap::new(), &files);

        assert_eq!(driver.car_license_urls.len(), 2);
        assert!(driver.car_license_public_ids.is_empty());
    }

    #[test]
    fn test_unknown_file_fields_are_dropped() {
        let files = vec![stored("surprise", "https://cdn/s.png", None)];

        let driver = assemble_driver(&HashMap::new(), &files);

        assert!(driver.personal_image_url.is_none());
        assert!(driver.car_images_urls.is_empty());
    }
}
