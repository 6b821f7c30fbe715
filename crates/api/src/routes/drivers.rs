//! Driver management routes.
//!
//! Driver creation is a multipart form: flat text fields, JSON-encoded
//! nested structures, and up to five categorized file fields. Files are
//! persisted through the injected artifact store before the record is
//! written; deletion removes every stored artifact best-effort before
//! removing the record.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::AppState;
use bluebird_core::driver::{DriverError, DriverService};
use bluebird_core::storage::FileUpload;
use bluebird_db::DriverRepository;
use bluebird_shared::AppError;
use bluebird_shared::types::PageRequest;

/// File fields accepted on driver creation, with their per-field caps.
const FILE_FIELDS: [(&str, usize); 5] = [
    ("personalImage", 1),
    ("personalLicense", 10),
    ("carLicense", 10),
    ("idCard", 10),
    ("carImage", 10),
];

/// Creates the driver routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/drivers", get(list_drivers).post(create_driver))
        .route("/drivers/{id}", get(get_driver).delete(delete_driver))
}

/// Maximum number of files accepted for a field, if the field takes files.
fn field_capacity(name: &str) -> Option<usize> {
    FILE_FIELDS
        .iter()
        .find(|(field, _)| *field == name)
        .map(|(_, cap)| *cap)
}

/// Builds the uniform failure body.
fn failure(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "success": false, "message": message })),
    )
        .into_response()
}

/// Maps an application error onto the failure body and its status code.
fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    failure(status, &err.to_string())
}

fn driver_service(state: &AppState) -> DriverService<DriverRepository> {
    let repo = DriverRepository::new((*state.db).clone());
    DriverService::new(state.store.clone(), Arc::new(repo))
}

/// Drains the multipart stream into text fields and buffered file uploads,
/// enforcing the per-field, total, and per-file-size caps.
async fn read_driver_form(
    limits: crate::UploadLimits,
    multipart: &mut Multipart,
) -> Result<(HashMap<String, String>, Vec<FileUpload>), Response> {
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut files: Vec<FileUpload> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &format!("malformed multipart request: {e}"),
                ));
            }
        };

        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        if let Some(filename) = field.file_name().map(ToString::to_string) {
            let Some(cap) = field_capacity(&name) else {
                return Err(failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &format!("unexpected file field: {name}"),
                ));
            };

            let count = counts.entry(name.clone()).or_insert(0);
            *count += 1;
            if *count > cap {
                return Err(failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &format!("too many files for field: {name}"),
                ));
            }
            if files.len() >= limits.max_files {
                return Err(failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "too many files in request",
                ));
            }

            let content_type = field.content_type().map(ToString::to_string);
            let bytes = match field.bytes().await {
                Ok(bytes) => bytes,
                Err(e) => {
                    return Err(failure(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        &format!("failed to read file field {name}: {e}"),
                    ));
                }
            };
            if bytes.len() > limits.max_file_size {
                return Err(failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &format!("file too large for field: {name}"),
                ));
            }

            files.push(FileUpload {
                field: name,
                filename,
                content_type,
                bytes,
            });
        } else {
            let value = match field.text().await {
                Ok(value) => value,
                Err(e) => {
                    return Err(failure(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        &format!("failed to read field {name}: {e}"),
                    ));
                }
            };
            fields.insert(name, value);
        }
    }

    Ok((fields, files))
}

/// POST `/drivers`
/// Create a driver from a multipart form submission.
async fn create_driver(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let (fields, files) = match read_driver_form(state.limits, &mut multipart).await {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    let file_count = files.len();
    match driver_service(&state).create(fields, files).await {
        Ok(driver) => {
            info!(driver_id = %driver.id, files = file_count, "Driver created");
            (
                StatusCode::CREATED,
                Json(json!({ "success": true, "driver": driver })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create driver");
            error_response(&e.into())
        }
    }
}

/// GET `/drivers`
/// List drivers, newest first, offset-paginated.
async fn list_drivers(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    match driver_service(&state)
        .list(page.offset(), page.limit())
        .await
    {
        Ok(drivers) => (StatusCode::OK, Json(json!({ "success": true, "drivers": drivers })))
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list drivers");
            error_response(&e.into())
        }
    }
}

/// GET `/drivers/{id}`
/// Fetch a single driver.
async fn get_driver(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match driver_service(&state).get(id).await {
        Ok(driver) => {
            (StatusCode::OK, Json(json!({ "success": true, "driver": driver }))).into_response()
        }
        Err(DriverError::NotFound(_)) => failure(StatusCode::NOT_FOUND, "Driver not found"),
        Err(e) => {
            error!(error = %e, "Failed to fetch driver");
            error_response(&e.into())
        }
    }
}

/// DELETE `/drivers/{id}`
/// Delete a driver and all of its stored files.
async fn delete_driver(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match driver_service(&state).delete(id).await {
        Ok(outcomes) => {
            for outcome in &outcomes {
                if let Err(e) = &outcome.result {
                    warn!(url = %outcome.artifact.url, error = %e, "Failed to delete stored file");
                }
            }
            info!(
                driver_id = %id,
                artifacts = outcomes.len(),
                failed = outcomes.iter().filter(|o| !o.is_ok()).count(),
                "Driver deleted"
            );
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "Driver and all associated files deleted"
                })),
            )
                .into_response()
        }
        Err(DriverError::NotFound(_)) => failure(StatusCode::NOT_FOUND, "Driver not found"),
        Err(e) => {
            error!(error = %e, "Failed to delete driver");
            error_response(&e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_capacity_known_fields() {
        assert_eq!(field_capacity("personalImage"), Some(1));
        assert_eq!(field_capacity("personalLicense"), Some(10));
        assert_eq!(field_capacity("carLicense"), Some(10));
        assert_eq!(field_capacity("idCard"), Some(10));
        assert_eq!(field_capacity("carImage"), Some(10));
    }

    #[test]
    fn test_field_capacity_rejects_unknown() {
        assert_eq!(field_capacity("resume"), None);
        assert_eq!(field_capacity(""), None);
    }
}
