//! Driver service implementation.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use super::assembler::assemble_driver;
use super::error::DriverError;
use super::types::{Driver, NewDriver};
use crate::storage::{ArtifactStore, FileUpload, RemovalOutcome, remove_all, store_all};

/// Repository trait for driver persistence.
///
/// This trait is implemented by the db crate to provide actual database
/// operations.
pub trait DriverRepository: Send + Sync {
    /// Create a new driver record.
    fn create(
        &self,
        input: NewDriver,
    ) -> impl std::future::Future<Output = Result<Driver, DriverError>> + Send;

    /// Find driver by ID.
    fn find_by_id(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Driver>, DriverError>> + Send;

    /// List drivers, newest first.
    fn list(
        &self,
        offset: u64,
        limit: u64,
    ) -> impl std::future::Future<Output = Result<Vec<Driver>, DriverError>> + Send;

    /// Delete driver by ID, reporting whether a record was removed.
    fn delete(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<bool, DriverError>> + Send;
}

/// Driver service: upload pipeline on create, artifact cleanup on delete.
pub struct DriverService<R: DriverRepository> {
    store: Arc<dyn ArtifactStore>,
    repo: Arc<R>,
}

impl<R: DriverRepository> DriverService<R> {
    /// Create a new driver service.
    #[must_use]
    pub fn new(store: Arc<dyn ArtifactStore>, repo: Arc<R>) -> Self {
        Self { store, repo }
    }

    /// Creates a driver from a multipart submission.
    ///
    /// Every file is stored first (concurrently, all-or-nothing); only after
    /// all uploads have completed is the record written. A crash between the
    /// two steps leaves orphaned artifacts with no referencing record; there
    /// is no compensating transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any upload fails or the record cannot be written.
    pub async fn create(
        &self,
        fields: HashMap<String, String>,
        files: Vec<FileUpload>,
    ) -> Result<Driver, DriverError> {
        let stored = store_all(self.store.as_ref(), &files).await?;
        let input = assemble_driver(&fields, &stored);
        self.repo.create(input).await
    }

    /// Lists drivers newest first with offset pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Driver>, DriverError> {
        self.repo.list(offset, limit).await
    }

    /// Fetches a driver by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver does not exist or the database
    /// operation fails.
    pub async fn get(&self, id: Uuid) -> Result<Driver, DriverError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DriverError::not_found(id))
    }

    /// Deletes a driver and all of its stored artifacts.
    ///
    /// Artifact removal is best-effort and per-artifact independent: every
    /// removal is attempted, failures are collected into the returned
    /// outcomes, and the database record is deleted regardless. A missing
    /// driver performs no storage calls at all.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the driver does not exist, or a repository
    /// error if the final record deletion fails.
    pub async fn delete(&self, id: Uuid) -> Result<Vec<RemovalOutcome>, DriverError> {
        let driver = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DriverError::not_found(id))?;

        let outcomes = remove_all(self.store.as_ref(), &driver.artifacts()).await;

        self.repo.delete(id).await?;

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Artifact, FileCategory, StorageError};
    use async_trait::async_trait;
    use bytes::Bytes;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock repository backed by a map plus an insertion counter so creation
    /// times are strictly increasing.
    struct MockDriverRepository {
        drivers: Mutex<Vec<Driver>>,
        seq: AtomicUsize,
    }

    impl MockDriverRepository {
        fn new() -> Self {
            Self {
                drivers: Mutex::new(Vec::new()),
                seq: AtomicUsize::new(0),
            }
        }
    }

    impl DriverRepository for MockDriverRepository {
        async fn create(&self, input: NewDriver) -> Result<Driver, DriverError> {
            let n = self.seq.fetch_add(1, Ordering::SeqCst) as i64;
            let created_at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
                + Duration::seconds(n);
            let driver = Driver {
                id: Uuid::new_v4(),
                name: input.name,
                phone: input.phone,
                governorate: input.governorate,
                area: input.area,
                street_address: input.street_address,
                account_number: input.account_number,
                bank_name: input.bank_name,
                account_holder: input.account_holder,
                iban: input.iban,
                car_type: input.car_type,
                car_number: input.car_number,
                has_ac: input.has_ac,
                shift_type: input.shift_type,
                license_expiry_date: input.license_expiry_date,
                is_working: input.is_working,
                company: input.company,
                start_time: input.start_time,
                end_time: input.end_time,
                is_rented: input.is_rented,
                car_owner_name: input.car_owner_name,
                car_owner_phone: input.car_owner_phone,
                route: input.route,
                additional_shifts: input.additional_shifts,
                personal_image_url: input.personal_image_url,
                personal_license_urls: input.personal_license_urls,
                car_license_urls: input.car_license_urls,
                id_card_urls: input.id_card_urls,
                car_images_urls: input.car_images_urls,
                personal_image_public_id: input.personal_image_public_id,
                personal_license_public_ids: input.personal_license_public_ids,
                car_license_public_ids: input.car_license_public_ids,
                id_card_public_ids: input.id_card_public_ids,
                car_images_public_ids: input.car_images_public_ids,
                created_at,
                updated_at: created_at,
            };
            self.drivers.lock().unwrap().push(driver.clone());
            Ok(driver)
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, DriverError> {
            Ok(self
                .drivers
                .lock()
                .unwrap()
                .iter()
                .find(|d| d.id == id)
                .cloned())
        }

        async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Driver>, DriverError> {
            let mut drivers = self.drivers.lock().unwrap().clone();
            drivers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(drivers
                .into_iter()
                .skip(usize::try_from(offset).unwrap())
                .take(usize::try_from(limit).unwrap())
                .collect())
        }

        async fn delete(&self, id: Uuid) -> Result<bool, DriverError> {
            let mut drivers = self.drivers.lock().unwrap();
            let before = drivers.len();
            drivers.retain(|d| d.id != id);
            Ok(drivers.len() != before)
        }
    }

    /// Store stub with configurable removal behavior and call counting.
    struct StubStore {
        removals: AtomicUsize,
        fail_removals: bool,
    }

    impl StubStore {
        fn new() -> Self {
            Self {
                removals: AtomicUsize::new(0),
                fail_removals: false,
            }
        }

        fn failing_removals() -> Self {
            Self {
                fail_removals: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl ArtifactStore for StubStore {
        async fn store(
            &self,
            upload: &FileUpload,
            category: FileCategory,
        ) -> Result<Artifact, StorageError> {
            let key = format!("uploads/{}/{}", category.dir(), upload.filename);
            Ok(Artifact {
                url: format!("https://cdn.test/{key}"),
                public_id: Some(key),
            })
        }

        async fn remove(&self, _artifact: &Artifact) -> Result<(), StorageError> {
            self.removals.fetch_add(1, Ordering::SeqCst);
            if self.fail_removals {
                return Err(StorageError::operation("remote service down"));
            }
            Ok(())
        }
    }

    fn service(store: StubStore) -> (DriverService<MockDriverRepository>, Arc<StubStore>) {
        let store = Arc::new(store);
        let repo = Arc::new(MockDriverRepository::new());
        (DriverService::new(store.clone(), repo), store)
    }

    fn upload(field: &str, filename: &str) -> FileUpload {
        FileUpload {
            field: field.to_string(),
            filename: filename.to_string(),
            content_type: Some("image/png".to_string()),
            bytes: Bytes::from_static(b"bytes"),
        }
    }

    #[tokio::test]
    async fn test_create_aligns_urls_and_handles() {
        let (service, _) = service(StubStore::new());
        let files = vec![
            upload("personalImage", "me.png"),
            upload("carImage", "c1.png"),
            upload("carImage", "c2.png"),
        ];
        let fields = HashMap::from([("name".to_string(), "Ahmed".to_string())]);

        let driver = service.create(fields, files).await.unwrap();

        assert!(driver.personal_image_url.is_some());
        assert!(driver.personal_image_public_id.is_some());
        assert_eq!(driver.car_images_urls.len(), 2);
        assert_eq!(driver.car_images_public_ids.len(), 2);
        for (url, id) in driver
            .car_images_urls
            .iter()
            .zip(&driver.car_images_public_ids)
        {
            assert!(url.ends_with(id.rsplit('/').next().unwrap()));
        }
    }

    #[tokio::test]
    async fn test_get_missing_driver_is_not_found() {
        let (service, _) = service(StubStore::new());

        let result = service.get(Uuid::new_v4()).await;

        assert!(matches!(result, Err(DriverError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_record_even_when_every_removal_fails() {
        let (service, store) = service(StubStore::failing_removals());
        let files = vec![upload("idCard", "front.png"), upload("idCard", "back.png")];
        let driver = service.create(HashMap::new(), files).await.unwrap();

        let outcomes = service.delete(driver.id).await.unwrap();

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| !o.is_ok()));
        assert_eq!(store.removals.load(Ordering::SeqCst), 2);
        // the record is gone despite the storage failures
        assert!(matches!(
            service.get(driver.id).await,
            Err(DriverError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_driver_makes_no_storage_calls() {
        let (service, store) = service(StubStore::new());

        let result = service.delete(Uuid::new_v4()).await;

        assert!(matches!(result, Err(DriverError::NotFound(_))));
        assert_eq!(store.removals.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_list_pages_newest_first() {
        let (service, _) = service(StubStore::new());
        for i in 0..25 {
            let fields = HashMap::from([("name".to_string(), format!("driver-{i}"))]);
            service.create(fields, Vec::new()).await.unwrap();
        }

        let page = service.list(10, 10).await.unwrap();

        assert_eq!(page.len(), 10);
        // newest first: page 2 holds drivers 14..=5 of the 0..=24 insertion order
        assert_eq!(page.first().unwrap().name, "driver-14");
        assert_eq!(page.last().unwrap().name, "driver-5");
    }

    #[tokio::test]
    async fn test_create_with_no_files() {
        let (service, _) = service(StubStore::new());
        let fields = HashMap::from([
            ("name".to_string(), "Mona".to_string()),
            ("isRented".to_string(), "true".to_string()),
        ]);

        let driver = service.create(fields, Vec::new()).await.unwrap();

        assert_eq!(driver.name, "Mona");
        assert!(driver.is_rented);
        assert!(driver.personal_image_url.is_none());
        assert!(driver.artifacts().is_empty());
    }
}
