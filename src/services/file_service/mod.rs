use crate::config::AppConfig;
use crate::models::FileRecord;
use crate::services::file_types::FileTypeRegistry;
use crate::services::files::FileRepository;
use crate::services::storage::{ObjectLocation, StorageService};
use std::sync::Arc;

pub mod delete;
pub mod download;
pub mod error;
pub mod metadata;
pub mod types;
pub mod upload;

pub use error::FileServiceError;
pub use types::{UploadRequest, UploadedFile};

/// Orchestrates the object store and the metadata store.
///
/// Each dependency call is attempted once. Nothing spans both stores transactionally:
/// a failure between the two writes is reported, never rolled back.
pub struct FileService {
    files: FileRepository,
    file_types: FileTypeRegistry,
    storage: Arc<dyn StorageService>,
    config: AppConfig,
}

impl FileService {
    pub fn new(
        files: FileRepository,
        file_types: FileTypeRegistry,
        storage: Arc<dyn StorageService>,
        config: AppConfig,
    ) -> Self {
        Self {
            files,
            file_types,
            storage,
            config,
        }
    }

    /// Derives where a record's bytes live from the type registry as it is now.
    pub async fn resolve_location(
        &self,
        record: &FileRecord,
    ) -> Result<ObjectLocation, FileServiceError> {
        let file_type = self
            .file_types
            .lookup(&record.file_type)
            .await?
            .ok_or_else(|| FileServiceError::FileTypeMissing(record.file_type.clone()))?;
        Ok(ObjectLocation::derive(&file_type, &record.name))
    }

    async fn ensure_object_present(&self, location: &ObjectLocation) -> Result<(), FileServiceError> {
        match self.storage.object_exists(location).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(FileServiceError::ObjectMissing(location.clone())),
            Err(e) => Err(FileServiceError::StatusCheckFailed(e)),
        }
    }

    async fn find_record(&self, id: &str) -> Result<FileRecord, FileServiceError> {
        self.files
            .get(id)
            .await?
            .ok_or(FileServiceError::RecordNotFound)
    }
}
