use crate::models::{FileRecord, FileRecordPatch, NewFileRecord};
use validator::Validate;

use super::{FileService, FileServiceError};

impl FileService {
    /// Records metadata without touching the object store.
    pub async fn create_record(&self, new: NewFileRecord) -> Result<FileRecord, FileServiceError> {
        new.validate()
            .map_err(|e| FileServiceError::InvalidDescription(e.to_string()))?;
        Ok(self.files.insert(new).await?)
    }

    /// Merges the patch into an existing record. Concurrent updates race; the last one wins.
    pub async fn update_record(
        &self,
        id: &str,
        patch: FileRecordPatch,
    ) -> Result<FileRecord, FileServiceError> {
        patch
            .validate()
            .map_err(|e| FileServiceError::InvalidDescription(e.to_string()))?;

        self.files
            .apply_patch(id, patch)
            .await?
            .ok_or(FileServiceError::RecordNotFound)
    }
}
