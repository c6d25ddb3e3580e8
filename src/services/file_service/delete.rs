use super::{FileService, FileServiceError};

impl FileService {
    /// Removes the stored object, then its record.
    ///
    /// A failed object delete leaves the record in place so the object is not lost track of.
    /// A failed record delete after the object is gone is reported as a partial failure.
    pub async fn delete(&self, id: &str) -> Result<(), FileServiceError> {
        let record = self.find_record(id).await?;
        let location = self.resolve_location(&record).await?;

        self.ensure_object_present(&location).await?;

        self.storage
            .delete_object(&location)
            .await
            .map_err(FileServiceError::DeleteFailed)?;
        tracing::info!("🗑️  Deleted object {}", location);

        match self.files.delete(id).await {
            Ok(true) => {
                tracing::info!("🗑️  Deleted file record {}", id);
                Ok(())
            }
            Ok(false) => {
                tracing::warn!("File record {} was already gone after deleting {}", id, location);
                Ok(())
            }
            Err(source) => Err(FileServiceError::RemovedButStillRecorded { location, source }),
        }
    }
}
