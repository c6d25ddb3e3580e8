use super::{FileService, FileServiceError};

impl FileService {
    /// Mints a fresh time-limited GET link for the record's object. Links are never cached.
    pub async fn download_url(&self, id: &str) -> Result<String, FileServiceError> {
        let record = self.find_record(id).await?;
        let location = self.resolve_location(&record).await?;

        self.ensure_object_present(&location).await?;

        let url = self
            .storage
            .presigned_get_url(&location, self.config.presigned_url_expiry())
            .await
            .map_err(FileServiceError::PresignFailed)?;
        tracing::debug!("🔗 Issued download link for {}", location);

        Ok(url)
    }
}
