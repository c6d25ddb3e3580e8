use crate::models::{FileRecord, NewFileRecord};
use crate::services::storage::ObjectLocation;
use validator::Validate;

use super::types::present;
use super::{FileService, FileServiceError, UploadRequest};

/// The text after the last `.`; a name without a dot is its own extension.
pub fn file_extension(file_name: &str) -> &str {
    file_name.rsplit('.').next().unwrap_or(file_name)
}

impl FileService {
    /// Validates an upload against its file type, stores the bytes, then records the metadata.
    ///
    /// Gates run in order and the first failure aborts. Nothing is written to the object
    /// store until every validation gate and the existence probe have passed.
    pub async fn upload(&self, request: UploadRequest) -> Result<FileRecord, FileServiceError> {
        let file = request.file.ok_or(FileServiceError::MissingFile)?;

        let code = present(request.file_type).ok_or(FileServiceError::MissingFileType)?;
        let file_type = self
            .file_types
            .lookup(&code)
            .await?
            .ok_or_else(|| FileServiceError::UnknownFileType(code.clone()))?;

        let file_name = present(file.file_name).ok_or(FileServiceError::MissingFileName)?;
        let description =
            present(request.description).ok_or(FileServiceError::MissingDescription)?;

        let new_record = NewFileRecord {
            file_type: file_type.code.clone(),
            name: file_name.clone(),
            description,
        };
        new_record
            .validate()
            .map_err(|e| FileServiceError::InvalidDescription(e.to_string()))?;

        let extension = file_extension(&file_name);
        if !file_type.accepts_extension(extension) {
            return Err(FileServiceError::ExtensionNotAllowed {
                extension: extension.to_string(),
            });
        }

        let mime_type = match present(file.content_type) {
            Some(m) if file_type.accepts_mime_type(&m) => m,
            other => return Err(FileServiceError::MimeTypeNotAllowed { mime_type: other }),
        };

        if file.data.len() > self.config.max_file_size {
            return Err(FileServiceError::FileTooLarge {
                limit: self.config.max_file_size,
            });
        }

        let location = ObjectLocation::derive(&file_type, &file_name);

        // Best effort only: two uploads of the same key can both pass this probe.
        match self.storage.object_exists(&location).await {
            Ok(true) => {
                tracing::info!("⛔ Upload rejected, {} already exists", location);
                return Err(FileServiceError::ObjectAlreadyExists(location));
            }
            Ok(false) => {}
            Err(e) => return Err(FileServiceError::StatusCheckFailed(e)),
        }

        self.storage
            .put_object(&location, file.data.to_vec(), &mime_type)
            .await
            .map_err(FileServiceError::PutFailed)?;
        tracing::info!("☁️  Stored {} ({} bytes)", location, file.data.len());

        let record = self
            .files
            .insert(new_record)
            .await
            .map_err(|source| FileServiceError::StoredButNotRecorded {
                location: location.clone(),
                source,
            })?;
        tracing::info!("📝 Recorded file {} as {}", location, record.id);

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_after_last_dot() {
        assert_eq!(file_extension("cat.jpg"), "jpg");
        assert_eq!(file_extension("archive.tar.gz"), "gz");
        assert_eq!(file_extension("trailing."), "");
    }

    #[test]
    fn test_name_without_dot_is_its_own_extension() {
        assert_eq!(file_extension("README"), "README");
    }
}
