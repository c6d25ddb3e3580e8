use crate::entities::{file_types, files};
use chrono::{DateTime, Utc};
use sea_orm::{DbErr, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A registered file type: validation rules plus the storage location for its files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FileType {
    pub id: String,
    #[serde(rename = "type")]
    pub code: String,
    pub text: String,
    pub help: String,
    pub extensions: Vec<String>,
    #[serde(rename = "mimetypes")]
    pub mime_types: Vec<String>,
    pub bucket: String,
    pub path: String,
}

impl FileType {
    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.extensions.iter().any(|e| e == extension)
    }

    pub fn accepts_mime_type(&self, mime_type: &str) -> bool {
        self.mime_types.iter().any(|m| m == mime_type)
    }
}

fn string_list(column: &str, value: serde_json::Value) -> Result<Vec<String>, DbErr> {
    serde_json::from_value(value)
        .map_err(|e| DbErr::Json(format!("file_types.{} is not a string list: {}", column, e)))
}

impl TryFrom<file_types::Model> for FileType {
    type Error = DbErr;

    fn try_from(model: file_types::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            code: model.code,
            text: model.text,
            help: model.help,
            extensions: string_list("extensions", model.extensions)?,
            mime_types: string_list("mimetypes", model.mime_types)?,
            bucket: model.bucket,
            path: model.path,
        })
    }
}

/// A file type as listed to browsers, without the internal identifier.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FileTypeListing {
    #[serde(rename = "type")]
    pub code: String,
    pub text: String,
    pub help: String,
    pub extensions: Vec<String>,
    #[serde(rename = "mimetypes")]
    pub mime_types: Vec<String>,
    pub bucket: String,
    pub path: String,
}

impl From<FileType> for FileTypeListing {
    fn from(t: FileType) -> Self {
        Self {
            code: t.code,
            text: t.text,
            help: t.help,
            extensions: t.extensions,
            mime_types: t.mime_types,
            bucket: t.bucket,
            path: t.path,
        }
    }
}

/// Every writable field of a file type. Creation and update both replace the full set.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct FileTypeInput {
    #[validate(length(min = 1, max = 255, message = "File type must be at most 255 characters"))]
    pub code: String,
    #[validate(length(min = 1, max = 255, message = "File text must be at most 255 characters"))]
    pub text: String,
    #[validate(length(min = 1, max = 1024, message = "File help must be at most 1024 characters"))]
    pub help: String,
    #[validate(length(min = 1, message = "Please provide extensions"))]
    pub extensions: Vec<String>,
    #[validate(length(min = 1, message = "Please provide mimetypes"))]
    pub mime_types: Vec<String>,
    #[validate(length(min = 1, max = 63, message = "Bucket name must be at most 63 characters"))]
    pub bucket: String,
    #[validate(length(min = 1, max = 255, message = "Bucket path must be at most 255 characters"))]
    pub path: String,
}

impl FileTypeInput {
    /// Writes every field into the active model.
    pub fn write_to(self, model: &mut file_types::ActiveModel) {
        model.code = Set(self.code);
        model.text = Set(self.text);
        model.help = Set(self.help);
        model.extensions = Set(serde_json::Value::from(self.extensions));
        model.mime_types = Set(serde_json::Value::from(self.mime_types));
        model.bucket = Set(self.bucket);
        model.path = Set(self.path);
    }
}

/// Metadata for one uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FileRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<files::Model> for FileRecord {
    fn from(model: files::Model) -> Self {
        Self {
            id: model.id,
            file_type: model.file_type,
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewFileRecord {
    pub file_type: String,
    pub name: String,
    #[validate(length(max = 1024, message = "File description is too long"))]
    pub description: String,
}

/// Partial update of a file record. Only named fields are merged; `None` leaves the stored value.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct FileRecordPatch {
    #[validate(length(max = 1024, message = "File description is too long"))]
    pub description: Option<String>,
}

impl FileRecordPatch {
    pub fn apply(self, model: &mut files::ActiveModel) {
        if let Some(description) = self.description {
            model.description = Set(description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn image_type_row() -> file_types::Model {
        file_types::Model {
            id: "t1".to_string(),
            code: "image".to_string(),
            text: "Image".to_string(),
            help: "JPEG or PNG".to_string(),
            extensions: json!(["jpg", "png"]),
            mime_types: json!(["image/jpeg", "image/png"]),
            bucket: "b1".to_string(),
            path: "images".to_string(),
        }
    }

    #[test]
    fn test_file_type_from_row() {
        let file_type = FileType::try_from(image_type_row()).unwrap();
        assert!(file_type.accepts_extension("jpg"));
        assert!(!file_type.accepts_extension("JPG"));
        assert!(file_type.accepts_mime_type("image/png"));
        assert!(!file_type.accepts_mime_type("image/gif"));
    }

    #[test]
    fn test_malformed_list_is_a_data_error() {
        let mut row = image_type_row();
        row.extensions = json!("jpg");
        assert!(matches!(FileType::try_from(row), Err(DbErr::Json(_))));
    }

    #[test]
    fn test_listing_serializes_without_id() {
        let listing = FileTypeListing::from(FileType::try_from(image_type_row()).unwrap());
        let value = serde_json::to_value(listing).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["type"], "image");
        assert_eq!(value["mimetypes"], json!(["image/jpeg", "image/png"]));
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let patch = FileRecordPatch::default();
        let mut model = files::ActiveModel::default();
        patch.apply(&mut model);
        assert!(model.description.is_not_set());
    }

    #[test]
    fn test_file_type_input_validation() {
        let input = FileTypeInput {
            code: "image".to_string(),
            text: "Image".to_string(),
            help: "help".to_string(),
            extensions: vec!["jpg".to_string()],
            mime_types: vec!["image/jpeg".to_string()],
            bucket: "b1".to_string(),
            path: "images".to_string(),
        };
        assert!(input.validate().is_ok());

        let input = FileTypeInput {
            bucket: "b".repeat(64),
            ..input
        };
        assert!(input.validate().is_err());
    }
}
