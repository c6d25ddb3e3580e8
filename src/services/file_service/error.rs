use crate::services::storage::ObjectLocation;
use sea_orm::DbErr;
use thiserror::Error;

/// Failures of the file workflows. Each gate and each side of a partial failure is distinct.
#[derive(Error, Debug)]
pub enum FileServiceError {
    #[error("Missing file")]
    MissingFile,

    #[error("Please provide a file type")]
    MissingFileType,

    #[error("Incorrect file type")]
    UnknownFileType(String),

    #[error("Please provide a file name")]
    MissingFileName,

    #[error("Please provide a file description")]
    MissingDescription,

    #[error("{0}")]
    InvalidDescription(String),

    #[error("File extension does not match the chosen file type")]
    ExtensionNotAllowed { extension: String },

    #[error("Incorrect file format")]
    MimeTypeNotAllowed { mime_type: Option<String> },

    #[error("File exceeds the maximum size of {limit} bytes")]
    FileTooLarge { limit: usize },

    #[error("This file already exists in S3")]
    ObjectAlreadyExists(ObjectLocation),

    #[error("File does not exist")]
    RecordNotFound,

    #[error("File type for this file no longer exists")]
    FileTypeMissing(String),

    #[error("Object does not exist in S3")]
    ObjectMissing(ObjectLocation),

    #[error("Problem determining object status")]
    StatusCheckFailed(#[source] anyhow::Error),

    #[error("File upload to S3 failed")]
    PutFailed(#[source] anyhow::Error),

    #[error("File uploaded to S3 but database insert failed")]
    StoredButNotRecorded {
        location: ObjectLocation,
        #[source]
        source: DbErr,
    },

    #[error("File delete failed")]
    DeleteFailed(#[source] anyhow::Error),

    #[error("File removed from S3 but database deletion failed")]
    RemovedButStillRecorded {
        location: ObjectLocation,
        #[source]
        source: DbErr,
    },

    #[error("Cannot create url")]
    PresignFailed(#[source] anyhow::Error),

    #[error("Problem accessing file")]
    Database(#[from] DbErr),
}
