use crate::entities::{file_types, prelude::*};
use crate::models::{FileType, FileTypeInput};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

/// Reference table of accepted file types. Every call reads the store; nothing is cached.
#[derive(Clone)]
pub struct FileTypeRegistry {
    db: DatabaseConnection,
}

impl FileTypeRegistry {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(&self, id: &str) -> Result<Option<FileType>, DbErr> {
        FileTypes::find_by_id(id)
            .one(&self.db)
            .await?
            .map(FileType::try_from)
            .transpose()
    }

    /// Resolves a type code.
    pub async fn lookup(&self, code: &str) -> Result<Option<FileType>, DbErr> {
        FileTypes::find()
            .filter(file_types::Column::Code.eq(code))
            .one(&self.db)
            .await?
            .map(FileType::try_from)
            .transpose()
    }

    /// All types, alphabetical by code.
    pub async fn list_all(&self) -> Result<Vec<FileType>, DbErr> {
        FileTypes::find()
            .order_by_asc(file_types::Column::Code)
            .all(&self.db)
            .await?
            .into_iter()
            .map(FileType::try_from)
            .collect()
    }

    pub async fn create(&self, input: FileTypeInput) -> Result<FileType, DbErr> {
        let mut model = file_types::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            ..Default::default()
        };
        input.write_to(&mut model);

        let inserted = model.insert(&self.db).await?;
        tracing::info!("🗂️  File type '{}' registered", inserted.code);
        FileType::try_from(inserted)
    }

    /// Replaces every field of an existing type. Returns `None` when the id is unknown.
    pub async fn replace(&self, id: &str, input: FileTypeInput) -> Result<Option<FileType>, DbErr> {
        let Some(existing) = FileTypes::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: file_types::ActiveModel = existing.into();
        input.write_to(&mut model);

        let updated = model.update(&self.db).await?;
        tracing::info!("🗂️  File type '{}' updated", updated.code);
        FileType::try_from(updated).map(Some)
    }
}
