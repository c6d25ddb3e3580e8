use crate::entities::{files, prelude::*};
use crate::models::{FileRecord, FileRecordPatch, NewFileRecord};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

/// Metadata store: one row per uploaded file.
#[derive(Clone)]
pub struct FileRepository {
    db: DatabaseConnection,
}

impl FileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: &str) -> Result<Option<FileRecord>, DbErr> {
        Ok(Files::find_by_id(id)
            .one(&self.db)
            .await?
            .map(FileRecord::from))
    }

    /// All records, ordered by file name.
    pub async fn list(&self) -> Result<Vec<FileRecord>, DbErr> {
        let rows = Files::find()
            .order_by_asc(files::Column::Name)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(FileRecord::from).collect())
    }

    pub async fn insert(&self, new: NewFileRecord) -> Result<FileRecord, DbErr> {
        let model = files::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            file_type: Set(new.file_type),
            name: Set(new.name),
            description: Set(new.description),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };
        Ok(model.insert(&self.db).await?.into())
    }

    /// Merges the patch into the stored record. Last writer wins; returns `None` for an unknown id.
    pub async fn apply_patch(
        &self,
        id: &str,
        patch: FileRecordPatch,
    ) -> Result<Option<FileRecord>, DbErr> {
        let Some(existing) = Files::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: files::ActiveModel = existing.into();
        patch.apply(&mut model);
        model.updated_at = Set(Some(Utc::now()));

        Ok(Some(model.update(&self.db).await?.into()))
    }

    /// Returns whether a row was removed.
    pub async fn delete(&self, id: &str) -> Result<bool, DbErr> {
        let res = Files::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
