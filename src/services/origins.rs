use crate::entities::{origins, prelude::*};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

/// Browser origins allowed to call the API cross-origin.
#[derive(Clone)]
pub struct OriginRegistry {
    db: DatabaseConnection,
}

impl OriginRegistry {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<String>, DbErr> {
        let rows = Origins::find()
            .order_by_asc(origins::Column::Origin)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|o| o.origin).collect())
    }

    /// Inserts the origin unless it is already registered. Returns whether a row was added.
    pub async fn add(&self, origin: &str) -> Result<bool, DbErr> {
        let existing = Origins::find()
            .filter(origins::Column::Origin.eq(origin))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Ok(false);
        }

        origins::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            origin: Set(origin.to_string()),
        }
        .insert(&self.db)
        .await?;
        Ok(true)
    }
}
