use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "file_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_name = "type", unique)]
    pub code: String,
    pub text: String,
    pub help: String,
    #[sea_orm(column_type = "Json")]
    pub extensions: Json, // JSON array of strings
    #[sea_orm(column_name = "mimetypes", column_type = "Json")]
    pub mime_types: Json, // JSON array of strings
    pub bucket: String,
    pub path: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
