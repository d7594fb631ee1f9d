use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "character")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "character_id")]
    pub id: i64,
    #[sea_orm(column_name = "character_name")]
    pub name: Option<String>,
    #[sea_orm(column_name = "character_age")]
    pub age: Option<i32>,
    #[sea_orm(column_name = "character_desc", column_type = "Text", nullable)]
    #[serde(rename = "desc")]
    pub description: Option<String>,
    #[sea_orm(column_name = "character_image", column_type = "Text", nullable)]
    pub image: Option<String>,
    #[sea_orm(column_name = "character_powerlevel")]
    pub power_level: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Every mutable column of a character row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharacterFields {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub power_level: Option<i32>,
}

impl From<Model> for CharacterFields {
    fn from(m: Model) -> Self {
        Self {
            name: m.name,
            age: m.age,
            description: m.description,
            image: m.image,
            power_level: m.power_level,
        }
    }
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Insert a new row; the identity column assigns the id.
pub async fn create(db: &DatabaseConnection, fields: CharacterFields) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: NotSet,
        name: Set(fields.name),
        age: Set(fields.age),
        description: Set(fields.description),
        image: Set(fields.image),
        power_level: Set(fields.power_level),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Overwrite every non-id column of an existing row.
pub async fn replace(db: &DatabaseConnection, id: i64, fields: CharacterFields) -> Result<Model, errors::ModelError> {
    let mut found: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?
        .ok_or_else(|| errors::ModelError::NotFound(format!("character {id}")))?
        .into();
    found.name = Set(fields.name);
    found.age = Set(fields.age);
    found.description = Set(fields.description);
    found.image = Set(fields.image);
    found.power_level = Set(fields.power_level);
    found.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
