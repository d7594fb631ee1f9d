use sea_orm::{DatabaseConnection, EntityTrait};

use crate::character::domain::Character;
use crate::character::repository::CharacterStore;
use crate::errors::ServiceError;

/// SeaORM-backed character store over the `character` table.
pub struct SeaOrmCharacterStore {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl CharacterStore for SeaOrmCharacterStore {
    async fn find_all(&self) -> Result<Vec<Character>, ServiceError> {
        let rows = models::character::list(&self.db).await?;
        Ok(rows.into_iter().map(Character::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Character>, ServiceError> {
        let found = models::character::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(Character::from))
    }

    async fn save(&self, character: Character) -> Result<Character, ServiceError> {
        let saved = match character.id {
            None => models::character::create(&self.db, character.fields()).await?,
            Some(id) => models::character::replace(&self.db, id, character.fields()).await?,
        };
        Ok(saved.into())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        models::character::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let found = models::character::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.is_some())
    }
}
