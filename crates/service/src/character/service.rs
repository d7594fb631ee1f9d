use std::sync::Arc;

use common::metrics::record_character_op;
use tracing::{debug, info, instrument};

use super::domain::Character;
use super::repository::CharacterStore;
use crate::errors::ServiceError;

/// Character business service independent of web framework and database.
///
/// "Not found" is a value here, never an error: `get` and `update` return
/// `None` and `delete` returns `false`, leaving the status code to the caller.
pub struct CharacterService {
    store: Arc<dyn CharacterStore>,
}

impl CharacterService {
    pub fn new(store: Arc<dyn CharacterStore>) -> Self { Self { store } }

    /// All characters in the store's natural order.
    #[instrument(skip(self))]
    pub async fn list_characters(&self) -> Result<Vec<Character>, ServiceError> {
        record_character_op("list");
        let all = self.store.find_all().await?;
        debug!(count = all.len(), "characters listed");
        Ok(all)
    }

    #[instrument(skip(self))]
    pub async fn get_character_by_id(&self, id: i64) -> Result<Option<Character>, ServiceError> {
        record_character_op("get");
        self.store.find_by_id(id).await
    }

    /// Persist a new character; any id on the input is discarded.
    ///
    /// # Examples
    /// ```
    /// use service::character::{Character, CharacterService, repository::mock::InMemoryCharacterStore};
    /// use std::sync::Arc;
    /// let svc = CharacterService::new(Arc::new(InMemoryCharacterStore::default()));
    /// let input = Character { name: Some("Goku".into()), age: Some(30), power_level: Some(9001), ..Default::default() };
    /// let created = tokio_test::block_on(svc.create_character(input)).unwrap();
    /// assert_eq!(created.id, Some(1));
    /// assert_eq!(created.name.as_deref(), Some("Goku"));
    /// ```
    #[instrument(skip(self, new_character))]
    pub async fn create_character(&self, new_character: Character) -> Result<Character, ServiceError> {
        record_character_op("create");
        let created = self.store.save(Character { id: None, ..new_character }).await?;
        info!(id = ?created.id, "character_created");
        Ok(created)
    }

    /// Replace every field of an existing character. Returns `None` and
    /// writes nothing when `id` is unknown.
    #[instrument(skip(self, updated))]
    pub async fn update_character(&self, id: i64, updated: Character) -> Result<Option<Character>, ServiceError> {
        record_character_op("update");
        let Some(mut existing) = self.store.find_by_id(id).await? else {
            debug!("update target missing");
            return Ok(None);
        };
        existing.replace_fields(updated);
        let saved = self.store.save(existing).await?;
        info!(id, "character_updated");
        Ok(Some(saved))
    }

    /// Delete after an existence check; `false` when there was nothing to delete.
    #[instrument(skip(self))]
    pub async fn delete_character(&self, id: i64) -> Result<bool, ServiceError> {
        record_character_op("delete");
        if !self.store.exists_by_id(id).await? {
            return Ok(false);
        }
        self.store.delete_by_id(id).await?;
        info!(id, "character_deleted");
        Ok(true)
    }
}
