use async_trait::async_trait;

use super::domain::Character;
use crate::errors::ServiceError;

/// Repository abstraction for character persistence.
///
/// `save` inserts when `id` is `None` (the store assigns the id) and
/// overwrites the row otherwise.
#[async_trait]
pub trait CharacterStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Character>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Character>, ServiceError>;
    async fn save(&self, character: Character) -> Result<Character, ServiceError>;
    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError>;
}

/// Simple in-memory stores for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Rows {
        next_id: i64,
        by_id: BTreeMap<i64, Character>,
    }

    /// Keeps rows in id order, assigning ids from 1 like an identity column.
    #[derive(Default)]
    pub struct InMemoryCharacterStore {
        rows: Mutex<Rows>,
    }

    impl InMemoryCharacterStore {
        pub fn len(&self) -> usize {
            self.rows.lock().unwrap().by_id.len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    #[async_trait]
    impl CharacterStore for InMemoryCharacterStore {
        async fn find_all(&self) -> Result<Vec<Character>, ServiceError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.by_id.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Character>, ServiceError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.by_id.get(&id).cloned())
        }

        async fn save(&self, mut character: Character) -> Result<Character, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            let id = match character.id {
                Some(id) => id,
                None => {
                    rows.next_id += 1;
                    rows.next_id
                }
            };
            character.id = Some(id);
            rows.by_id.insert(id, character.clone());
            Ok(character)
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
            self.rows.lock().unwrap().by_id.remove(&id);
            Ok(())
        }

        async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.rows.lock().unwrap().by_id.contains_key(&id))
        }
    }

    /// Fails every call, standing in for an unreachable database.
    #[derive(Default)]
    pub struct FailingCharacterStore;

    impl FailingCharacterStore {
        fn fault() -> ServiceError {
            ServiceError::Db("connection refused".into())
        }
    }

    #[async_trait]
    impl CharacterStore for FailingCharacterStore {
        async fn find_all(&self) -> Result<Vec<Character>, ServiceError> {
            Err(Self::fault())
        }

        async fn find_by_id(&self, _id: i64) -> Result<Option<Character>, ServiceError> {
            Err(Self::fault())
        }

        async fn save(&self, _character: Character) -> Result<Character, ServiceError> {
            Err(Self::fault())
        }

        async fn delete_by_id(&self, _id: i64) -> Result<(), ServiceError> {
            Err(Self::fault())
        }

        async fn exists_by_id(&self, _id: i64) -> Result<bool, ServiceError> {
            Err(Self::fault())
        }
    }
}
