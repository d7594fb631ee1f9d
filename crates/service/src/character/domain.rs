use models::character::{CharacterFields, Model};
use serde::{Deserialize, Serialize};

/// A character record as exchanged with clients.
///
/// `id` is `None` until the store assigns one. Every other field is optional;
/// the API does not validate content beyond what the table accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default, rename = "desc", alias = "description")]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub power_level: Option<i32>,
}

impl Character {
    /// Overwrite every non-id field with the values from `updated`.
    pub fn replace_fields(&mut self, updated: Character) {
        self.name = updated.name;
        self.age = updated.age;
        self.description = updated.description;
        self.image = updated.image;
        self.power_level = updated.power_level;
    }

    pub fn fields(&self) -> CharacterFields {
        CharacterFields {
            name: self.name.clone(),
            age: self.age,
            description: self.description.clone(),
            image: self.image.clone(),
            power_level: self.power_level,
        }
    }
}

impl From<Model> for Character {
    fn from(m: Model) -> Self {
        Self {
            id: Some(m.id),
            name: m.name,
            age: m.age,
            description: m.description,
            image: m.image,
            power_level: m.power_level,
        }
    }
}
