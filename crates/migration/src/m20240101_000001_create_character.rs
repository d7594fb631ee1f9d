//! Create `character` table.
//! Every column except the identity key is nullable; the API accepts partial payloads.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Character::Table)
                    .if_not_exists()
                    .col(big_integer(Character::CharacterId).auto_increment().primary_key())
                    .col(string_null(Character::CharacterName))
                    .col(integer_null(Character::CharacterAge))
                    .col(text_null(Character::CharacterDesc))
                    .col(text_null(Character::CharacterImage))
                    .col(integer_null(Character::CharacterPowerlevel))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Character::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Character {
    Table,
    CharacterId,
    CharacterName,
    CharacterAge,
    CharacterDesc,
    CharacterImage,
    CharacterPowerlevel,
}
