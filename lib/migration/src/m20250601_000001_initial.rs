use sea_orm_migration::prelude::*;

use crate::datatype::{string_id, timestamp};
use crate::revision::Revision;

pub const REVISION: Revision = Revision {
    id: "587b8b93effc",
    down_revision: None,
};

pub const UNIQUE_USER_EMAIL_INDEX: &str = "index-User-Email-Unique";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .col(string_id(User::Id).primary_key())
                    .col(ColumnDef::new(User::Email).string().not_null())
                    .col(ColumnDef::new(User::HashedPassword).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(UNIQUE_USER_EMAIL_INDEX)
                    .table(User::Table)
                    .col(User::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Form::Table)
                    .col(string_id(Form::Id).primary_key())
                    .col(ColumnDef::new(Form::Title).string().not_null())
                    .col(ColumnDef::new(Form::Description).string().null())
                    .col(string_id(Form::OwnerId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-Form-OwnerId")
                            .from_tbl(Form::Table)
                            .from_col(Form::OwnerId)
                            .to_tbl(User::Table)
                            .to_col(User::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FormField::Table)
                    .col(string_id(FormField::Id).primary_key())
                    .col(string_id(FormField::FormId))
                    .col(ColumnDef::new(FormField::Label).string().not_null())
                    .col(ColumnDef::new(FormField::Description).string().null())
                    .col(ColumnDef::new(FormField::FieldType).string().not_null())
                    .col(ColumnDef::new(FormField::Required).boolean().not_null())
                    .col(ColumnDef::new(FormField::PossibleAnswers).string().null())
                    .col(ColumnDef::new(FormField::NumberBounds).string().null())
                    .col(ColumnDef::new(FormField::TextBounds).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-FormField-FormId")
                            .from_tbl(FormField::Table)
                            .from_col(FormField::FormId)
                            .to_tbl(Form::Table)
                            .to_col(Form::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AuthSession::Table)
                    .col(string_id(AuthSession::Id).primary_key())
                    .col(string_id(AuthSession::UserId))
                    .col(timestamp(AuthSession::ExpiresAt, manager))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-AuthSession-UserId")
                            .from_tbl(AuthSession::Table)
                            .from_col(AuthSession::UserId)
                            .to_tbl(User::Table)
                            .to_col(User::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuthSession::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FormField::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Form::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum User {
    #[iden = "user"]
    Table,
    Id,
    Email,
    HashedPassword,
}

#[derive(Iden)]
enum Form {
    #[iden = "form"]
    Table,
    Id,
    Title,
    Description,
    OwnerId,
}

#[derive(Iden)]
enum FormField {
    #[iden = "formfield"]
    Table,
    Id,
    FormId,
    Label,
    Description,
    FieldType,
    Required,
    PossibleAnswers,
    NumberBounds,
    TextBounds,
}

#[derive(Iden)]
enum AuthSession {
    #[iden = "authsession"]
    Table,
    Id,
    UserId,
    ExpiresAt,
}
