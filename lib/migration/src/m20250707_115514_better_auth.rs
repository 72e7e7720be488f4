use sea_orm::DbBackend;
use sea_orm_migration::prelude::*;

use crate::datatype::{ColumnDefExt, boolean_default, integer_default, string_id, timestamp};
use crate::m20250601_000001_initial::UNIQUE_USER_EMAIL_INDEX;
use crate::revision::Revision;

pub const REVISION: Revision = Revision {
    id: "aa7fe389d0a4",
    down_revision: Some("1808e811998e"),
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccountVerificationSession::Table)
                    .col(string_id(AccountVerificationSession::Id))
                    .col(string_id(AccountVerificationSession::Token))
                    .col(string_id(AccountVerificationSession::UserId))
                    .col(timestamp(AccountVerificationSession::ExpiresAt, manager))
                    .col(
                        ColumnDef::new(AccountVerificationSession::Tries)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AccountVerificationSession::MaxTries)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AccountVerificationSession::Expired)
                            .boolean()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(AccountVerificationSession::Id)
                            .col(AccountVerificationSession::Token),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-AccountVerificationSession-UserId")
                            .from_tbl(AccountVerificationSession::Table)
                            .from_col(AccountVerificationSession::UserId)
                            .to_tbl(User::Table)
                            .to_col(User::Id),
                    )
                    .to_owned(),
            )
            .await?;

        match manager.get_database_backend() {
            DbBackend::Sqlite => sqlite_migration(manager).await,
            DbBackend::MySql | DbBackend::Postgres => sane_migration(manager).await,
        }
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for column in [User::Verified, User::RegisteredAt] {
            manager
                .alter_table(
                    Table::alter()
                        .table(User::Table)
                        .drop_column(column)
                        .to_owned(),
                )
                .await?;
        }

        for column in [
            AuthSession::Verified,
            AuthSession::MaxTries,
            AuthSession::Tries,
            AuthSession::Token,
        ] {
            manager
                .alter_table(
                    Table::alter()
                        .table(AuthSession::Table)
                        .drop_column(column)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_table(
                Table::drop()
                    .table(AccountVerificationSession::Table)
                    .to_owned(),
            )
            .await
    }
}

async fn sane_migration(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let auth_session_columns = [
        auth_session_token(),
        integer_default(AuthSession::Tries, 0),
        integer_default(AuthSession::MaxTries, 3),
        boolean_default(AuthSession::Verified, false),
    ];
    for column in auth_session_columns {
        manager
            .alter_table(
                Table::alter()
                    .table(AuthSession::Table)
                    .add_column(column)
                    .to_owned(),
            )
            .await?;
    }

    for column in [registered_at(manager), boolean_default(User::Verified, false)] {
        manager
            .alter_table(
                Table::alter()
                    .table(User::Table)
                    .add_column(column)
                    .to_owned(),
            )
            .await?;
    }

    Ok(())
}

/// SQLite cannot add a NOT NULL column without a constant default, so both
/// tables are rebuilt and existing rows are copied over.
async fn sqlite_migration(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let db = manager.get_connection();

    manager
        .create_table(
            Table::create()
                .table(UserNew::Table)
                .col(string_id(User::Id).primary_key())
                .col(ColumnDef::new(User::Email).string().not_null())
                .col(ColumnDef::new(User::HashedPassword).string().not_null())
                .col(registered_at(manager))
                .col(boolean_default(User::Verified, false))
                .to_owned(),
        )
        .await?;

    // registered_at and verified are filled by their defaults
    db.execute_unprepared(
        r#"INSERT INTO "user_new" (id, email, hashed_password) SELECT id, email, hashed_password FROM "user""#,
    )
    .await?;
    replace_table(manager, "user", "user_new").await?;

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
                .table(AuthSessionNew::Table)
                .col(string_id(AuthSession::Id).primary_key())
                .col(string_id(AuthSession::UserId))
                .col(timestamp(AuthSession::ExpiresAt, manager))
                .col(auth_session_token())
                .col(integer_default(AuthSession::Tries, 0))
                .col(integer_default(AuthSession::MaxTries, 3))
                .col(boolean_default(AuthSession::Verified, false))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk-AuthSession-UserId")
                        .from_tbl(AuthSessionNew::Table)
                        .from_col(AuthSession::UserId)
                        .to_tbl(User::Table)
                        .to_col(User::Id),
                )
                .to_owned(),
        )
        .await?;

    // sessions created before tokens existed get an empty one, which never matches
    db.execute_unprepared(
        "INSERT INTO authsession_new (id, user_id, expires_at, token) \
         SELECT id, user_id, expires_at, '' FROM authsession",
    )
    .await?;
    replace_table(manager, "authsession", "authsession_new").await
}

/// Drops `table` and renames `new_table` into its place.
///
/// Foreign key enforcement is off for the swap only: children of `table`
/// keep referencing it by name and are valid again after the rename. Both
/// pragmas run in one call so they apply to the same pooled connection.
async fn replace_table(
    manager: &SchemaManager<'_>,
    table: &str,
    new_table: &str,
) -> Result<(), DbErr> {
    manager
        .get_connection()
        .execute_unprepared(&format!(
            r#"PRAGMA foreign_keys = OFF; DROP TABLE "{table}"; ALTER TABLE "{new_table}" RENAME TO "{table}"; PRAGMA foreign_keys = ON;"#
        ))
        .await?;

    Ok(())
}

fn auth_session_token() -> ColumnDef {
    ColumnDef::new(AuthSession::Token)
        .string()
        .not_null()
        .take()
}

/// Second precision: MySQL only accepts `CURRENT_TIMESTAMP` as default of a
/// `datetime` column whose precision matches the function's.
fn registered_at(manager: &SchemaManager) -> ColumnDef {
    ColumnDef::new(User::RegisteredAt)
        .datetime_second_precision(manager)
        .not_null()
        .default(Expr::current_timestamp())
        .take()
}

#[derive(Iden)]
enum AccountVerificationSession {
    #[iden = "accountverificationsession"]
    Table,
    Id,
    Token,
    UserId,
    ExpiresAt,
    Tries,
    MaxTries,
    Expired,
}

#[derive(Iden)]
enum AuthSession {
    #[iden = "authsession"]
    Table,
    Id,
    UserId,
    ExpiresAt,
    Token,
    Tries,
    MaxTries,
    Verified,
}

#[derive(Iden)]
enum AuthSessionNew {
    #[iden = "authsession_new"]
    Table,
}

#[derive(Iden)]
enum User {
    #[iden = "user"]
    Table,
    Id,
    Email,
    HashedPassword,
    RegisteredAt,
    Verified,
}

#[derive(Iden)]
enum UserNew {
    #[iden = "user_new"]
    Table,
}
