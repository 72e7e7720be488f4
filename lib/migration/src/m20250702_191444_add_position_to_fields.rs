use sea_orm_migration::prelude::*;

use crate::revision::Revision;

pub const REVISION: Revision = Revision {
    id: "1808e811998e",
    down_revision: Some("587b8b93effc"),
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(FormField::Table)
                    .add_column(ColumnDef::new(FormField::Position).integer().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(FormField::Table)
                    .drop_column(FormField::Position)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum FormField {
    #[iden = "formfield"]
    Table,
    Position,
}
