use migration::runner::run_migrations;
use sea_orm::sqlx::MySql;
use sea_orm::{ConnectOptions, ConnectionTrait, DatabaseConnection, DbBackend};
use sea_schema::mysql::def::{ColumnDefault, ColumnKey, TableDef, Type};
use sea_schema::mysql::discovery::SchemaDiscovery;

use super::snapshot::{ColumnInfo, ForeignKeyInfo, IndexInfo, Snapshot, TableInfo};

/// Migrates a freshly created database on the server behind `url`.
pub(super) async fn get_mysql_schema(url: &str) -> Box<dyn super::Schema> {
    let mut url: url::Url = url.parse().unwrap();
    url.set_path("");
    let server = sea_orm::Database::connect(url.to_string()).await.unwrap();

    let db_name = format!("migration_{}", ulid::Ulid::new().to_string().to_lowercase());
    server
        .execute_unprepared(&format!("CREATE DATABASE {db_name}"))
        .await
        .unwrap();

    url.set_path(&db_name);
    let pool = ConnectOptions::new(url.to_string())
        .sqlx_pool_options::<MySql>()
        .connect(url.as_str())
        .await
        .unwrap();

    run_migrations(&DatabaseConnection::from(pool.to_owned()))
        .await
        .unwrap();

    let discovered = SchemaDiscovery::new(pool, &db_name)
        .discover()
        .await
        .unwrap();

    Box::new(Snapshot {
        backend: DbBackend::MySql,
        tables: discovered
            .tables
            .into_iter()
            .filter(|table| table.info.name != "seaql_migrations")
            .map(table_info)
            .collect(),
    })
}

fn table_info(table: TableDef) -> TableInfo {
    TableInfo {
        name: table.info.name,
        columns: table
            .columns
            .into_iter()
            .map(|column| ColumnInfo {
                r#type: type_name(&column.col_type),
                not_null: !column.null,
                default: column.default.and_then(default_expression),
                primary_key: column.key == ColumnKey::Primary,
                name: column.name,
            })
            .collect(),
        foreign_keys: table
            .foreign_keys
            .into_iter()
            .flat_map(|foreign_key| {
                foreign_key
                    .columns
                    .into_iter()
                    .zip(foreign_key.referenced_columns)
                    .map(move |(from, to)| ForeignKeyInfo {
                        name: Some(foreign_key.name.to_owned()),
                        from,
                        table: foreign_key.referenced_table.to_owned(),
                        to,
                    })
            })
            .collect(),
        indexes: table
            .indexes
            .into_iter()
            .map(|index| IndexInfo {
                name: index.name,
                unique: index.unique,
                columns: index.parts.into_iter().map(|part| part.column).collect(),
            })
            .collect(),
    }
}

/// Display widths are ignored, except for `tinyint(1)` which marks booleans.
fn type_name(r#type: &Type) -> String {
    match r#type {
        Type::Varchar(attr) => match attr.length {
            Some(length) => format!("varchar({length})"),
            None => "varchar".to_string(),
        },
        Type::Int(_) => "int".to_string(),
        Type::TinyInt(attr) if attr.maximum == Some(1) => "tinyint(1)".to_string(),
        Type::DateTime(attr) => match attr.fractional {
            Some(fractional) if fractional > 0 => format!("datetime({fractional})"),
            _ => "datetime".to_string(),
        },
        other => format!("{other:?}").to_lowercase(),
    }
}

fn default_expression(default: ColumnDefault) -> Option<String> {
    match default {
        ColumnDefault::Null => None,
        ColumnDefault::Int(number) => Some(number.to_string()),
        ColumnDefault::Real(number) => Some(number.to_string()),
        ColumnDefault::String(text) => Some(format!("'{text}'")),
        ColumnDefault::CustomExpr(expression) => Some(expression),
        ColumnDefault::CurrentTimestamp => Some("CURRENT_TIMESTAMP".to_string()),
    }
}
