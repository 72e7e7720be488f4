use migration::runner::{apply, downgrade_to, rollback, run_migrations};
use migration::{MigrationName, Migrator, MigratorTrait, SchemaManager};
use similar_asserts::assert_eq;

use crate::fixtures::{empty_sqlite_db, inspect};

#[tokio::test]
async fn test_every_downgrade_restores_the_previous_schema() {
    let db = empty_sqlite_db().await;

    for (position, migration) in Migrator::migrations().iter().enumerate() {
        let before = inspect(&db).await;

        apply(&db, 1).await.unwrap();
        let upgraded = inspect(&db).await;
        assert!(
            before != upgraded,
            "{} at position {position} did not change the schema",
            migration.name()
        );

        rollback(&db, 1).await.unwrap();
        assert_eq!(
            inspect(&db).await,
            before,
            "{} at position {position} is not reverted exactly",
            migration.name()
        );

        apply(&db, 1).await.unwrap();
        assert_eq!(inspect(&db).await, upgraded);
    }
}

#[tokio::test]
async fn test_full_downgrade_leaves_no_tables() {
    let db = empty_sqlite_db().await;

    run_migrations(&db).await.unwrap();
    downgrade_to(&db, None).await.unwrap();

    assert!(inspect(&db).await.is_empty());
}

#[tokio::test]
async fn test_position_downgrade_drops_only_position() {
    let db = empty_sqlite_db().await;

    apply(&db, 2).await.unwrap();
    let manager = SchemaManager::new(&db);
    assert!(manager.has_column("formfield", "position").await.unwrap());

    rollback(&db, 1).await.unwrap();
    let manager = SchemaManager::new(&db);
    assert!(!manager.has_column("formfield", "position").await.unwrap());
    assert!(manager.has_column("formfield", "label").await.unwrap());
}

#[tokio::test]
async fn test_better_auth_downgrade_drops_added_columns() {
    let db = empty_sqlite_db().await;

    run_migrations(&db).await.unwrap();
    rollback(&db, 1).await.unwrap();

    let manager = SchemaManager::new(&db);
    assert!(
        !manager
            .has_table("accountverificationsession")
            .await
            .unwrap()
    );
    for column in ["token", "tries", "max_tries", "verified"] {
        assert!(!manager.has_column("authsession", column).await.unwrap());
    }
    for column in ["registered_at", "verified"] {
        assert!(!manager.has_column("user", column).await.unwrap());
    }
    assert!(manager.has_column("formfield", "position").await.unwrap());
}
