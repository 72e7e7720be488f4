//! Applies and reverts the registered migrations, addressing them by revision.

use sea_orm::DatabaseConnection;
use sea_orm_migration::migrator::{MigrationStatus, MigratorTrait};
use sea_orm_migration::prelude::DbErr;

use crate::Migrator;
use crate::revision::{self, Revision, RevisionError};

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("Invalid revision chain: `{0}`")]
    InvalidChain(#[from] RevisionError),
    #[error("{migrations} migrations registered but {revisions} revisions declared")]
    MigrationCountMismatch { migrations: usize, revisions: usize },
    #[error("Unknown revision `{0}`")]
    UnknownRevision(String),
    #[error("Revision `{target}` is behind the current revision `{current}`")]
    TargetBehindCurrent {
        target: String,
        current: &'static str,
    },
    #[error("Revision `{target}` is ahead of the current revision {current:?}")]
    TargetAheadOfCurrent {
        target: String,
        current: Option<&'static str>,
    },
    #[error("Database error: `{0}`")]
    Database(#[from] DbErr),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevisionStatus {
    pub revision: Revision,
    pub name: String,
    pub applied: bool,
}

/// Applies every pending migration.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), RunnerError> {
    checked_revisions()?;

    let pending = Migrator::get_pending_migrations(db).await?;
    if pending.is_empty() {
        tracing::info!("Database schema is up to date");
        return Ok(());
    }

    tracing::info!(count = pending.len(), "Applying pending migrations");
    Migrator::up(db, None).await?;
    tracing::info!(head = ?current_revision(db).await?, "Database schema migrated");

    Ok(())
}

/// Applies the next `steps` pending migrations.
pub async fn apply(db: &DatabaseConnection, steps: u32) -> Result<(), RunnerError> {
    checked_revisions()?;

    if steps == 0 {
        return Ok(());
    }

    Migrator::up(db, Some(steps)).await?;
    tracing::info!(steps, head = ?current_revision(db).await?, "Applied migrations");

    Ok(())
}

/// Reverts the last `steps` applied migrations.
pub async fn rollback(db: &DatabaseConnection, steps: u32) -> Result<(), RunnerError> {
    checked_revisions()?;

    if steps == 0 {
        return Ok(());
    }

    Migrator::down(db, Some(steps)).await?;
    tracing::info!(steps, head = ?current_revision(db).await?, "Rolled back migrations");

    Ok(())
}

/// Applies migrations up to and including `target`.
pub async fn upgrade_to(db: &DatabaseConnection, target: &str) -> Result<(), RunnerError> {
    let revisions = checked_revisions()?;
    let wanted = position_of(&revisions, target)? + 1;
    let applied = applied_count(db).await?;

    if wanted < applied {
        return Err(RunnerError::TargetBehindCurrent {
            target: target.to_owned(),
            current: revision_at(&revisions, applied).unwrap_or_default(),
        });
    }

    let steps = wanted - applied;
    if steps == 0 {
        tracing::info!(revision = target, "Already at requested revision");
        return Ok(());
    }

    tracing::debug!(revision = target, steps, "Upgrading");
    Migrator::up(db, Some(to_steps(steps))).await?;
    tracing::info!(revision = target, "Upgraded database schema");

    Ok(())
}

/// Reverts migrations until `target` is the current revision, or until
/// nothing is applied when `target` is `None`.
pub async fn downgrade_to(
    db: &DatabaseConnection,
    target: Option<&str>,
) -> Result<(), RunnerError> {
    let revisions = checked_revisions()?;
    let wanted = match target {
        Some(target) => position_of(&revisions, target)? + 1,
        None => 0,
    };
    let applied = applied_count(db).await?;

    if wanted > applied {
        return Err(RunnerError::TargetAheadOfCurrent {
            target: target.unwrap_or_default().to_owned(),
            current: revision_at(&revisions, applied),
        });
    }

    let steps = applied - wanted;
    if steps == 0 {
        tracing::info!(revision = ?target, "Already at requested revision");
        return Ok(());
    }

    tracing::debug!(revision = ?target, steps, "Downgrading");
    Migrator::down(db, Some(to_steps(steps))).await?;
    tracing::info!(revision = ?target, "Downgraded database schema");

    Ok(())
}

/// Id of the newest applied revision.
pub async fn current_revision(
    db: &DatabaseConnection,
) -> Result<Option<&'static str>, RunnerError> {
    let revisions = checked_revisions()?;
    let applied = applied_count(db).await?;

    Ok(revision_at(&revisions, applied))
}

pub async fn history(db: &DatabaseConnection) -> Result<Vec<RevisionStatus>, RunnerError> {
    let revisions = checked_revisions()?;
    let migrations = Migrator::get_migration_with_status(db).await?;

    Ok(revisions
        .into_iter()
        .zip(migrations)
        .map(|(revision, migration)| RevisionStatus {
            revision,
            name: migration.name().to_owned(),
            applied: matches!(migration.status(), MigrationStatus::Applied),
        })
        .collect())
}

/// Drops every table and re-applies the whole chain.
pub async fn fresh(db: &DatabaseConnection) -> Result<(), RunnerError> {
    checked_revisions()?;

    tracing::info!("Recreating database schema");
    Migrator::fresh(db).await?;

    Ok(())
}

fn checked_revisions() -> Result<Vec<Revision>, RunnerError> {
    let revisions = Migrator::revisions();
    let migrations = Migrator::migrations().len();
    if migrations != revisions.len() {
        return Err(RunnerError::MigrationCountMismatch {
            migrations,
            revisions: revisions.len(),
        });
    }

    revision::verify_order(&revisions)?;

    Ok(revisions)
}

async fn applied_count(db: &DatabaseConnection) -> Result<usize, RunnerError> {
    Ok(Migrator::get_applied_migrations(db).await?.len())
}

fn position_of(revisions: &[Revision], id: &str) -> Result<usize, RunnerError> {
    revisions
        .iter()
        .position(|revision| revision.id == id)
        .ok_or_else(|| RunnerError::UnknownRevision(id.to_owned()))
}

/// Revision that is current once `applied` migrations ran.
fn revision_at(revisions: &[Revision], applied: usize) -> Option<&'static str> {
    applied
        .checked_sub(1)
        .and_then(|index| revisions.get(index))
        .map(|revision| revision.id)
}

fn to_steps(steps: usize) -> u32 {
    u32::try_from(steps).unwrap_or(u32::MAX)
}
