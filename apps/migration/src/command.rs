use clap::Subcommand;
use migration::runner::{self, RunnerError};
use sea_orm::DatabaseConnection;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Apply pending migrations
    Up {
        /// Number of migrations to apply, all pending when omitted
        #[arg(short, long)]
        steps: Option<u32>,
    },
    /// Revert applied migrations
    Down {
        #[arg(short, long, default_value_t = 1)]
        steps: u32,
    },
    /// Apply migrations up to and including a revision
    Upgrade { revision: String },
    /// Revert migrations until a revision is current, everything when omitted
    Downgrade { revision: Option<String> },
    /// Print the current revision
    Current,
    /// Print every revision and whether it is applied
    History,
    /// Drop all tables and apply every migration again
    Fresh,
}

impl Command {
    pub async fn execute(self, db: &DatabaseConnection) -> Result<(), RunnerError> {
        match self {
            Command::Up { steps: None } => runner::run_migrations(db).await,
            Command::Up { steps: Some(steps) } => runner::apply(db, steps).await,
            Command::Down { steps } => runner::rollback(db, steps).await,
            Command::Upgrade { revision } => runner::upgrade_to(db, &revision).await,
            Command::Downgrade { revision } => runner::downgrade_to(db, revision.as_deref()).await,
            Command::Current => {
                println!("{}", runner::current_revision(db).await?.unwrap_or("<base>"));
                Ok(())
            }
            Command::History => {
                for status in runner::history(db).await?.into_iter().rev() {
                    println!(
                        "{} -> {} ({}){}",
                        status.revision.down_revision.unwrap_or("<base>"),
                        status.revision.id,
                        status.name,
                        if status.applied { " [applied]" } else { "" },
                    );
                }
                Ok(())
            }
            Command::Fresh => runner::fresh(db).await,
        }
    }
}
