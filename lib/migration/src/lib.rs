pub use sea_orm_migration::prelude::*;

use crate::revision::Revision;

pub(crate) mod datatype;
pub mod revision;
pub mod runner;

mod m20250601_000001_initial;
mod m20250702_191444_add_position_to_fields;
mod m20250707_115514_better_auth;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_initial::Migration),
            Box::new(m20250702_191444_add_position_to_fields::Migration),
            Box::new(m20250707_115514_better_auth::Migration),
        ]
    }
}

impl Migrator {
    /// Revisions of the registered migrations, in registration order.
    pub fn revisions() -> Vec<Revision> {
        vec![
            m20250601_000001_initial::REVISION,
            m20250702_191444_add_position_to_fields::REVISION,
            m20250707_115514_better_auth::REVISION,
        ]
    }
}
