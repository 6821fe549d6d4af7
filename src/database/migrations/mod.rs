//! SeaORM migrations
//!
//! Migrations are database-agnostic and run at start-up before the web
//! server accepts requests. Names follow `mYYYYMMDD_HHMMSS_description`.

use sea_orm_migration::prelude::*;

pub mod m20230614_091932_create_vehicles_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20230614_091932_create_vehicles_table::Migration)]
    }
}
