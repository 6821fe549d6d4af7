//! SeaORM-based vehicle record store

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set, TryInsertResult};
use std::sync::Arc;
use tracing::debug;

use crate::entities::{prelude::Vehicles, vehicles};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{VehicleRecord, Vin};
use crate::repositories::{PutOutcome, VehicleStore};

/// SeaORM-based repository for the `vehicles` table
#[derive(Clone)]
pub struct VehicleSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl VehicleSeaOrmRepository {
    /// Create a new repository instance
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    /// Convert SeaORM model to domain model
    fn model_to_domain(model: vehicles::Model) -> RepositoryResult<VehicleRecord> {
        let vin = Vin::try_from(model.vin.as_str()).map_err(|_| {
            RepositoryError::InvalidStoredValue {
                table: "vehicles".to_string(),
                field: "vin".to_string(),
                value: model.vin.clone(),
            }
        })?;

        Ok(VehicleRecord {
            vin,
            make: model.make,
            model: model.model,
            model_year: model.model_year,
            body_class: model.body_class,
        })
    }
}

#[async_trait]
impl VehicleStore for VehicleSeaOrmRepository {
    async fn get(&self, vin: &Vin) -> RepositoryResult<Option<VehicleRecord>> {
        let model = Vehicles::find_by_id(vin.as_str().to_string())
            .one(&*self.connection)
            .await?;

        model.map(Self::model_to_domain).transpose()
    }

    async fn put(&self, record: &VehicleRecord) -> RepositoryResult<PutOutcome> {
        let active_model = vehicles::ActiveModel {
            vin: Set(record.vin.as_str().to_string()),
            make: Set(record.make.clone()),
            model: Set(record.model.clone()),
            model_year: Set(record.model_year),
            body_class: Set(record.body_class.clone()),
        };

        let result = Vehicles::insert(active_model)
            .on_conflict(
                OnConflict::column(vehicles::Column::Vin)
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(&*self.connection)
            .await?;

        match result {
            TryInsertResult::Inserted(_) => Ok(PutOutcome::Inserted),
            TryInsertResult::Conflicted | TryInsertResult::Empty => {
                debug!(vin = %record.vin, "Record already present, write skipped");
                Ok(PutOutcome::AlreadyPresent)
            }
        }
    }

    async fn delete(&self, vin: &Vin) -> RepositoryResult<bool> {
        let result = Vehicles::delete_by_id(vin.as_str().to_string())
            .exec(&*self.connection)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn list(&self) -> RepositoryResult<Vec<VehicleRecord>> {
        Vehicles::find()
            .all(&*self.connection)
            .await?
            .into_iter()
            .map(Self::model_to_domain)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;

    async fn repository() -> VehicleSeaOrmRepository {
        let database = Database::new_in_memory().await.unwrap();
        database.migrate().await.unwrap();
        VehicleSeaOrmRepository::new(database.connection())
    }

    fn record(vin: &str, make: &str) -> VehicleRecord {
        VehicleRecord {
            vin: Vin::try_from(vin).unwrap(),
            make: make.to_string(),
            model: "GU (Granite)".to_string(),
            model_year: 2008,
            body_class: "Truck".to_string(),
        }
    }

    #[test]
    fn test_stored_column_identifiers() {
        use sea_orm::{IdenStatic, Iterable};

        let columns: Vec<String> = vehicles::Column::iter()
            .map(|c| c.as_str().to_string())
            .collect();
        assert_eq!(columns, vec!["vin", "make", "model", "model_year", "body_class"]);
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let repo = repository().await;
        let mack = record("1M2AX09C88M003743", "MACK");

        assert_eq!(repo.put(&mack).await.unwrap(), PutOutcome::Inserted);
        assert_eq!(repo.get(&mack.vin).await.unwrap(), Some(mack));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = repository().await;
        let vin = Vin::try_from("1XP5DB9X7XD487964").unwrap();
        assert_eq!(repo.get(&vin).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_put_keeps_first_record() {
        let repo = repository().await;
        let first = record("1M2AX09C88M003743", "MACK");
        let second = record("1M2AX09C88M003743", "NOT MACK");

        assert_eq!(repo.put(&first).await.unwrap(), PutOutcome::Inserted);
        assert_eq!(repo.put(&second).await.unwrap(), PutOutcome::AlreadyPresent);

        assert_eq!(repo.get(&first.vin).await.unwrap(), Some(first));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_reports_presence() {
        let repo = repository().await;
        let mack = record("1M2AX09C88M003743", "MACK");
        repo.put(&mack).await.unwrap();

        assert!(repo.delete(&mack.vin).await.unwrap());
        assert!(!repo.delete(&mack.vin).await.unwrap());
        assert_eq!(repo.get(&mack.vin).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_returns_all_records() {
        let repo = repository().await;
        repo.put(&record("1M2AX09C88M003743", "MACK")).await.unwrap();
        repo.put(&record("1XP5DB9X7XD487964", "PETERBILT")).await.unwrap();

        let mut makes: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.make)
            .collect();
        makes.sort();
        assert_eq!(makes, vec!["MACK", "PETERBILT"]);
    }
}
