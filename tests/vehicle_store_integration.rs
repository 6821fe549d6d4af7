//! Record store behaviour against a file-backed SQLite database

use std::sync::Arc;

use vin_proxy::{
    config::DatabaseConfig,
    database::{Database, repositories::VehicleSeaOrmRepository},
    models::{VehicleRecord, Vin},
    repositories::{PutOutcome, VehicleStore},
};

fn record(make: &str) -> VehicleRecord {
    VehicleRecord {
        vin: Vin::try_from("1XP5DB9X7XD487964").unwrap(),
        make: make.to_string(),
        model: "379".to_string(),
        model_year: 1999,
        body_class: "Truck-Tractor".to_string(),
    }
}

async fn file_backed_store(dir: &tempfile::TempDir) -> Arc<VehicleSeaOrmRepository> {
    let config = DatabaseConfig {
        url: format!("sqlite://{}/vehicles.db", dir.path().display()),
        max_connections: Some(4),
    };
    let database = Database::new(&config).await.unwrap();
    database.migrate().await.unwrap();
    Arc::new(VehicleSeaOrmRepository::new(database.connection()))
}

#[tokio::test]
async fn concurrent_puts_keep_a_single_row() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_backed_store(&dir).await;

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move { store.put(&record(&format!("MAKE-{i}"))).await })
        })
        .collect();

    let mut inserted = 0;
    for task in tasks {
        match task.await.unwrap().unwrap() {
            PutOutcome::Inserted => inserted += 1,
            PutOutcome::AlreadyPresent => {}
        }
    }

    assert_eq!(inserted, 1);
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn records_survive_reconnect() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = file_backed_store(&dir).await;
        store.put(&record("PETERBILT")).await.unwrap();
    }

    let store = file_backed_store(&dir).await;
    let vin = Vin::try_from("1XP5DB9X7XD487964").unwrap();
    let cached = store.get(&vin).await.unwrap().expect("record persisted");
    assert_eq!(cached, record("PETERBILT"));
}
