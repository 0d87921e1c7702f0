//! Shared MongoDB container for integration tests.
//!
//! One MongoDB 7.0 container is started per test binary. Each test gets its
//! own database, named with a short UUID suffix, so tests never see each
//! other's listings.
//!
//! The container lives on a dedicated thread with its own tokio runtime so it
//! outlives the per-test `#[tokio::test]` runtimes, and an `atexit` hook
//! removes it when the process exits.

#![allow(dead_code)]

pub mod fixtures;

use airbnb_listings::config::{COLLECTION_NAME, DATABASE_NAME};
use airbnb_listings::{AppConfig, ListingsCollection};
use mongodb::bson::Document;
use mongodb::{Client, options::ClientOptions};
use std::sync::OnceLock;
use testcontainers::ImageExt;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::mongo::Mongo;

static CONNECTION_STRING: OnceLock<String> = OnceLock::new();

static CONTAINER_ID: OnceLock<String> = OnceLock::new();

unsafe extern "C" {
    fn atexit(f: extern "C" fn()) -> i32;
}

extern "C" fn remove_container() {
    if let Some(id) = CONTAINER_ID.get() {
        let _ = std::process::Command::new("docker")
            .args(["rm", "-f", id])
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status();
    }
}

fn shared_connection_string() -> &'static str {
    CONNECTION_STRING.get_or_init(|| {
        let (tx, rx) = std::sync::mpsc::sync_channel(1);

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to create container runtime");

            rt.block_on(async {
                let container = Mongo::default()
                    .with_tag("7.0")
                    .start()
                    .await
                    .expect("Failed to start MongoDB container");

                let _ = CONTAINER_ID.set(container.id().to_string());
                unsafe {
                    atexit(remove_container);
                }

                let host = container.get_host().await.expect("Failed to get host");
                let port = container.get_host_port_ipv4(27017).await.expect("Failed to get port");
                let connection_string = format!("mongodb://{}:{}", host, port);

                let opts = ClientOptions::parse(&connection_string).await.expect("Failed to parse");
                let probe = Client::with_options(opts).expect("Failed to create probe client");
                for _ in 0..30 {
                    if probe.list_database_names().await.is_ok() {
                        break;
                    }
                    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                }
                drop(probe);

                tx.send(connection_string).expect("Failed to send connection string");

                // Keep the container alive until the process exits.
                std::future::pending::<()>().await;
            });
        });

        rx.recv().expect("Failed to receive connection string")
    })
}

/// A per-test view of the shared container.
pub struct TestStore {
    pub client: Client,
    pub connection_string: String,
    pub database: String,
}

impl TestStore {
    /// Fresh client on the caller's runtime plus a unique database name.
    pub async fn start() -> Self {
        let connection_string = shared_connection_string().to_string();
        let client_options =
            ClientOptions::parse(&connection_string).await.expect("Failed to parse connection string");
        let client = Client::with_options(client_options).expect("Failed to create client");

        let test_id = uuid::Uuid::new_v4().to_string()[..8].to_string();
        let database = format!("{DATABASE_NAME}_{test_id}");

        Self { client, connection_string, database }
    }

    /// Config pointing the binary's session at this test's database.
    pub fn config(&self) -> AppConfig {
        AppConfig::new(&self.connection_string)
            .expect("container URI is valid")
            .with_database(&self.database)
    }

    /// Raw driver handle on the listings collection, for seeding and assertions.
    pub fn raw_listings(&self) -> mongodb::Collection<Document> {
        self.client.database(&self.database).collection(COLLECTION_NAME)
    }

    pub fn listings(&self) -> ListingsCollection {
        ListingsCollection::new(self.raw_listings())
    }
}
