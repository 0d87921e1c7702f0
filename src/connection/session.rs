//! The single client connection used by one run.

use mongodb::bson::{Document, doc};
use mongodb::{Client, Database};

use crate::config::AppConfig;
use crate::connection::ListingsCollection;
use crate::error::Result;
use crate::helpers::extract_host_from_uri;

/// Owns the MongoDB client for the lifetime of one run.
///
/// Operations borrow the session; `close` consumes it. Use [`with_session`]
/// to get the close guaranteed on every exit path.
pub struct Session {
    client: Client,
    database: String,
    collection: String,
}

impl Session {
    /// Create the client. The driver connects lazily, so nothing is sent
    /// to the server until `ping` or the first operation.
    pub async fn open(config: &AppConfig) -> Result<Self> {
        log::info!(
            "Connecting to {} ({})",
            extract_host_from_uri(&config.uri).unwrap_or_else(|| "unknown host".into()),
            config.redacted_uri()
        );
        let client = Client::with_uri_str(&config.uri).await?;
        Ok(Self { client, database: config.database.clone(), collection: config.collection.clone() })
    }

    /// Round-trip to the server to surface bad hosts and credentials early.
    pub async fn ping(&self) -> Result<()> {
        self.client.database("admin").run_command(doc! { "ping": 1 }).await?;
        log::debug!("Ping succeeded");
        Ok(())
    }

    pub fn database(&self) -> Database {
        self.client.database(&self.database)
    }

    pub fn listings(&self) -> ListingsCollection {
        ListingsCollection::new(self.database().collection::<Document>(&self.collection))
    }

    /// Names of every database visible to this user.
    pub async fn list_databases(&self) -> Result<Vec<String>> {
        let names = self.client.list_database_names().await?;
        log::debug!("Found {} databases", names.len());
        Ok(names)
    }

    pub async fn close(self) {
        self.client.shutdown().await;
        log::info!("Connection closed");
    }
}

/// Open a session, verify it, run `operation`, and close the session
/// whatever the outcome.
pub async fn with_session<T>(
    config: &AppConfig,
    operation: impl AsyncFnOnce(&Session) -> Result<T>,
) -> Result<T> {
    let session = Session::open(config).await?;

    let outcome = match session.ping().await {
        Ok(()) => operation(&session).await,
        Err(err) => Err(err),
    };

    if let Err(err) = &outcome {
        log::debug!("Session ended with error: {err}");
    }
    session.close().await;
    outcome
}
