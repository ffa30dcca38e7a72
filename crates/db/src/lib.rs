//! MongoDB client factory and the `db` core module.

use anyhow::Context;
use async_trait::async_trait;
use mongodb::{bson::doc, options::ClientOptions, Client, Collection, Database};
use serde::{de::DeserializeOwned, Serialize};

use shelf_kernel::{settings::DatabaseSettings, InitCtx, Module};

/// Handle to the configured database. Cheap to clone; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct Db {
    client: Client,
    database: Database,
}

impl Db {
    /// Typed handle to a collection in the configured database.
    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        self.database.collection::<T>(name)
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Round-trip a `ping` command to verify the server is reachable.
    pub async fn ping(&self) -> anyhow::Result<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .with_context(|| format!("ping to database '{}' failed", self.database.name()))?;
        Ok(())
    }

    /// Close every pooled connection. Pending operations finish first.
    pub async fn shutdown(&self) {
        self.client.clone().shutdown().await;
    }
}

/// Build a client from settings. The driver connects lazily; call [`Db::ping`]
/// to surface connectivity problems early.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Db> {
    let mut options = ClientOptions::parse(&settings.uri)
        .await
        .with_context(|| format!("invalid database uri '{}'", settings.redacted_uri()))?;
    options.app_name = Some(settings.app_name.clone());

    let client = Client::with_options(options).context("failed to build database client")?;
    let database = client.database(&settings.database);

    tracing::info!(
        target: "shelf-db",
        uri = %settings.redacted_uri(),
        database = %settings.database,
        "database client created"
    );

    Ok(Db { client, database })
}

/// Core module owning the database connection lifecycle.
pub struct DbModule {
    db: Db,
}

impl DbModule {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Module for DbModule {
    fn name(&self) -> &'static str {
        "db"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        self.db.ping().await?;
        tracing::info!(
            module = self.name(),
            database = %ctx.settings.database.database,
            "database reachable"
        );
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        self.db.shutdown().await;
        tracing::info!(module = self.name(), "database client shut down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_rejects_malformed_uri() {
        let settings = DatabaseSettings {
            uri: "postgres://user:pw@localhost".to_string(),
            ..DatabaseSettings::default()
        };
        let err = connect(&settings).await.unwrap_err();
        let rendered = format!("{:#}", err);
        assert!(rendered.contains("invalid database uri 'postgres://***@localhost'"));
    }

    #[tokio::test]
    async fn connect_is_lazy() {
        let db = connect(&DatabaseSettings::default()).await.unwrap();
        assert_eq!(db.database().name(), "my_library");
    }
}
