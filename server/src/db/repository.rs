use async_trait::async_trait;
use mongodb::{
    bson::doc,
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{IndexOptions, ReturnDocument},
    Client, Collection, Database, IndexModel,
};

use super::{backend::SwitchBackend, models::Switch};
use crate::error::{Result, SwitchError};

const DUPLICATE_KEY: i32 = 11000;

#[derive(Clone)]
pub struct MongoDbContext {
    client: Client,
    db: Database,
    collection_name: String,
}

impl MongoDbContext {
    pub fn new(client: Client, database_name: &str, collection_name: &str) -> Self {
        Self {
            db: client.database(database_name),
            client,
            collection_name: collection_name.to_string(),
        }
    }

    /// Connect and ping the server so an unreachable store is reported at
    /// startup rather than on the first request.
    pub async fn connect(uri: &str, database_name: &str, collection_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let context = Self::new(client, database_name, collection_name);
        context.db.run_command(doc! { "ping": 1 }).await?;
        Ok(context)
    }

    pub fn switches(&self) -> SwitchRepository {
        SwitchRepository {
            collection: self.db.collection(&self.collection_name),
        }
    }

    pub async fn init_indexes(&self) -> Result<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.db
            .collection::<Switch>(&self.collection_name)
            .create_index(id_index)
            .await?;

        log::info!("Database indexes created successfully");
        Ok(())
    }

    /// Drop every switch and recreate the indexes.
    pub async fn reset(&self) -> Result<()> {
        self.db
            .collection::<Switch>(&self.collection_name)
            .drop()
            .await?;
        log::warn!("Dropped collection '{}'", self.collection_name);

        self.init_indexes().await
    }

    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

fn is_duplicate_key(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

#[derive(Clone)]
pub struct SwitchRepository {
    collection: Collection<Switch>,
}

#[async_trait]
impl SwitchBackend for SwitchRepository {
    fn name(&self) -> &'static str {
        "mongodb"
    }

    async fn insert(&self, switch: &Switch) -> Result<()> {
        match self.collection.insert_one(switch).await {
            Ok(_) => Ok(()),
            Err(err) if is_duplicate_key(&err) => Err(SwitchError::AlreadyExists),
            Err(err) => Err(err.into()),
        }
    }

    async fn find(&self, id: &str) -> Result<Option<Switch>> {
        let switch = self.collection.find_one(doc! { "id": id }).await?;
        Ok(switch)
    }

    async fn toggle_if_authorized(&self, id: &str, password: &str) -> Result<Option<bool>> {
        // Pipeline update so the negation happens server-side in one write.
        let updated = self
            .collection
            .find_one_and_update(
                doc! { "id": id, "password": password },
                vec![doc! { "$set": { "state": { "$not": ["$state"] } } }],
            )
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated.map(|switch| switch.state))
    }
}
