//! MongoDB implementation of the `AssetRepository` trait.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::error::ErrorKind;
use mongodb::options::{ClientOptions, FindOptions};
use mongodb::{Client, Collection, Database};

use cablesync_core::{AssetRepository, AssetStatus, Cable, RepositoryError};

/// Where the cable collection lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoTarget {
    pub uri: String,
    pub database: String,
    pub collection: String,
    pub connect_timeout: Duration,
}

/// MongoDB implementation of the `AssetRepository` trait.
///
/// Cables are stored with the serde model directly, so a status filter on
/// `"ACTIVE"` matches exactly what the seeder wrote.
pub struct MongoAssetRepository {
    database: Database,
    collection: Collection<Cable>,
}

impl MongoAssetRepository {
    /// Build a client for `target`.
    ///
    /// The driver connects lazily; call [`AssetRepository::ping`] to verify
    /// the server is reachable.
    pub async fn connect(target: &MongoTarget) -> Result<Self, RepositoryError> {
        let mut options = ClientOptions::parse(&target.uri)
            .await
            .map_err(map_mongo_error)?;
        options.app_name = Some("cablesync".to_string());
        options.connect_timeout = Some(target.connect_timeout);
        options.server_selection_timeout = Some(target.connect_timeout);

        let client = Client::with_options(options).map_err(map_mongo_error)?;
        Ok(Self::from_client(&client, &target.database, &target.collection))
    }

    /// Wrap an existing client.
    pub fn from_client(client: &Client, database: &str, collection: &str) -> Self {
        let database = client.database(database);
        let collection = database.collection::<Cable>(collection);
        Self {
            database,
            collection,
        }
    }
}

/// Field cables are listed by.
const SORT_KEY: &str = "circuitId";

/// Filter matching the serialised form of `status`.
fn status_filter(status: AssetStatus) -> Document {
    doc! { "status": status.as_str() }
}

fn sorted() -> FindOptions {
    let mut sort = Document::new();
    sort.insert(SORT_KEY, 1);
    FindOptions::builder().sort(sort).build()
}

fn map_mongo_error(e: mongodb::error::Error) -> RepositoryError {
    match e.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::DnsResolve { .. }
        | ErrorKind::InvalidArgument { .. } => RepositoryError::Connection(e.to_string()),
        ErrorKind::BsonDeserialization(_) | ErrorKind::BsonSerialization(_) => {
            RepositoryError::Serialization(e.to_string())
        }
        _ => RepositoryError::Storage(e.to_string()),
    }
}

#[async_trait]
impl AssetRepository for MongoAssetRepository {
    async fn ping(&self) -> Result<(), RepositoryError> {
        self.database
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(map_mongo_error)?;
        tracing::debug!(database = self.database.name(), "MongoDB ping ok");
        Ok(())
    }

    async fn clear(&self) -> Result<(), RepositoryError> {
        self.collection.drop(None).await.map_err(map_mongo_error)
    }

    async fn insert(&self, cable: &Cable) -> Result<(), RepositoryError> {
        self.collection
            .insert_one(cable, None)
            .await
            .map_err(map_mongo_error)?;
        Ok(())
    }

    async fn insert_many(&self, cables: &[Cable]) -> Result<usize, RepositoryError> {
        // The driver rejects an empty batch
        if cables.is_empty() {
            return Ok(0);
        }
        let result = self
            .collection
            .insert_many(cables, None)
            .await
            .map_err(map_mongo_error)?;
        Ok(result.inserted_ids.len())
    }

    async fn list(&self) -> Result<Vec<Cable>, RepositoryError> {
        let cursor = self
            .collection
            .find(None, sorted())
            .await
            .map_err(map_mongo_error)?;
        cursor.try_collect::<Vec<Cable>>().await.map_err(map_mongo_error)
    }

    async fn list_by_status(&self, status: AssetStatus) -> Result<Vec<Cable>, RepositoryError> {
        let cursor = self
            .collection
            .find(status_filter(status), sorted())
            .await
            .map_err(map_mongo_error)?;
        cursor.try_collect::<Vec<Cable>>().await.map_err(map_mongo_error)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        self.collection
            .count_documents(None, None)
            .await
            .map_err(map_mongo_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cablesync_core::{Location, MetricType, Phase, Section, Sensor, Substation};
    use mongodb::bson::{from_document, to_document};

    fn target(uri: &str) -> MongoTarget {
        MongoTarget {
            uri: uri.to_string(),
            database: "asset".to_string(),
            collection: "cables".to_string(),
            connect_timeout: Duration::from_secs(1),
        }
    }

    #[tokio::test]
    async fn test_connect_is_lazy() {
        // No server is needed until the first operation
        let repo = MongoAssetRepository::connect(&target("mongodb://localhost:27017/"))
            .await
            .unwrap();
        assert_eq!(repo.database.name(), "asset");
        assert_eq!(repo.collection.name(), "cables");
    }

    #[tokio::test]
    async fn test_malformed_uri_is_connection_error() {
        let err = MongoAssetRepository::connect(&target("postgres://nope"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, RepositoryError::Connection(_)));
    }

    fn cable(status: AssetStatus) -> Cable {
        Cable {
            circuit_id: 42,
            circuit_name: "TestLine".to_string(),
            circuit_voltage: "66kV".to_string(),
            status,
            source_substation: Substation {
                adwh_id: 1,
                name: "Abc".to_string(),
            },
            target_substation: Substation {
                adwh_id: 2,
                name: "Def".to_string(),
            },
            circuit_type: "OIL-FILLED".to_string(),
            feeder_number: 3,
            no_of_sections: 1,
            sections: vec![Section {
                section_number: 1,
                sensors: vec![
                    Sensor::pressure(1, Phase::Red, Location::Source),
                    Sensor::unplaced(2, MetricType::RtuTemperature),
                ],
            }],
        }
    }

    #[test]
    fn test_status_filter_matches_stored_document() {
        for status in AssetStatus::ALL.iter().copied() {
            let stored = to_document(&cable(status)).unwrap();
            let filter = status_filter(status);
            assert_eq!(
                stored.get_str("status").unwrap(),
                filter.get_str("status").unwrap()
            );
        }
        assert_eq!(
            to_document(&cable(AssetStatus::Inactive))
                .unwrap()
                .get_str("status")
                .unwrap(),
            "INACTIVE"
        );
    }

    #[test]
    fn test_stored_document_has_sort_key() {
        let stored = to_document(&cable(AssetStatus::Active)).unwrap();
        assert!(stored.contains_key(SORT_KEY));
        assert!(!stored.contains_key("circuit_id"));
    }

    #[test]
    fn test_stored_document_round_trips() {
        let original = cable(AssetStatus::Active);
        let stored = to_document(&original).unwrap();
        let decoded: Cable = from_document(stored).unwrap();
        assert_eq!(decoded, original);
    }
}
