//! Dockerized MongoDB fixture for integration tests

use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::mongo::Mongo;

/// MongoDB test container.
///
/// Starts a throwaway MongoDB instance in Docker and connects a client to it.
/// The container is removed when the fixture is dropped.
pub struct TestMongo {
    // Held for its Drop impl: dropping stops the container
    _container: ContainerAsync<Mongo>,
    client: mongodb::Client,
    url: String,
}

impl TestMongo {
    /// Start a MongoDB container and connect to it.
    ///
    /// Panics if Docker is unavailable.
    pub async fn new() -> Self {
        let container = Mongo::default()
            .start()
            .await
            .expect("failed to start MongoDB container (is Docker running?)");

        let host = container.get_host().await.expect("container host");
        let port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("container port");
        let url = format!("mongodb://{}:{}", host, port);

        let client = mongodb::Client::with_uri_str(&url)
            .await
            .expect("failed to connect to MongoDB container");

        tracing::debug!("MongoDB test container ready at {}", url);

        Self {
            _container: container,
            client,
            url,
        }
    }

    /// The connected client
    pub fn client(&self) -> &mongodb::Client {
        &self.client
    }

    /// Get a database handle by name
    pub fn database(&self, name: &str) -> mongodb::Database {
        self.client.database(name)
    }

    /// Connection string of the running container
    pub fn url(&self) -> &str {
        &self.url
    }
}
