use std::sync::Arc;

use identity_service::domain::identity::ports::IdentityServicePort;
use identity_service::domain::identity::service::IdentityService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryIdentityStore;

/// Test application that spawns a real server on an in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Minimum work factor keeps the suite fast; the contract under
        // test is identical at any cost.
        let password_hasher = Arc::new(
            auth::PasswordHasher::new(auth::MIN_TIME_COST).expect("Failed to build hasher"),
        );
        let identity_store = Arc::new(InMemoryIdentityStore::new());
        let identity_service: Arc<dyn IdentityServicePort> = Arc::new(
            IdentityService::new(identity_store, password_hasher)
                .expect("Failed to build identity service"),
        );

        let router = create_router(identity_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }
}
