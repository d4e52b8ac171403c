#![allow(dead_code)]

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use async_trait::async_trait;
use project_api::{
    entities::project::NewProjectRequest,
    repositories::{memory::InMemoryProjectRepo, project::SharedProjectRepo},
    routes::{configure_routes, default_controllers},
    settings::{AppConfig, AppEnvironment, NotFoundPolicy, StoreBackend},
    AppState,
};
use reqwest::{Client, Response};
use serde_json::Value;
use std::{net::TcpListener, sync::Arc, time::Duration};

#[derive(Clone)]
pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryProjectRepo>,
    pub client: Client,
    pub config: AppConfig,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_policy(NotFoundPolicy::Strict).await
    }

    pub async fn spawn_with_policy(policy: NotFoundPolicy) -> Self {
        let mut config = test_config();
        config.not_found_policy = policy;

        let store = Arc::new(InMemoryProjectRepo::new());
        let shared: SharedProjectRepo = store.clone();
        let state = web::Data::new(AppState::new(&config, shared));

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let controllers = default_controllers();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(NormalizePath::trim())
                .configure(|cfg| configure_routes(cfg, &controllers))
        })
        .listen(listener)
        .expect("Failed to bind server")
        .workers(config.worker_count)
        .run();

        tokio::spawn(server);

        let client = Client::new();
        while client.get(&address).send().await.is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        Self {
            address,
            store,
            client,
            config,
        }
    }

    pub fn project_url(&self, id: &str) -> String {
        format!("{}/project/{}", self.address, id)
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Project API Test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        worker_count: 1,
        store: StoreBackend::Memory,
        database_url: String::new(),
        database_max_connections: 1,
        request_timeout: "2s".to_string(),
        cors_allowed_origins: vec!["*".to_string()],
        not_found_policy: NotFoundPolicy::Strict,
    }
}

pub fn project_request(name: &str, stack: &[&str]) -> NewProjectRequest {
    NewProjectRequest {
        project_name: name.to_string(),
        posts: vec![],
        stack: stack.iter().map(|s| s.to_string()).collect(),
    }
}

#[async_trait]
pub trait ProjectTestHelpers: Send + Sync {
    async fn create_project(&self, body: &Value) -> Response;
    async fn create_named(&self, name: &str) -> Value;
    async fn get_project(&self, id: &str) -> Response;
    async fn list_projects(&self) -> Response;
    async fn edit_project(&self, id: &str, body: &Value) -> Response;
    async fn delete_project(&self, id: &str) -> Response;
}

#[async_trait]
impl ProjectTestHelpers for TestApp {
    async fn create_project(&self, body: &Value) -> Response {
        self.client
            .post(format!("{}/project/", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to create project")
    }

    async fn create_named(&self, name: &str) -> Value {
        let body = serde_json::to_value(project_request(name, &["rust"])).unwrap();
        let response = self.create_project(&body).await;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            panic!("Create failed: ({}): {}", status, body);
        }

        let envelope: Value = response.json().await.expect("Failed to parse create response");
        envelope["data"]["data"].clone()
    }

    async fn get_project(&self, id: &str) -> Response {
        self.client
            .get(self.project_url(id))
            .send()
            .await
            .expect("Failed to get project")
    }

    async fn list_projects(&self) -> Response {
        self.client
            .get(format!("{}/project/", self.address))
            .send()
            .await
            .expect("Failed to list projects")
    }

    async fn edit_project(&self, id: &str, body: &Value) -> Response {
        self.client
            .put(self.project_url(id))
            .json(body)
            .send()
            .await
            .expect("Failed to edit project")
    }

    async fn delete_project(&self, id: &str) -> Response {
        self.client
            .delete(self.project_url(id))
            .send()
            .await
            .expect("Failed to delete project")
    }
}
