mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod graceful_shutdown;
pub mod telemetry;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{db, utils};

use repositories::project::SharedProjectRepo;
use use_cases::project::ProjectHandler;

pub struct AppState {
    pub name: String,
    pub project_handler: AppProjectHandler,
}

pub type AppProjectHandler = ProjectHandler<SharedProjectRepo>;

impl AppState {
    pub fn new(config: &settings::AppConfig, project_repo: SharedProjectRepo) -> Self {
        let project_handler = ProjectHandler::new(
            project_repo,
            config.store_timeout(),
            config.not_found_policy,
        );

        AppState {
            name: config.name.clone(),
            project_handler,
        }
    }
}
