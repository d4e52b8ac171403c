use std::sync::Arc;

use actix_web::web;

use crate::handlers::home::home;

mod json_error;
pub mod projects;

pub use projects::ProjectController;

/// A group of routes that can mount itself on the application.
pub trait Controller: Send + Sync {
    fn init_routes(&self, cfg: &mut web::ServiceConfig);
}

/// Controllers served by this binary.
pub fn default_controllers() -> Vec<Arc<dyn Controller>> {
    vec![Arc::new(ProjectController::new())]
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, controllers: &[Arc<dyn Controller>]) {
    cfg.service(home);

    for controller in controllers {
        controller.init_routes(cfg);
    }

    cfg.configure(json_error::config_routes);
}
