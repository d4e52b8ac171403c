use actix_web::web;

use crate::{handlers::projects, routes::Controller};

pub struct ProjectController {
    pub path: String,
}

impl ProjectController {
    pub fn new() -> Self {
        ProjectController {
            path: "/project".to_string(),
        }
    }
}

impl Default for ProjectController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for ProjectController {
    fn init_routes(&self, cfg: &mut web::ServiceConfig) {
        cfg.service(
            web::scope(&self.path)
                .service(
                    web::resource("")
                        .route(web::post().to(projects::create_project))
                        .route(web::get().to(projects::get_all_projects))
                )
                .service(
                    web::resource("/{project_id}")
                        .route(web::get().to(projects::get_project_by_id))
                        .route(web::put().to(projects::update_project))
                        .route(web::delete().to(projects::delete_project))
                )
        );
    }
}
