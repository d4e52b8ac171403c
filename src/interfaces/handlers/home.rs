use actix_web::{get, web, HttpResponse, Responder};

use crate::AppState;

#[get("/")]
pub async fn home(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Welcome to the Project API!",
        "name": state.name,
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "resources": ["/project"]
    }))
}
