use actix_web::{http::StatusCode, web, HttpResponse};
use tracing::instrument;

use crate::{
    entities::{envelope::ProjectResponse, project::NewProjectRequest},
    errors::AppError,
    AppState,
};

#[instrument(skip(state, data))]
pub async fn create_project(
    state: web::Data<AppState>,
    data: web::Json<NewProjectRequest>,
) -> Result<HttpResponse, AppError> {
    let project = state.project_handler
        .create_project(data.into_inner())
        .await?;

    Ok(ProjectResponse::success(StatusCode::CREATED, project).to_http_response())
}

#[instrument(skip(state))]
pub async fn get_all_projects(
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let projects = state.project_handler.get_all_projects().await?;

    Ok(ProjectResponse::success(StatusCode::OK, projects).to_http_response())
}

#[instrument(skip(state))]
pub async fn get_project_by_id(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let project = state.project_handler.get_project_by_id(&project_id).await?;

    Ok(ProjectResponse::success(StatusCode::OK, project).to_http_response())
}

#[instrument(skip(state, data))]
pub async fn update_project(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<NewProjectRequest>,
) -> Result<HttpResponse, AppError> {
    let updated = state.project_handler
        .update_project(&project_id, data.into_inner())
        .await?;

    Ok(ProjectResponse::success(StatusCode::OK, updated).to_http_response())
}

#[instrument(skip(state))]
pub async fn delete_project(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = state.project_handler.delete_project(&project_id).await?;

    Ok(ProjectResponse::success(StatusCode::OK, result).to_http_response())
}
