use std::time::Duration;

use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::project::{DeleteResult, NewProjectRequest, Project, ProjectUpdate},
    errors::AppError,
    repositories::project::ProjectRepository,
    settings::NotFoundPolicy,
    utils::{timeout::with_timeout, valid_uuid::valid_uuid},
};

const PROJECT_NOT_FOUND: &str = "Project not found";
const NO_DOCUMENTS: &str = "no project matched the given id";

pub struct ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
    pub store_timeout: Duration,
    pub not_found_policy: NotFoundPolicy,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R, store_timeout: Duration, not_found_policy: NotFoundPolicy) -> Self {
        ProjectHandler {
            project_repo,
            store_timeout,
            not_found_policy,
        }
    }

    /// Validates the request, assigns a fresh id and persists the project
    pub async fn create_project(&self, request: NewProjectRequest) -> Result<Project, AppError> {
        request.validate()?;

        let project = request.into_project(Uuid::new_v4());

        with_timeout(self.store_timeout, self.project_repo.insert_project(&project)).await?;

        tracing::info!(project_id = %project.id, "project created");
        Ok(project)
    }

    /// Retrieves a project by its ID
    pub async fn get_project_by_id(&self, id: &str) -> Result<Project, AppError> {
        let valid_id = valid_uuid(id)?;

        with_timeout(self.store_timeout, self.project_repo.find_project_by_id(&valid_id))
            .await?
            .ok_or_else(|| self.lookup_miss())
    }

    /// Retrieves every project in store order
    pub async fn get_all_projects(&self) -> Result<Vec<Project>, AppError> {
        with_timeout(self.store_timeout, self.project_repo.find_all_projects()).await
    }

    /// Replaces name, posts and stack of an existing project and returns
    /// the stored result. The re-read is not isolated from concurrent writers.
    pub async fn update_project(&self, id: &str, request: NewProjectRequest) -> Result<Project, AppError> {
        let valid_id = valid_uuid(id)?;
        request.validate()?;

        let update = ProjectUpdate::from(request);

        let matched = with_timeout(
            self.store_timeout,
            self.project_repo.update_project(&valid_id, &update),
        )
        .await?;

        if matched == 0 {
            return match self.not_found_policy {
                NotFoundPolicy::Strict => Err(AppError::NotFound(PROJECT_NOT_FOUND.to_string())),
                NotFoundPolicy::Legacy => Ok(Project::default()),
            };
        }

        with_timeout(self.store_timeout, self.project_repo.find_project_by_id(&valid_id))
            .await?
            .ok_or_else(|| self.lookup_miss())
    }

    /// Deletes a project by its ID
    pub async fn delete_project(&self, id: &str) -> Result<DeleteResult, AppError> {
        let valid_id = valid_uuid(id)?;

        let deleted_count = with_timeout(self.store_timeout, self.project_repo.delete_project(&valid_id)).await?;

        if deleted_count == 0 {
            return Err(AppError::NotFound(PROJECT_NOT_FOUND.to_string()));
        }

        tracing::info!(project_id = %valid_id, "project deleted");
        Ok(DeleteResult { deleted_count })
    }

    fn lookup_miss(&self) -> AppError {
        match self.not_found_policy {
            NotFoundPolicy::Strict => AppError::NotFound(PROJECT_NOT_FOUND.to_string()),
            NotFoundPolicy::Legacy => AppError::InternalError(NO_DOCUMENTS.to_string()),
        }
    }
}
