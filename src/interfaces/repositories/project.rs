use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{
    entities::project::{Post, Project, ProjectUpdate},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

/// Document-store operations over the `projects` collection.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn insert_project(&self, project: &Project) -> Result<(), AppError>;
    async fn find_project_by_id(&self, id: &Uuid) -> Result<Option<Project>, AppError>;
    async fn find_all_projects(&self) -> Result<Vec<Project>, AppError>;
    /// Returns the number of matched documents (0 or 1).
    async fn update_project(&self, id: &Uuid, update: &ProjectUpdate) -> Result<u64, AppError>;
    /// Returns the number of deleted documents (0 or 1).
    async fn delete_project(&self, id: &Uuid) -> Result<u64, AppError>;
}

pub type SharedProjectRepo = Arc<dyn ProjectRepository>;

#[async_trait]
impl<T> ProjectRepository for Arc<T>
where
    T: ProjectRepository + ?Sized,
{
    async fn insert_project(&self, project: &Project) -> Result<(), AppError> {
        (**self).insert_project(project).await
    }

    async fn find_project_by_id(&self, id: &Uuid) -> Result<Option<Project>, AppError> {
        (**self).find_project_by_id(id).await
    }

    async fn find_all_projects(&self) -> Result<Vec<Project>, AppError> {
        (**self).find_all_projects().await
    }

    async fn update_project(&self, id: &Uuid, update: &ProjectUpdate) -> Result<u64, AppError> {
        (**self).update_project(id, update).await
    }

    async fn delete_project(&self, id: &Uuid) -> Result<u64, AppError> {
        (**self).delete_project(id).await
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id: Uuid,
    project_name: String,
    posts: Json<Vec<Post>>,
    stack: Vec<String>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            project_name: row.project_name,
            posts: row.posts.0,
            stack: row.stack,
        }
    }
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn insert_project(&self, project: &Project) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO projects (id, project_name, posts, stack)
            VALUES ($1, $2, $3, $4)
            "#
        )
        .bind(project.id)
        .bind(&project.project_name)
        .bind(Json(&project.posts))
        .bind(&project.stack)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_project_by_id(&self, id: &Uuid) -> Result<Option<Project>, AppError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, project_name, posts, stack
            FROM projects
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Project::from))
    }

    async fn find_all_projects(&self) -> Result<Vec<Project>, AppError> {
        let mut rows = sqlx::query_as::<_, ProjectRow>(
            "SELECT id, project_name, posts, stack FROM projects"
        )
        .fetch(&self.pool);

        // A decode failure on any row fails the whole listing
        let mut projects = Vec::new();
        while let Some(row) = rows.try_next().await? {
            projects.push(Project::from(row));
        }

        Ok(projects)
    }

    async fn update_project(&self, id: &Uuid, update: &ProjectUpdate) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE projects SET
                project_name = $1,
                posts = $2,
                stack = $3
            WHERE id = $4
            "#
        )
        .bind(&update.project_name)
        .bind(Json(&update.posts))
        .bind(&update.stack)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_project(&self, id: &Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM projects
            WHERE id = $1
            "#
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
