use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use uuid::Uuid;

use crate::{
    entities::project::{Project, ProjectUpdate},
    errors::AppError,
    repositories::project::ProjectRepository,
};

/// Process-local store, used by tests and `store = "memory"` runs.
#[derive(Debug, Default)]
pub struct InMemoryProjectRepo {
    projects: DashMap<Uuid, Project>,
}

impl InMemoryProjectRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepo {
    async fn insert_project(&self, project: &Project) -> Result<(), AppError> {
        match self.projects.entry(project.id) {
            Entry::Occupied(_) => Err(AppError::StoreError(format!("Duplicate project id: {}", project.id))),
            Entry::Vacant(slot) => {
                slot.insert(project.clone());
                Ok(())
            }
        }
    }

    async fn find_project_by_id(&self, id: &Uuid) -> Result<Option<Project>, AppError> {
        Ok(self.projects.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_all_projects(&self) -> Result<Vec<Project>, AppError> {
        Ok(self.projects.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn update_project(&self, id: &Uuid, update: &ProjectUpdate) -> Result<u64, AppError> {
        match self.projects.get_mut(id) {
            Some(mut entry) => {
                entry.apply(update);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_project(&self, id: &Uuid) -> Result<u64, AppError> {
        Ok(self.projects.remove(id).map_or(0, |_| 1))
    }
}
