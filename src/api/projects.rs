use super::client::ApiClient;
use super::constants;
use super::error::ApiError;
use super::models::{CreateProjectInput, Project};
use super::resolve::{self, Page};
use uuid::Uuid;

impl ApiClient {
    pub async fn create_project(&self, input: &CreateProjectInput) -> Result<Project, ApiError> {
        self.post_json(&constants::projects(), input, "unable to create project")
            .await
    }

    pub async fn get_project(&self, project_id: Uuid) -> Result<Project, ApiError> {
        self.get_json(&constants::project(project_id), "unable to get project")
            .await
    }

    pub async fn list_projects(
        &self,
        page_token: Option<String>,
    ) -> Result<Page<Project>, ApiError> {
        self.list_page(
            &constants::projects(),
            "projects",
            page_token,
            "unable to list projects",
        )
        .await
    }

    pub async fn list_all_projects(&self) -> Result<Vec<Project>, ApiError> {
        resolve::collect_all("project", |cursor| self.list_projects(cursor))
            .await
    }

    /// Accept a project UUID as-is, or look the project up by name
    pub async fn resolve_project(&self, name_or_id: &str) -> Result<Uuid, ApiError> {
        if let Some(id) = resolve::parse_id(name_or_id) {
            return Ok(id);
        }

        resolve::find_id_by_name(
            "project",
            name_or_id,
            |cursor| self.list_projects(cursor),
            |project: &Project| project.name.as_str(),
            |project: &Project| project.project_id,
        )
        .await
    }
}
