use super::client::ApiClient;
use super::constants;
use super::error::ApiError;
use super::models::{Build, CreateBuildInput, System};
use super::resolve::{self, Page};
use uuid::Uuid;

impl ApiClient {
    pub async fn create_build(
        &self,
        project_id: Uuid,
        branch_id: Uuid,
        input: &CreateBuildInput,
    ) -> Result<Build, ApiError> {
        self.post_json(
            &constants::builds(project_id, branch_id),
            input,
            "unable to create build",
        )
        .await
    }

    pub async fn list_builds(
        &self,
        project_id: Uuid,
        branch_id: Uuid,
        page_token: Option<String>,
    ) -> Result<Page<Build>, ApiError> {
        self.list_page(
            &constants::builds(project_id, branch_id),
            "builds",
            page_token,
            "unable to list builds",
        )
        .await
    }

    pub async fn list_all_builds(
        &self,
        project_id: Uuid,
        branch_id: Uuid,
    ) -> Result<Vec<Build>, ApiError> {
        resolve::collect_all("build", |cursor| self.list_builds(project_id, branch_id, cursor))
            .await
    }

    pub async fn list_systems(
        &self,
        project_id: Uuid,
        page_token: Option<String>,
    ) -> Result<Page<System>, ApiError> {
        self.list_page(
            &constants::systems(project_id),
            "systems",
            page_token,
            "unable to list systems",
        )
        .await
    }

    pub async fn resolve_system(
        &self,
        project_id: Uuid,
        name_or_id: &str,
    ) -> Result<Uuid, ApiError> {
        if let Some(id) = resolve::parse_id(name_or_id) {
            return Ok(id);
        }

        resolve::find_id_by_name(
            "system",
            name_or_id,
            |cursor| self.list_systems(project_id, cursor),
            |system: &System| system.name.as_str(),
            |system: &System| system.system_id,
        )
        .await
    }
}
