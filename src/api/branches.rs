use super::client::ApiClient;
use super::constants;
use super::error::ApiError;
use super::models::{Branch, CreateBranchInput};
use super::resolve::{self, Page};
use uuid::Uuid;

impl ApiClient {
    pub async fn create_branch(
        &self,
        project_id: Uuid,
        input: &CreateBranchInput,
    ) -> Result<Branch, ApiError> {
        self.post_json(
            &constants::branches(project_id),
            input,
            "unable to create branch",
        )
        .await
    }

    pub async fn list_branches(
        &self,
        project_id: Uuid,
        page_token: Option<String>,
    ) -> Result<Page<Branch>, ApiError> {
        self.list_page(
            &constants::branches(project_id),
            "branches",
            page_token,
            "unable to list branches",
        )
        .await
    }

    pub async fn list_all_branches(&self, project_id: Uuid) -> Result<Vec<Branch>, ApiError> {
        resolve::collect_all("branch", |cursor| self.list_branches(project_id, cursor))
            .await
    }

    /// Accept a branch UUID as-is, or look the branch up by name within the project
    pub async fn resolve_branch(
        &self,
        project_id: Uuid,
        name_or_id: &str,
    ) -> Result<Uuid, ApiError> {
        if let Some(id) = resolve::parse_id(name_or_id) {
            return Ok(id);
        }

        resolve::find_id_by_name(
            "branch",
            name_or_id,
            |cursor| self.list_branches(project_id, cursor),
            |branch: &Branch| branch.name.as_str(),
            |branch: &Branch| branch.branch_id,
        )
        .await
    }
}
