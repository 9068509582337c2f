use super::client::ApiClient;
use super::constants;
use super::error::ApiError;
use super::models::{CreateLogInput, Log};
use super::resolve::{self, Page};
use uuid::Uuid;

/// Identifies the job a log belongs to
#[derive(Debug, Clone, Copy)]
pub struct JobRef {
    pub project_id: Uuid,
    pub batch_id: Uuid,
    pub job_id: Uuid,
}

impl JobRef {
    fn logs_path(&self) -> String {
        constants::job_logs(self.project_id, self.batch_id, self.job_id)
    }
}

impl ApiClient {
    /// Register a log for a job; the response carries the upload location
    pub async fn create_log(&self, job: JobRef, input: &CreateLogInput) -> Result<Log, ApiError> {
        self.post_json(&job.logs_path(), input, "unable to create log")
            .await
    }

    pub async fn list_logs(
        &self,
        job: JobRef,
        page_token: Option<String>,
    ) -> Result<Page<Log>, ApiError> {
        self.list_page(&job.logs_path(), "logs", page_token, "unable to list logs")
            .await
    }

    pub async fn list_all_logs(&self, job: JobRef) -> Result<Vec<Log>, ApiError> {
        resolve::collect_all("log", |cursor| self.list_logs(job, cursor))
            .await
    }
}
