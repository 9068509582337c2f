use super::client::ApiClient;
use super::constants;
use super::error::ApiError;
use super::models::MetricsConfigInput;
use uuid::Uuid;

impl ApiClient {
    /// Replace the project's metrics config and templates
    pub async fn sync_metrics_config(
        &self,
        project_id: Uuid,
        input: &MetricsConfigInput,
    ) -> Result<(), ApiError> {
        self.put_json(
            &constants::metrics_config(project_id),
            input,
            "unable to sync metrics config",
        )
        .await
    }
}
