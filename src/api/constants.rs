//! ReSim API paths, relative to the API base URL

use uuid::Uuid;

pub fn projects() -> String {
    "projects".to_string()
}

pub fn project(project_id: Uuid) -> String {
    format!("projects/{}", project_id)
}

pub fn branches(project_id: Uuid) -> String {
    format!("projects/{}/branches", project_id)
}

pub fn builds(project_id: Uuid, branch_id: Uuid) -> String {
    format!("projects/{}/branches/{}/builds", project_id, branch_id)
}

pub fn systems(project_id: Uuid) -> String {
    format!("projects/{}/systems", project_id)
}

pub fn job_logs(project_id: Uuid, batch_id: Uuid, job_id: Uuid) -> String {
    format!(
        "projects/{}/batches/{}/jobs/{}/logs",
        project_id, batch_id, job_id
    )
}

pub fn metrics_config(project_id: Uuid) -> String {
    format!("projects/{}/metrics/config", project_id)
}
