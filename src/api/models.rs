use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Fields the CLI does not interpret are kept so listings print in full
type Extra = Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "projectID")]
    pub project_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    #[serde(rename = "branchID")]
    pub branch_id: Uuid,
    pub name: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    #[serde(rename = "buildID")]
    pub build_id: Uuid,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct System {
    #[serde(rename = "systemID")]
    pub system_id: Uuid,
    pub name: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    #[serde(rename = "logID")]
    pub log_id: Uuid,
    #[serde(default)]
    pub file_name: String,
    /// Upload location for the log contents
    #[serde(default)]
    pub location: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Kind of branch, as accepted by `branch create --type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BranchType {
    Main,
    ChangeRequest,
    Release,
}

impl BranchType {
    pub const VARIANTS: [&'static str; 3] = ["MAIN", "CHANGE_REQUEST", "RELEASE"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BranchType::Main => "MAIN",
            BranchType::ChangeRequest => "CHANGE_REQUEST",
            BranchType::Release => "RELEASE",
        }
    }
}

impl fmt::Display for BranchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BranchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MAIN" => Ok(BranchType::Main),
            "CHANGE_REQUEST" => Ok(BranchType::ChangeRequest),
            "RELEASE" => Ok(BranchType::Release),
            other => Err(format!(
                "invalid branch type: {} (expected one of {})",
                other,
                Self::VARIANTS.join(", ")
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateProjectInput {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchInput {
    pub name: String,
    pub branch_type: BranchType,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBuildInput {
    pub description: String,
    pub image_uri: String,
    pub version: String,
    #[serde(rename = "systemID", skip_serializing_if = "Option::is_none")]
    pub system_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLogInput {
    pub file_name: String,
    pub file_size: u64,
    pub checksum: String,
}

/// One template file shipped with a metrics config
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsTemplate {
    pub name: String,
    pub contents: String,
}

#[derive(Debug, Serialize)]
pub struct MetricsConfigInput {
    pub config: String,
    pub templates: Vec<MetricsTemplate>,
}
