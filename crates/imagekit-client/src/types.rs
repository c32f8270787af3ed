//! Typed API responses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Decode `null` the same as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A file or folder record
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileDetails {
    /// Unique file ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    /// `file` or `folder`
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// File name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Path of the file, including the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// User tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Tags produced by auto-tagging extensions
    #[serde(default, rename = "AITags", skip_serializing_if = "Option::is_none")]
    pub ai_tags: Option<Vec<AiTag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_private_file: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_coordinates: Option<String>,
    /// Delivery URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Thumbnail URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// `image` or `non-image`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub height: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub width: u64,
    /// Size in bytes
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_alpha: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_metadata: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedded_metadata: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Per-extension processing status
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub extension_status: HashMap<String, String>,
}

impl FileDetails {
    /// Whether this record describes a folder
    pub fn is_folder(&self) -> bool {
        self.kind.as_deref() == Some("folder")
    }
}

/// A tag attached by an AI extension
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AiTag {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Bulk job status values
///
/// Statuses this client does not know keep the server's text in `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Pending,
    Completed,
    Other(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Other(status) => status,
        }
    }
}

impl Default for JobStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for JobStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "Pending" => Self::Pending,
            "Completed" => Self::Completed,
            _ => Self::Other(status),
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Other(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Details of an asynchronous bulk job
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JobDetails {
    /// Job ID
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_id: String,
    /// Job type, e.g. `COPY_FOLDER` or `MOVE_FOLDER`
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// Current status
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: JobStatus,
}

impl JobDetails {
    /// Whether the job has finished
    pub fn is_completed(&self) -> bool {
        self.status == JobStatus::Completed
    }
}

/// File IDs affected by a bulk tag or delete operation.
///
/// The API documents an object keyed by `successfullyUpdatedFileIds` or
/// `successfullyDeletedFileIds`; a bare array is accepted as well.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum BulkFileIds {
    Updated {
        #[serde(rename = "successfullyUpdatedFileIds")]
        ids: Vec<String>,
    },
    Deleted {
        #[serde(rename = "successfullyDeletedFileIds")]
        ids: Vec<String>,
    },
    Bare(Vec<String>),
}

impl BulkFileIds {
    pub(crate) fn into_ids(self) -> Vec<String> {
        match self {
            Self::Updated { ids } | Self::Deleted { ids } | Self::Bare(ids) => ids,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RenameResponse {
    #[serde(default)]
    pub purge_request_id: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobIdResponse {
    pub job_id: String,
}
