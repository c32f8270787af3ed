//! Main client implementation

use crate::{
    executor::{ApiRequest, RequestExecutor},
    multipart::{build_body, generate_boundary},
    types::{BulkFileIds, JobIdResponse, RenameResponse},
    ClientError, Config, FileDetails, FileOptions, JobDetails, ListFilesParams, Result,
};
use bytes::Bytes;
use reqwest::{
    header::{self, HeaderValue},
    Method,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::collections::BTreeMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// ImageKit media management client
#[derive(Clone)]
pub struct ImageKitClient {
    config: Config,
    executor: RequestExecutor,
    cancel: Option<CancellationToken>,
}

impl ImageKitClient {
    /// Create a new client with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let executor = RequestExecutor::new(&config)?;
        Ok(Self {
            config,
            executor,
            cancel: None,
        })
    }

    /// Create with a private key and default endpoints
    pub fn with_private_key(private_key: &str) -> Result<Self> {
        Self::new(Config::new(private_key))
    }

    /// Create from `IMAGEKIT_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?)
    }

    /// Abort rate-limit waits once `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================== File Operations ====================

    /// List and search files
    #[instrument(skip(self))]
    pub async fn list_files(&self, params: Option<&ListFilesParams>) -> Result<Vec<FileDetails>> {
        let mut url = self.config.api_url("/files");
        if let Some(params) = params {
            let query = params.to_query_string()?;
            if !query.is_empty() {
                url.push('?');
                url.push_str(&query);
            }
        }

        self.fetch(ApiRequest::new(Method::GET, url)).await
    }

    /// Get details of a file
    #[instrument(skip(self))]
    pub async fn file_details(&self, file_id: &str) -> Result<FileDetails> {
        let url = self.file_url(file_id, "/details");
        self.fetch(ApiRequest::new(Method::GET, url)).await
    }

    /// Update details of a file
    #[instrument(skip(self, options))]
    pub async fn update_file_details(
        &self,
        file_id: &str,
        options: &FileOptions,
    ) -> Result<FileDetails> {
        let url = self.file_url(file_id, "/details");
        let request = ApiRequest::new(Method::PATCH, url).json(&options.to_json()?)?;
        self.fetch(request).await
    }

    /// Delete a file
    #[instrument(skip(self))]
    pub async fn delete_file(&self, file_id: &str) -> Result<()> {
        let url = self.file_url(file_id, "");
        self.send(ApiRequest::new(Method::DELETE, url)).await?;
        Ok(())
    }

    /// Copy a file into another folder
    #[instrument(skip(self))]
    pub async fn copy_file(&self, source_file_path: &str, destination_path: &str) -> Result<()> {
        let body = json!({
            "sourceFilePath": source_file_path,
            "destinationPath": destination_path,
        });
        let request = ApiRequest::new(Method::POST, self.config.api_url("/files/copy")).json(&body)?;
        self.send(request).await?;
        Ok(())
    }

    /// Move a file into another folder
    #[instrument(skip(self))]
    pub async fn move_file(&self, source_file_path: &str, destination_path: &str) -> Result<()> {
        let body = json!({
            "sourceFilePath": source_file_path,
            "destinationPath": destination_path,
        });
        let request = ApiRequest::new(Method::POST, self.config.api_url("/files/move")).json(&body)?;
        self.send(request).await?;
        Ok(())
    }

    /// Rename a file, returning the CDN purge request ID when a purge was asked for
    #[instrument(skip(self))]
    pub async fn rename_file(
        &self,
        file_path: &str,
        new_file_name: &str,
        purge_cache: bool,
    ) -> Result<Option<String>> {
        let body = json!({
            "filePath": file_path,
            "newFileName": new_file_name,
            "purgeCache": purge_cache,
        });
        let request = ApiRequest::new(Method::PUT, self.config.api_url("/files/rename")).json(&body)?;

        let bytes = self.send(request).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let response: RenameResponse = decode(&bytes)?;
        Ok(response.purge_request_id.filter(|id| !id.is_empty()))
    }

    // ==================== Bulk Operations ====================

    /// Add tags to files, returning the IDs that were updated
    #[instrument(skip(self))]
    pub async fn add_tags(&self, file_ids: &[String], tags: &[String]) -> Result<Vec<String>> {
        let body = json!({ "fileIds": file_ids, "tags": tags });
        self.bulk("/files/addTags", &body).await
    }

    /// Remove tags from files, returning the IDs that were updated
    #[instrument(skip(self))]
    pub async fn remove_tags(&self, file_ids: &[String], tags: &[String]) -> Result<Vec<String>> {
        let body = json!({ "fileIds": file_ids, "tags": tags });
        self.bulk("/files/removeTags", &body).await
    }

    /// Remove AI tags from files, returning the IDs that were updated
    #[instrument(skip(self))]
    pub async fn remove_ai_tags(
        &self,
        file_ids: &[String],
        ai_tags: &[String],
    ) -> Result<Vec<String>> {
        let body = json!({ "fileIds": file_ids, "AITags": ai_tags });
        self.bulk("/files/removeAITags", &body).await
    }

    /// Delete files, returning the IDs that were deleted
    #[instrument(skip(self))]
    pub async fn delete_files(&self, file_ids: &[String]) -> Result<Vec<String>> {
        let body = json!({ "fileIds": file_ids });
        self.bulk("/files/batch/deleteByFileIds", &body).await
    }

    /// Get the status of a bulk job
    #[instrument(skip(self))]
    pub async fn bulk_job_status(&self, job_id: &str) -> Result<JobDetails> {
        let url = self
            .config
            .api_url(&format!("/bulkJobs/{}", urlencoding::encode(job_id)));
        self.fetch(ApiRequest::new(Method::GET, url)).await
    }

    // ==================== Folder Operations ====================

    /// Create a folder under `parent_folder_path`
    #[instrument(skip(self))]
    pub async fn create_folder(&self, folder_name: &str, parent_folder_path: &str) -> Result<()> {
        let body = json!({
            "folderName": folder_name,
            "parentFolderPath": parent_folder_path,
        });
        let request = ApiRequest::new(Method::POST, self.config.api_url("/folder")).json(&body)?;
        self.send(request).await?;
        Ok(())
    }

    /// Delete a folder and everything in it
    #[instrument(skip(self))]
    pub async fn delete_folder(&self, folder_path: &str) -> Result<()> {
        let body = json!({ "folderPath": folder_path });
        let request = ApiRequest::new(Method::DELETE, self.config.api_url("/folder")).json(&body)?;
        self.send(request).await?;
        Ok(())
    }

    /// Start copying a folder, returning the bulk job ID
    #[instrument(skip(self))]
    pub async fn copy_folder(&self, source_folder_path: &str, destination_path: &str) -> Result<String> {
        self.folder_job("/bulkJobs/copyFolder", source_folder_path, destination_path)
            .await
    }

    /// Start moving a folder, returning the bulk job ID
    #[instrument(skip(self))]
    pub async fn move_folder(&self, source_folder_path: &str, destination_path: &str) -> Result<String> {
        self.folder_job("/bulkJobs/moveFolder", source_folder_path, destination_path)
            .await
    }

    // ==================== Upload ====================

    /// Upload a file.
    ///
    /// `file` may be a remote URL, a local path or base64 content.
    #[instrument(skip(self, file, options))]
    pub async fn upload(
        &self,
        file: &str,
        file_name: &str,
        options: Option<&FileOptions>,
    ) -> Result<FileDetails> {
        let fields = match options {
            Some(options) => options.to_form_fields()?,
            None => BTreeMap::new(),
        };
        let boundary = generate_boundary();
        let body = build_body(file, file_name, fields, &boundary).await?;
        debug!(size = body.len(), "Built upload body");

        let content_type = HeaderValue::from_str(&format!("multipart/form-data; boundary={}", boundary))
            .map_err(|e| ClientError::InvalidFile(e.to_string()))?;
        let request = ApiRequest::new(Method::POST, self.config.upload_url.clone())
            .with_header(header::CONTENT_TYPE, content_type)
            .with_body(body);

        self.fetch(request).await
    }

    // ==================== Helper Methods ====================

    fn file_url(&self, file_id: &str, suffix: &str) -> String {
        self.config
            .api_url(&format!("/files/{}{}", urlencoding::encode(file_id), suffix))
    }

    async fn bulk(&self, path: &str, body: &serde_json::Value) -> Result<Vec<String>> {
        let request = ApiRequest::new(Method::POST, self.config.api_url(path)).json(body)?;
        let ids: BulkFileIds = self.fetch(request).await?;
        Ok(ids.into_ids())
    }

    async fn folder_job(&self, path: &str, source: &str, destination: &str) -> Result<String> {
        let body = json!({
            "sourceFolderPath": source,
            "destinationPath": destination,
        });
        let request = ApiRequest::new(Method::POST, self.config.api_url(path)).json(&body)?;
        let response: JobIdResponse = self.fetch(request).await?;
        Ok(response.job_id)
    }

    async fn send(&self, request: ApiRequest) -> Result<Bytes> {
        self.executor
            .execute_with_cancel(request, self.cancel.as_ref())
            .await
    }

    async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let bytes = self.send(request).await?;
        decode(&bytes)
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(ClientError::Deserialization)
}
