//! Command-line arguments

use clap::{Parser, Subcommand};
use imagekit_client::{Config, FileOptions, FileTypeFilter, ListFilesParams, ListType, SortOrder};

#[derive(Parser, Debug)]
#[command(name = "imagekit")]
#[command(about = "Manage files and folders on ImageKit.io")]
#[command(version)]
pub struct Args {
    /// Private API key
    #[arg(long, env = "IMAGEKIT_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Management API base URL
    #[arg(long, env = "IMAGEKIT_API_URL", default_value = imagekit_client::DEFAULT_API_BASE_URL)]
    pub api_url: String,

    /// Upload endpoint URL
    #[arg(long, env = "IMAGEKIT_UPLOAD_URL", default_value = imagekit_client::DEFAULT_UPLOAD_URL)]
    pub upload_url: String,

    /// Give up after this many rate-limited retries
    #[arg(long, env = "IMAGEKIT_MAX_RETRIES")]
    pub max_retries: Option<u32>,

    /// Enable debug logging
    #[arg(short, long, env = "IMAGEKIT_DEBUG")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List and search files
    List {
        /// all, file or folder
        #[arg(long = "type")]
        list_type: Option<ListType>,
        /// e.g. ASC_NAME, DESC_CREATED
        #[arg(long)]
        sort: Option<SortOrder>,
        #[arg(long)]
        path: Option<String>,
        #[arg(long)]
        search: Option<String>,
        /// Comma-separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
        /// all, image or non-image
        #[arg(long)]
        file_type: Option<FileTypeFilter>,
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        skip: Option<i64>,
    },
    /// Show details of a file
    Details { file_id: String },
    /// Delete a file
    Delete { file_id: String },
    /// Rename a file
    Rename {
        file_path: String,
        new_name: String,
        /// Purge the old URL from the CDN cache
        #[arg(long)]
        purge_cache: bool,
    },
    /// Add tags to files
    AddTags {
        #[arg(long = "file", required = true)]
        file_ids: Vec<String>,
        #[arg(long = "tag", required = true)]
        tags: Vec<String>,
    },
    /// Remove tags from files
    RemoveTags {
        #[arg(long = "file", required = true)]
        file_ids: Vec<String>,
        #[arg(long = "tag", required = true)]
        tags: Vec<String>,
    },
    /// Upload a file from a URL, a local path or base64 content
    Upload {
        file: String,
        /// Name to store the file under
        #[arg(long)]
        name: String,
        #[arg(long)]
        folder: Option<String>,
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
        #[arg(long)]
        private: bool,
        /// Keep the exact file name instead of adding a unique suffix
        #[arg(long)]
        exact_name: bool,
    },
    /// Create a folder
    CreateFolder {
        name: String,
        #[arg(long, default_value = "/")]
        parent: String,
    },
    /// Delete a folder and its contents
    DeleteFolder { path: String },
    /// Copy a folder (starts a bulk job)
    CopyFolder { source: String, destination: String },
    /// Move a folder (starts a bulk job)
    MoveFolder { source: String, destination: String },
    /// Show bulk job status
    Job { job_id: String },
}

impl Args {
    /// Client configuration from the global flags
    pub fn config(&self) -> Config {
        let mut config = Config::new(&self.private_key)
            .with_api_base_url(&self.api_url)
            .with_upload_url(&self.upload_url);
        if let Some(retries) = self.max_retries {
            config = config.with_max_rate_limit_retries(retries);
        }
        config
    }
}

/// Listing parameters from `list` flags
#[allow(clippy::too_many_arguments)]
pub fn list_params(
    list_type: Option<ListType>,
    sort: Option<SortOrder>,
    path: Option<String>,
    search: Option<String>,
    tags: Option<Vec<String>>,
    file_type: Option<FileTypeFilter>,
    limit: Option<i64>,
    skip: Option<i64>,
) -> ListFilesParams {
    ListFilesParams {
        list_type,
        sort,
        path,
        search_query: search,
        tags,
        file_type,
        limit,
        skip,
    }
}

/// Upload options from `upload` flags; unset flags stay out of the request
pub fn upload_options(
    folder: Option<String>,
    tags: Option<Vec<String>>,
    private: bool,
    exact_name: bool,
) -> FileOptions {
    let mut options = FileOptions::new();
    options.folder = folder;
    options.tags = tags;
    if private {
        options.is_private_file = Some(true);
    }
    if exact_name {
        options.use_unique_file_name = Some(false);
    }
    options
}
