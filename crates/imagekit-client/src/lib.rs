//! # ImageKit Client SDK
//!
//! An async client for the ImageKit.io media management API.
//!
//! ## Features
//!
//! - **Files**: list, search, inspect, update, copy, move, rename and delete
//! - **Bulk**: add/remove tags and AI tags, batch delete, bulk job status
//! - **Folders**: create, delete, copy and move
//! - **Upload**: from a remote URL, a local path or base64 content
//! - **Rate limits**: `429` responses are retried after `X-RateLimit-Reset`
//!
//! ## Example
//!
//! ```rust,ignore
//! use imagekit_client::{Config, FileOptions, ImageKitClient, ListFilesParams, SortOrder};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ImageKitClient::new(Config::new("private_xxx"))?;
//!
//!     // Upload a local file into /products
//!     let options = FileOptions::new().with_folder("/products").with_tags(["summer"]);
//!     let uploaded = client.upload("./shirt.jpg", "shirt.jpg", Some(&options)).await?;
//!     println!("Uploaded: {:?}", uploaded.url);
//!
//!     // Newest first
//!     let params = ListFilesParams::new().with_sort(SortOrder::DescCreated).with_limit(10);
//!     for file in client.list_files(Some(&params)).await? {
//!         println!("{:?}", file.file_path);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
pub mod executor;
pub mod multipart;
mod options;
mod query;
mod types;

pub use client::ImageKitClient;
pub use config::{Config, DEFAULT_API_BASE_URL, DEFAULT_UPLOAD_URL};
pub use error::{ClientError, Result};
pub use executor::{ApiRequest, RequestExecutor, RATE_LIMIT_RESET_HEADER};
pub use multipart::FileSource;
pub use options::FileOptions;
pub use query::{FileTypeFilter, ListFilesParams, ListType, SortOrder, MAX_LIMIT, MIN_LIMIT, MIN_SKIP};
pub use types::{AiTag, FileDetails, JobDetails, JobStatus};

// Re-exported so callers can cancel rate-limit waits without a direct dependency
pub use tokio_util::sync::CancellationToken;
