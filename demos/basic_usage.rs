//! Basic usage example for the ImageKit media management API
//!
//! This example demonstrates:
//! - Listing files with filters and sorting
//! - Reading file details
//! - Renaming and copying a file
//!
//! Requires `IMAGEKIT_PRIVATE_KEY` (a `.env` file works too).
//!
//! Run with: cargo run --example basic_usage

use imagekit_client::{FileTypeFilter, ImageKitClient, ListFilesParams, ListType, SortOrder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    println!("🚀 ImageKit - Basic Usage Example\n");

    let client = ImageKitClient::from_env()?;

    // ==================== Listing ====================

    println!("📋 Ten newest images...");
    let params = ListFilesParams::new()
        .with_type(ListType::File)
        .with_file_type(FileTypeFilter::Image)
        .with_sort(SortOrder::DescCreated)
        .with_limit(10);

    let files = client.list_files(Some(&params)).await?;
    for file in &files {
        println!(
            "   - {} ({} bytes)",
            file.file_path.as_deref().unwrap_or("?"),
            file.size
        );
    }

    let Some(first) = files.first() else {
        println!("\nNo images found, nothing else to show.");
        return Ok(());
    };

    // ==================== Details ====================

    let file_id = first.file_id.clone().unwrap_or_default();
    println!("\n🔍 Details for {}...", file_id);
    let details = client.file_details(&file_id).await?;
    println!("{}", serde_json::to_string_pretty(&details)?);

    // ==================== Copy ====================

    if let Some(path) = &details.file_path {
        println!("\n📋 Copying {} to /demo-copies...", path);
        match client.copy_file(path, "/demo-copies").await {
            Ok(()) => println!("   ✅ Copied"),
            Err(e) => println!("   ⚠️  {}", e),
        }
    }

    println!("\n✨ Example completed successfully!");
    Ok(())
}
