//! Upload a file and manage its tags
//!
//! Run with: cargo run --example upload_and_tag -- <file-or-url> <name>

use imagekit_client::{FileOptions, ImageKitClient};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let file = args
        .next()
        .unwrap_or_else(|| "https://ik.imagekit.io/demo/default-image.jpg".to_string());
    let name = args.next().unwrap_or_else(|| "default-image.jpg".to_string());

    let client = ImageKitClient::from_env()?;

    // ==================== Upload ====================

    println!("📤 Uploading {} as {}...", file, name);
    let options = FileOptions::new()
        .with_folder("/demo")
        .with_tags(["demo", "rust"])
        .with_response_fields(["tags", "customMetadata"])
        .with_extension(json!({"name": "google-auto-tagging", "maxTags": 5, "minConfidence": 95}));

    let uploaded = client.upload(&file, &name, Some(&options)).await?;
    let file_id = uploaded.file_id.clone().unwrap_or_default();
    println!("   ✅ Uploaded {} -> {}", file_id, uploaded.url.as_deref().unwrap_or("?"));

    // ==================== Tags ====================

    let ids = vec![file_id.clone()];

    println!("\n🏷️  Adding tag 'featured'...");
    let updated = client.add_tags(&ids, &["featured".to_string()]).await?;
    println!("   Updated: {:?}", updated);

    println!("\n🏷️  Removing tag 'demo'...");
    let updated = client.remove_tags(&ids, &["demo".to_string()]).await?;
    println!("   Updated: {:?}", updated);

    let details = client.file_details(&file_id).await?;
    println!("   Tags now: {:?}", details.tags);

    // ==================== Cleanup ====================

    println!("\n🧹 Deleting uploaded file...");
    client.delete_file(&file_id).await?;
    println!("   ✅ Deleted");

    Ok(())
}
