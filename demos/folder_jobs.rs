//! Folder operations and bulk job polling
//!
//! Run with: cargo run --example folder_jobs

use imagekit_client::{CancellationToken, ImageKitClient};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    // Stop waiting on rate limits once Ctrl-C is pressed
    let token = CancellationToken::new();
    let ctrl_c = token.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        ctrl_c.cancel();
    });

    let client = ImageKitClient::from_env()?.with_cancellation(token);

    println!("📁 Creating /demo-source...");
    client.create_folder("demo-source", "/").await?;

    println!("📋 Copying /demo-source to /demo-target...");
    let job_id = client.copy_folder("/demo-source", "/demo-target").await?;
    println!("   Job: {}", job_id);

    loop {
        let job = client.bulk_job_status(&job_id).await?;
        println!("   {} {:?}", job.kind, job.status);
        if job.is_completed() {
            break;
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    println!("\n🧹 Cleaning up...");
    client.delete_folder("/demo-source").await?;
    client.delete_folder("/demo-target/demo-source").await?;
    println!("   ✅ Done");

    Ok(())
}
