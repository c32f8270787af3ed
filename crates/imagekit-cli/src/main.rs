//! ImageKit CLI - manage ImageKit.io media from the shell

mod cli;

use clap::Parser;
use cli::{Args, Command};
use imagekit_client::ImageKitClient;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| format!("imagekit_client={},imagekit={}", log_level, log_level).into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = args.config();
    tracing::debug!(?config, "Using configuration");
    let client = ImageKitClient::new(config)?;

    let output = run(&client, args.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run(client: &ImageKitClient, command: Command) -> anyhow::Result<serde_json::Value> {
    let output = match command {
        Command::List {
            list_type,
            sort,
            path,
            search,
            tags,
            file_type,
            limit,
            skip,
        } => {
            let params = cli::list_params(list_type, sort, path, search, tags, file_type, limit, skip);
            serde_json::to_value(client.list_files(Some(&params)).await?)?
        }
        Command::Details { file_id } => serde_json::to_value(client.file_details(&file_id).await?)?,
        Command::Delete { file_id } => {
            client.delete_file(&file_id).await?;
            json!({ "deleted": file_id })
        }
        Command::Rename {
            file_path,
            new_name,
            purge_cache,
        } => {
            let purge_request_id = client.rename_file(&file_path, &new_name, purge_cache).await?;
            json!({ "purgeRequestId": purge_request_id })
        }
        Command::AddTags { file_ids, tags } => {
            json!({ "updated": client.add_tags(&file_ids, &tags).await? })
        }
        Command::RemoveTags { file_ids, tags } => {
            json!({ "updated": client.remove_tags(&file_ids, &tags).await? })
        }
        Command::Upload {
            file,
            name,
            folder,
            tags,
            private,
            exact_name,
        } => {
            let options = cli::upload_options(folder, tags, private, exact_name);
            tracing::info!("Uploading {}", name);
            serde_json::to_value(client.upload(&file, &name, Some(&options)).await?)?
        }
        Command::CreateFolder { name, parent } => {
            client.create_folder(&name, &parent).await?;
            json!({ "created": name, "parent": parent })
        }
        Command::DeleteFolder { path } => {
            client.delete_folder(&path).await?;
            json!({ "deleted": path })
        }
        Command::CopyFolder {
            source,
            destination,
        } => json!({ "jobId": client.copy_folder(&source, &destination).await? }),
        Command::MoveFolder {
            source,
            destination,
        } => json!({ "jobId": client.move_folder(&source, &destination).await? }),
        Command::Job { job_id } => serde_json::to_value(client.bulk_job_status(&job_id).await?)?,
    };

    Ok(output)
}
