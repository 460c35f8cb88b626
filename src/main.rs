use anyhow::Result;
use clap::{Parser, Subcommand};
use image_describer::models::{GeminiConfig, UploadedAsset};
use image_describer::{server, DescriptionService};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "image-describer")]
#[command(about = "Describe images with Gemini")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API.
    Serve {
        #[arg(long, env = "SERVER_ADDR", default_value = "0.0.0.0:8080")]
        addr: SocketAddr,
    },
    /// Describe a local image file.
    Describe {
        #[arg(value_name = "FILE")]
        path: PathBuf,
        #[arg(long, default_value = "Describe this image in detail.")]
        prompt: String,
    },
    /// Estimate calories for a photo of food.
    Calories {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "image_describer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let service = match GeminiConfig::from_env().and_then(|c| DescriptionService::from_config(&c)) {
        Ok(service) => service,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let outcome = match args.command {
        Command::Serve { addr } => {
            info!("Starting image-describer on {}", addr);
            server::serve(addr, service).await.map(|_| None)
        }
        Command::Describe { path, prompt } => match UploadedAsset::from_path(&path).await {
            Ok(asset) => service.describe_image(asset, &prompt).await.map(Some),
            Err(e) => Err(e),
        },
        Command::Calories { path } => match UploadedAsset::from_path(&path).await {
            Ok(asset) => service.count_calories(asset).await.map(Some),
            Err(e) => Err(e),
        },
    };

    match outcome {
        Ok(Some(text)) => {
            println!("{}", text);
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
