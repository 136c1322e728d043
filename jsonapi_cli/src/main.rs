mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jsonapi_client::Client;

use crate::output::{render_api_error, OutputFormat};

#[derive(Parser)]
#[command(name = "jsonapi")]
#[command(about = "Query JSON:API servers and explain their error responses")]
struct Cli {
    /// Base URL of the API. Falls back to JSONAPI_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Print the full response body of API errors instead of a one-line summary
    #[arg(long, global = true)]
    full_errors: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a resource or a collection
    Get(commands::get::GetArgs),
    /// Create a resource
    Create(commands::create::CreateArgs),
    /// Delete a resource
    Delete(commands::delete::DeleteArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("jsonapi_client=error")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => Ok(()),
        Err(err) => {
            let api_error = err
                .downcast_ref::<jsonapi_client::Error>()
                .and_then(jsonapi_client::Error::api_error);
            match api_error {
                Some(api_error) => {
                    eprintln!("{}", render_api_error(api_error, cli.full_errors));
                    std::process::exit(1);
                }
                None => Err(err),
            }
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("JSONAPI_BASE_URL").ok())
        .context("No API base URL: pass --base-url or set JSONAPI_BASE_URL")?;
    let client = Client::new(&base_url)?;

    match &cli.command {
        Commands::Get(args) => commands::get::run(args, &client, &format).await?,
        Commands::Create(args) => commands::create::run(args, &client, &format).await?,
        Commands::Delete(args) => commands::delete::run(args, &client).await?,
    }

    Ok(())
}
