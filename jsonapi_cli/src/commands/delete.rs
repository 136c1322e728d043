use anyhow::Result;
use clap::Args;
use jsonapi_client::Client;

#[derive(Args)]
pub struct DeleteArgs {
    /// Resource path, e.g. /articles/1
    pub path: String,
}

pub async fn run(args: &DeleteArgs, client: &Client) -> Result<()> {
    client.delete_resource(&args.path).await?;
    eprintln!("Deleted {}", args.path);
    Ok(())
}
