use anyhow::{Context, Result};
use clap::Args;
use jsonapi_client::types::{Document, ResourceObject};
use jsonapi_client::Client;
use serde_json::{Map, Value};

use crate::output::{print_json, print_resources_table, OutputFormat};

#[derive(Args)]
pub struct CreateArgs {
    /// Collection path, e.g. /articles
    pub path: String,

    /// Resource type, e.g. articles
    #[arg(long = "type")]
    pub resource_type: String,

    /// Attributes as a JSON object
    #[arg(long, default_value = "{}")]
    pub attributes: String,
}

pub async fn run(args: &CreateArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let attributes = parse_attributes(&args.attributes)?;
    let doc = Document::new(ResourceObject::new(&args.resource_type, attributes));

    match client.create_resource(&args.path, &doc).await? {
        Some(created) => match format {
            OutputFormat::Table => print_resources_table(std::slice::from_ref(&created.data)),
            OutputFormat::Json => print_json(&created),
        },
        None => eprintln!("Created {} (no content returned)", args.resource_type),
    }
    Ok(())
}

fn parse_attributes(raw: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(raw).context("--attributes is not valid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("--attributes must be a JSON object"),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_attributes;

    #[test]
    fn test_parse_attributes() {
        let attributes = parse_attributes(r#"{"title": "Hello", "draft": true}"#).unwrap();
        assert_eq!(attributes["title"], "Hello");
        assert_eq!(attributes["draft"], true);
    }

    #[test]
    fn test_parse_attributes_rejects_non_objects() {
        assert!(parse_attributes("[1, 2]").is_err());
        assert!(parse_attributes("{title").is_err());
    }
}
