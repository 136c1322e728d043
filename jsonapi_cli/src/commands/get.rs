use anyhow::{bail, Result};
use clap::Args;
use jsonapi_client::{Client, Query, ResourceQuery};

use crate::output::{print_json, print_resources_table, OutputFormat};

#[derive(Args)]
pub struct GetArgs {
    /// Resource path, e.g. /articles or /articles/1
    pub path: String,

    /// Expect a single resource instead of a collection
    #[arg(long)]
    pub single: bool,

    /// Relationships to side-load (comma-separated, repeatable)
    #[arg(long, value_delimiter = ',')]
    pub include: Vec<String>,

    /// Sparse fieldset as TYPE=field1,field2 (repeatable)
    #[arg(long)]
    pub fields: Vec<String>,

    /// Filter as KEY=VALUE (repeatable)
    #[arg(long)]
    pub filter: Vec<String>,

    /// Sort fields, '-' prefix for descending (comma-separated, repeatable)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub sort: Vec<String>,

    /// Page number
    #[arg(long)]
    pub page: Option<i64>,

    /// Results per page
    #[arg(long)]
    pub page_size: Option<i64>,
}

pub async fn run(args: &GetArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let query = build_query(args)?;

    if args.single {
        let doc = client.fetch_resource(&args.path, Some(&query)).await?;
        match format {
            OutputFormat::Table => print_resources_table(std::slice::from_ref(&doc.data)),
            OutputFormat::Json => print_json(&doc),
        }
        return Ok(());
    }

    let doc = client.fetch_collection(&args.path, Some(&query)).await?;
    match format {
        OutputFormat::Table => print_resources_table(&doc.data),
        OutputFormat::Json => print_json(&doc),
    }
    Ok(())
}

fn build_query(args: &GetArgs) -> Result<ResourceQuery> {
    let mut query = ResourceQuery::default().with_includes(&args.include);

    for raw in args.fields.iter() {
        let (resource_type, fields) = split_pair(raw, "--fields")?;
        let fields: Vec<String> = fields.split(',').map(str::to_string).collect();
        query = query.with_fields(resource_type, &fields);
    }
    for raw in args.filter.iter() {
        let (key, value) = split_pair(raw, "--filter")?;
        query = query.with_filter(key, value);
    }
    for param in args.sort.iter() {
        query = query.with_sort_param(param);
    }
    if let Some(page) = args.page {
        query = query.with_page(page);
    }
    if let Some(page_size) = args.page_size {
        query = query.with_page_size(page_size);
    }
    Ok(query)
}

fn split_pair<'a>(raw: &'a str, flag: &str) -> Result<(&'a str, &'a str)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => bail!("{} expects KEY=VALUE, got '{}'", flag, raw),
    }
}
