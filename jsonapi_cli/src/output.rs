use jsonapi_client::types::ResourceObject;
use jsonapi_client::ApiError;
use serde::Serialize;
use serde_json::{Map, Value};
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "Type")]
    resource_type: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Attributes")]
    attributes: String,
}

/// Longest attribute summary shown in a table cell.
const MAX_ATTRIBUTES_WIDTH: usize = 80;

fn format_attributes(attributes: &Map<String, Value>) -> String {
    let summary = attributes
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{}={}", key, s),
            other => format!("{}={}", key, other),
        })
        .collect::<Vec<_>>()
        .join(", ");
    if summary.chars().count() <= MAX_ATTRIBUTES_WIDTH {
        summary
    } else {
        let cut: String = summary.chars().take(MAX_ATTRIBUTES_WIDTH - 3).collect();
        format!("{}...", cut)
    }
}

fn build_resource_rows(resources: &[ResourceObject]) -> Vec<ResourceRow> {
    resources
        .iter()
        .map(|resource| ResourceRow {
            resource_type: resource.resource_type.clone(),
            id: resource.id.clone().unwrap_or_else(|| "-".to_string()),
            attributes: format_attributes(&resource.attributes),
        })
        .collect()
}

pub fn print_resources_table(resources: &[ResourceObject]) {
    println!("{}", Table::new(build_resource_rows(resources)));
}

pub fn print_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Renders an API error for the terminal: a one-line summary tagged with the
/// error kind, or the full body dump when `full` is set.
pub fn render_api_error(error: &ApiError, full: bool) -> String {
    if full {
        error.message().to_string()
    } else {
        format!("Error [{}]: {}", error.kind(), error.summary())
    }
}
