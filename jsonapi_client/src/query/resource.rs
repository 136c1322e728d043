use std::collections::BTreeMap;

use url::Url;

use super::{
    common::{QueryCommon, SortDirection},
    Query,
};

/// Query parameters for fetching resources: `include`, sparse fieldsets,
/// filters, sorting and pagination.
#[derive(Default, Debug, Clone)]
pub struct ResourceQuery {
    pub common: QueryCommon,
    pub includes: Vec<String>,
    pub fields: BTreeMap<String, Vec<String>>,
    pub filters: Vec<(String, String)>,
    pub sort: Vec<(String, SortDirection)>,
}

impl Query for ResourceQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if !self.includes.is_empty() {
            url.query_pairs_mut()
                .append_pair("include", &self.includes.join(","));
        }
        for (resource_type, fields) in self.fields.iter() {
            url.query_pairs_mut()
                .append_pair(&format!("fields[{}]", resource_type), &fields.join(","));
        }
        for (key, value) in self.filters.iter() {
            url.query_pairs_mut()
                .append_pair(&format!("filter[{}]", key), value);
        }
        if !self.sort.is_empty() {
            let sort = self
                .sort
                .iter()
                .map(|(field, direction)| match direction {
                    SortDirection::Asc => field.clone(),
                    SortDirection::Desc => format!("-{}", field),
                })
                .collect::<Vec<_>>()
                .join(",");
            url.query_pairs_mut().append_pair("sort", &sort);
        }
        self.common.add_to_url(&url)
    }
}

impl ResourceQuery {
    /// Side-loads a relationship path (e.g. `comments.author`).
    pub fn with_include(mut self, include: &str) -> Self {
        self.includes.push(include.to_string());
        self
    }

    pub fn with_includes(mut self, includes: &[String]) -> Self {
        self.includes.extend(includes.iter().cloned());
        self
    }

    /// Restricts the attributes returned for `resource_type`.
    pub fn with_fields(mut self, resource_type: &str, fields: &[String]) -> Self {
        self.fields
            .entry(resource_type.to_string())
            .or_default()
            .extend(fields.iter().cloned());
        self
    }

    pub fn with_filter(mut self, key: &str, value: &str) -> Self {
        self.filters.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_sort(mut self, field: &str, direction: SortDirection) -> Self {
        self.sort.push((field.to_string(), direction));
        self
    }

    /// Adds a sort field written the way JSON:API does: a leading `-` sorts descending.
    pub fn with_sort_param(self, param: &str) -> Self {
        match param.strip_prefix('-') {
            Some(field) => self.with_sort(field, SortDirection::Desc),
            None => self.with_sort(param, SortDirection::Asc),
        }
    }
}
