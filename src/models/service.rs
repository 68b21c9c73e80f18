// Service Model
// Dynamic badge services and their path rules

use serde::{Deserialize, Serialize};

/// One fillable field of a dynamic service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceParam {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A piece of a service path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Emitted verbatim
    Literal(String),
    /// Replaced by the parameter value
    Param(String),
    /// Replaced by the parameter value, dropped entirely when it is empty
    OptionalParam(String),
}

/// Query parameter carried by the service path itself (e.g. a self-hosted server URL)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathQuery {
    pub name: String,
    pub param: String,
}

/// Ordered segments plus optional path-level query parameters
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathRule {
    pub segments: Vec<PathSegment>,
    pub query: Vec<PathQuery>,
}

impl PathRule {
    /// Parse a template such as `github/downloads/{user}/{repo}/{tag?}/total`
    pub fn parse(template: &str) -> Self {
        let segments = template
            .split('/')
            .filter(|piece| !piece.is_empty())
            .map(|piece| {
                match piece.strip_prefix('{').and_then(|rest| rest.strip_suffix('}')) {
                    Some(name) => match name.strip_suffix('?') {
                        Some(optional) => PathSegment::OptionalParam(optional.to_string()),
                        None => PathSegment::Param(name.to_string()),
                    },
                    None => PathSegment::Literal(piece.to_string()),
                }
            })
            .collect();

        Self {
            segments,
            query: Vec::new(),
        }
    }

    /// Parameter names referenced by this rule, in order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                PathSegment::Param(name) | PathSegment::OptionalParam(name) => Some(name.as_str()),
                PathSegment::Literal(_) => None,
            })
            .chain(self.query.iter().map(|query| query.param.as_str()))
    }
}

/// A dynamic badge service
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDefinition {
    pub key: String,
    pub name: String,
    pub category: String,
    pub params: Vec<ServiceParam>,
    pub example_url: String,
    #[serde(skip)]
    pub path: PathRule,
}

impl ServiceDefinition {
    pub fn param(&self, name: &str) -> Option<&ServiceParam> {
        self.params.iter().find(|param| param.name == name)
    }

    pub fn to_summary(&self) -> ServiceSummary {
        ServiceSummary {
            key: self.key.clone(),
            name: self.name.clone(),
            category: self.category.clone(),
            param_count: self.params.len(),
        }
    }
}

/// Service entry for pickers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    pub key: String,
    pub name: String,
    pub category: String,
    pub param_count: usize,
}
