// Service Catalog
// Registry of dynamic badge services, loaded from the embedded service table

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::models::{PathQuery, PathRule, ServiceDefinition, ServiceParam, ServiceSummary};

const BUILTIN_SERVICES: &str = include_str!("../../data/badge-services.json");

/// Errors raised while loading a service table
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to parse service table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate service key: {0}")]
    DuplicateKey(String),

    #[error("Service '{service}' declares parameter '{param}' more than once")]
    DuplicateParam { service: String, param: String },

    #[error("Service '{service}' path references undeclared parameter '{param}'")]
    UndeclaredParam { service: String, param: String },
}

#[derive(Deserialize)]
struct ServiceTable {
    services: Vec<ServiceEntry>,
}

#[derive(Deserialize)]
struct ServiceEntry {
    key: String,
    name: String,
    #[serde(default)]
    category: String,
    path: String,
    #[serde(default)]
    query: Vec<PathQuery>,
    #[serde(default)]
    params: Vec<ServiceParam>,
    #[serde(default)]
    example: String,
}

impl ServiceEntry {
    fn into_definition(self) -> Result<ServiceDefinition, CatalogError> {
        let mut seen = HashSet::new();
        for param in &self.params {
            if !seen.insert(param.name.as_str()) {
                return Err(CatalogError::DuplicateParam {
                    service: self.key.clone(),
                    param: param.name.clone(),
                });
            }
        }

        let mut path = PathRule::parse(&self.path);
        path.query = self.query;

        if let Some(missing) = path.param_names().find(|name| !seen.contains(name)) {
            return Err(CatalogError::UndeclaredParam {
                service: self.key.clone(),
                param: missing.to_string(),
            });
        }

        Ok(ServiceDefinition {
            key: self.key,
            name: self.name,
            category: self.category,
            params: self.params,
            example_url: self.example,
            path,
        })
    }
}

/// Immutable key → definition mapping that iterates in table order
pub struct ServiceCatalog {
    services: Vec<ServiceDefinition>,
    index: HashMap<String, usize>,
}

impl ServiceCatalog {
    /// Load the service table compiled into the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_SERVICES)
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let table: ServiceTable = serde_json::from_str(content)?;

        let mut services = Vec::with_capacity(table.services.len());
        let mut index = HashMap::with_capacity(table.services.len());
        for entry in table.services {
            let definition = entry.into_definition()?;
            if index.contains_key(&definition.key) {
                return Err(CatalogError::DuplicateKey(definition.key));
            }
            index.insert(definition.key.clone(), services.len());
            services.push(definition);
        }

        log::debug!("Loaded {} badge services", services.len());
        Ok(Self { services, index })
    }

    pub fn get(&self, key: &str) -> Option<&ServiceDefinition> {
        self.index.get(key).map(|&position| &self.services[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceDefinition> {
        self.services.iter()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Picker entries, optionally restricted to one category
    pub fn summaries(&self, category: Option<&str>) -> Vec<ServiceSummary> {
        self.services
            .iter()
            .filter(|service| category.map_or(true, |category| service.category == category))
            .map(ServiceDefinition::to_summary)
            .collect()
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for service in &self.services {
            if !categories.contains(&service.category.as_str()) {
                categories.push(&service.category);
            }
        }
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PathSegment;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = ServiceCatalog::builtin().unwrap();
        assert!(catalog.len() >= 50);
        assert_eq!(catalog.iter().next().unwrap().key, "github/followers");

        let stars = catalog.get("github/stars").unwrap();
        assert_eq!(stars.name, "GitHub Stars");
        assert_eq!(stars.params.len(), 2);
        assert!(stars.params.iter().all(|param| param.required));
    }

    #[test]
    fn test_builtin_special_paths() {
        let catalog = ServiceCatalog::builtin().unwrap();

        let node = catalog.get("npm/node").unwrap();
        assert_eq!(node.path.segments[0], PathSegment::Literal("node".to_string()));

        let sonar = catalog.get("sonar/quality_gate").unwrap();
        assert_eq!(sonar.path.query.len(), 1);
        assert_eq!(sonar.path.query[0].name, "server");
        assert!(!sonar.param("server").unwrap().required);

        let downloads = catalog.get("github/downloads").unwrap();
        assert!(downloads
            .path
            .segments
            .contains(&PathSegment::OptionalParam("tag".to_string())));
    }

    #[test]
    fn test_categories_in_table_order() {
        let catalog = ServiceCatalog::builtin().unwrap();
        let categories = catalog.categories();
        assert_eq!(categories.first(), Some(&"github"));
        assert!(categories.contains(&"security"));
        assert_eq!(
            catalog.summaries(Some("docker")).len(),
            catalog.iter().filter(|s| s.category == "docker").count()
        );
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let json = r#"{"services": [
            {"key": "a", "name": "A", "path": "a"},
            {"key": "a", "name": "A again", "path": "a"}
        ]}"#;
        assert!(matches!(
            ServiceCatalog::from_json(json),
            Err(CatalogError::DuplicateKey(key)) if key == "a"
        ));
    }

    #[test]
    fn test_rejects_undeclared_path_params() {
        let json = r#"{"services": [
            {"key": "x", "name": "X", "path": "x/{user}", "params": []}
        ]}"#;
        assert!(matches!(
            ServiceCatalog::from_json(json),
            Err(CatalogError::UndeclaredParam { .. })
        ));
    }
}
