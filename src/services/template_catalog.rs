// Template Catalog
// Preset static badges and dynamic service shortcuts

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{DynamicTemplate, StaticTemplate, Template};

const STATIC_PRESETS: [(&str, &str, &str, &str); 6] = [
    ("build-passing", "build", "passing", "brightgreen"),
    ("version", "version", "1.0.0", "blue"),
    ("license", "license", "MIT", "green"),
    ("coverage", "coverage", "95%", "brightgreen"),
    ("docs", "docs", "latest", "blue"),
    ("status", "status", "active", "success"),
];

const DYNAMIC_PRESETS: [(&str, &str, &str, &[(&str, &str)]); 6] = [
    ("github-stars", "GitHub Stars", "github/stars", &[("user", "facebook"), ("repo", "react")]),
    ("github-license", "GitHub License", "github/license", &[("user", "twbs"), ("repo", "bootstrap")]),
    ("npm-version", "NPM Version", "npm/v", &[("package", "react")]),
    ("pypi-version", "PyPI Version", "pypi/v", &[("package", "django")]),
    ("docker-pulls", "Docker Pulls", "docker/pulls", &[("image", "nginx")]),
    ("discord", "Discord", "discord", &[("serverId", "102860784329052160")]),
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCatalog {
    static_templates: Vec<StaticTemplate>,
    dynamic_templates: Vec<DynamicTemplate>,
}

impl TemplateCatalog {
    pub fn builtin() -> Self {
        let static_templates = STATIC_PRESETS
            .iter()
            .map(|(id, label, message, color)| StaticTemplate {
                id: id.to_string(),
                label: label.to_string(),
                message: message.to_string(),
                message_color: color.to_string(),
                style: "flat".to_string(),
            })
            .collect();

        let dynamic_templates = DYNAMIC_PRESETS
            .iter()
            .map(|(id, name, service_key, values)| DynamicTemplate {
                id: id.to_string(),
                name: name.to_string(),
                service_key: service_key.to_string(),
                params: values
                    .iter()
                    .map(|(param, value)| (param.to_string(), value.to_string()))
                    .collect::<BTreeMap<_, _>>(),
            })
            .collect();

        Self {
            static_templates,
            dynamic_templates,
        }
    }

    pub fn static_templates(&self) -> &[StaticTemplate] {
        &self.static_templates
    }

    pub fn dynamic_templates(&self) -> &[DynamicTemplate] {
        &self.dynamic_templates
    }

    /// Look up a template of either kind; static ids win on a clash
    pub fn find(&self, id: &str) -> Option<Template<'_>> {
        if let Some(template) = self.static_templates.iter().find(|t| t.id == id) {
            return Some(Template::Static(template));
        }
        self.dynamic_templates
            .iter()
            .find(|t| t.id == id)
            .map(Template::Dynamic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceCatalog;

    #[test]
    fn test_static_presets() {
        let catalog = TemplateCatalog::builtin();
        match catalog.find("coverage") {
            Some(Template::Static(template)) => {
                assert_eq!(template.label, "coverage");
                assert_eq!(template.message, "95%");
                assert_eq!(template.message_color, "brightgreen");
                assert_eq!(template.style, "flat");
            }
            other => panic!("unexpected template: {other:?}"),
        }
        assert_eq!(catalog.static_templates().len(), 6);
    }

    #[test]
    fn test_dynamic_presets_reference_known_services() {
        let services = ServiceCatalog::builtin().unwrap();
        let catalog = TemplateCatalog::builtin();

        for template in catalog.dynamic_templates() {
            let service = services
                .get(&template.service_key)
                .unwrap_or_else(|| panic!("unknown service {}", template.service_key));
            for name in template.params.keys() {
                assert!(service.param(name).is_some(), "{} has no param {name}", service.key);
            }
        }
    }

    #[test]
    fn test_unknown_template() {
        assert!(TemplateCatalog::builtin().find("nope").is_none());
    }
}
