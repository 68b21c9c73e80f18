// URL Builder
// Turns badge field sets into rendering-service request URLs

use std::collections::BTreeMap;

use crate::models::{
    DynamicBadge, LogoRef, PathSegment, StaticBadge, DEFAULT_BADGE_ENDPOINT, DEFAULT_LABEL,
    DEFAULT_LABEL_COLOR, DEFAULT_MESSAGE, DEFAULT_MESSAGE_COLOR, DEFAULT_STYLE,
};
use crate::services::ServiceCatalog;

/// Reasons a dynamic badge cannot be built yet
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("No service selected")]
    NoService,

    #[error("Missing required parameters for {service}: {}", .missing.join(", "))]
    MissingParams { service: String, missing: Vec<String> },
}

/// Root of the badge-rendering service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeEndpoint {
    root: String,
}

impl Default for BadgeEndpoint {
    fn default() -> Self {
        Self {
            root: DEFAULT_BADGE_ENDPOINT.to_string(),
        }
    }
}

impl BadgeEndpoint {
    /// Blank roots fall back to the public endpoint
    pub fn new(root: &str) -> Self {
        let root = root.trim().trim_end_matches('/');
        if root.is_empty() {
            return Self::default();
        }
        Self {
            root: root.to_string(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn static_base(&self) -> String {
        format!("{}/badge/", self.root)
    }

    pub fn dynamic_base(&self) -> String {
        format!("{}/", self.root)
    }
}

/// Escape text for the `label-message-color` path: `-` → `--`, `_` → `__`, space → `_`
pub fn encode_text(text: &str) -> String {
    text.replace('-', "--").replace('_', "__").replace(' ', "_")
}

/// Inverse of [`encode_text`]. Underscore runs next to spaces are ambiguous and decode greedily.
pub fn decode_text(encoded: &str) -> String {
    let mut decoded = String::with_capacity(encoded.len());
    let mut chars = encoded.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '-' | '_' if chars.peek() == Some(&c) => {
                chars.next();
                decoded.push(c);
            }
            '_' => decoded.push(' '),
            other => decoded.push(other),
        }
    }
    decoded
}

/// Path text for a static badge: escaped, with URL delimiters percent-encoded
fn path_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in encode_text(text).chars() {
        match c {
            '%' => out.push_str("%25"),
            '/' => out.push_str("%2F"),
            '?' => out.push_str("%3F"),
            '#' => out.push_str("%23"),
            other => out.push(other),
        }
    }
    out
}

/// Ordered query parameters, percent-encoded on output
#[derive(Debug, Default)]
struct Query<'a> {
    pairs: Vec<(&'a str, String)>,
}

impl<'a> Query<'a> {
    fn push(&mut self, name: &'a str, value: impl Into<String>) {
        self.pairs.push((name, value.into()));
    }

    fn push_logo(&mut self, logo: LogoRef<'_>) {
        match logo {
            LogoRef::Inline(data_url) => self.push("logoSvg", data_url),
            LogoRef::Named(name) => self.push("logo", name),
            LogoRef::None => {}
        }
    }

    fn append_to(&self, url: &mut String) {
        if self.pairs.is_empty() {
            return;
        }
        url.push(if url.contains('?') { '&' } else { '?' });
        let encoded: Vec<String> = self
            .pairs
            .iter()
            .map(|(name, value)| format!("{name}={}", urlencoding::encode(value)))
            .collect();
        url.push_str(&encoded.join("&"));
    }
}

fn param_value<'a>(params: &'a BTreeMap<String, String>, name: &str) -> &'a str {
    params.get(name).map(|value| value.trim()).unwrap_or_default()
}

/// Colors travel without the `#` a picker adds; a bare `#` would cut the URL short
fn color_value(value: &str) -> &str {
    value.trim().trim_start_matches('#')
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    let value = value.trim();
    if value.is_empty() {
        default
    } else {
        value
    }
}

/// Build the request URL for a static badge. Always succeeds.
pub fn build_static_url(
    endpoint: &BadgeEndpoint,
    badge: &StaticBadge,
    custom_logo: Option<&str>,
) -> String {
    let label = or_default(&badge.label, DEFAULT_LABEL);
    let message = or_default(&badge.message, DEFAULT_MESSAGE);
    let label_color = or_default(color_value(&badge.label_color), DEFAULT_LABEL_COLOR);
    let message_color = or_default(color_value(&badge.message_color), DEFAULT_MESSAGE_COLOR);
    let style = or_default(&badge.style, DEFAULT_STYLE);

    let mut url = format!(
        "{}{}-{}-{}",
        endpoint.static_base(),
        path_text(label),
        path_text(message),
        path_text(message_color)
    );

    let mut query = Query::default();
    if style != DEFAULT_STYLE {
        query.push("style", style);
    }
    if label_color != DEFAULT_LABEL_COLOR {
        query.push("labelColor", label_color);
    }
    query.push_logo(LogoRef::resolve(&badge.logo, custom_logo));
    let logo_color = badge.logo_color.trim();
    if !logo_color.is_empty() {
        query.push("logoColor", logo_color);
    }
    let cache_seconds = badge.cache_seconds.trim();
    if badge.cache_enabled && !cache_seconds.is_empty() {
        query.push("cacheSeconds", cache_seconds);
    }

    query.append_to(&mut url);
    url
}

/// Build the request URL for a dynamic badge.
///
/// Keys missing from the catalog still produce `{root}/{key}` so hand-typed
/// service paths keep working.
pub fn build_dynamic_url(
    endpoint: &BadgeEndpoint,
    catalog: &ServiceCatalog,
    badge: &DynamicBadge,
    custom_logo: Option<&str>,
) -> Result<String, BuildError> {
    let service_key = badge.service_key.trim();
    if service_key.is_empty() {
        return Err(BuildError::NoService);
    }

    let value = |name: &str| param_value(&badge.params, name);

    let mut url = endpoint.dynamic_base();
    match catalog.get(service_key) {
        Some(service) => {
            let missing: Vec<String> = service
                .params
                .iter()
                .filter(|param| param.required && value(&param.name).is_empty())
                .map(|param| param.name.clone())
                .collect();
            if !missing.is_empty() {
                return Err(BuildError::MissingParams {
                    service: service.key.clone(),
                    missing,
                });
            }

            let segments: Vec<&str> = service
                .path
                .segments
                .iter()
                .filter_map(|segment| match segment {
                    PathSegment::Literal(text) => Some(text.as_str()),
                    PathSegment::Param(name) => Some(value(name)),
                    PathSegment::OptionalParam(name) => Some(value(name)).filter(|v| !v.is_empty()),
                })
                .collect();
            url.push_str(&segments.join("/"));

            let mut path_query = Query::default();
            for item in &service.path.query {
                let item_value = value(&item.param);
                if !item_value.is_empty() {
                    path_query.push(&item.name, item_value);
                }
            }
            path_query.append_to(&mut url);
        }
        None => {
            log::debug!("Unknown badge service '{service_key}', using it as the path");
            url.push_str(service_key);
        }
    }

    let display = &badge.display;
    let style = or_default(&display.style, DEFAULT_STYLE);
    let color = color_value(&display.color);
    let label_color = color_value(&display.label_color);
    let logo_color = display.logo_color.trim();

    let mut query = Query::default();
    if style != DEFAULT_STYLE {
        query.push("style", style);
    }
    query.push_logo(LogoRef::resolve(&display.logo, custom_logo));
    if !logo_color.is_empty() {
        query.push("logoColor", logo_color);
    }
    if !color.is_empty() && color != DEFAULT_MESSAGE_COLOR {
        query.push("color", color);
    }
    if !label_color.is_empty() && label_color != DEFAULT_LABEL_COLOR {
        query.push("labelColor", label_color);
    }

    query.append_to(&mut url);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DisplayOptions;

    fn dynamic(key: &str, params: &[(&str, &str)]) -> DynamicBadge {
        DynamicBadge {
            service_key: key.to_string(),
            params: params
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            display: DisplayOptions::default(),
        }
    }

    #[test]
    fn test_encode_text() {
        assert_eq!(encode_text("a-b c_d"), "a--b_c__d");
        assert_eq!(decode_text("a--b_c__d"), "a-b c_d");
        for text in ["build", "just some words", "semver-1.2.3", "snake_case", "--"] {
            assert_eq!(decode_text(&encode_text(text)), text);
        }
    }

    #[test]
    fn test_static_defaults() {
        let url = build_static_url(&BadgeEndpoint::default(), &StaticBadge::default(), None);
        assert_eq!(url, "https://img.shields.io/badge/label-message-brightgreen");
    }

    #[test]
    fn test_static_query_omits_defaults() {
        let badge = StaticBadge {
            label: " build ".to_string(),
            message: "passing".to_string(),
            style: "social".to_string(),
            label_color: "555".to_string(),
            ..Default::default()
        };
        let url = build_static_url(&BadgeEndpoint::default(), &badge, None);
        assert_eq!(url, "https://img.shields.io/badge/build-passing-brightgreen?style=social");
    }

    #[test]
    fn test_static_query_order() {
        let badge = StaticBadge {
            label: "my label".to_string(),
            message: "v1.0-beta".to_string(),
            label_color: "blue".to_string(),
            message_color: "ff0000".to_string(),
            style: "for-the-badge".to_string(),
            logo: "github".to_string(),
            logo_color: "white".to_string(),
            cache_enabled: true,
            cache_seconds: "3600".to_string(),
            ..Default::default()
        };
        let url = build_static_url(&BadgeEndpoint::default(), &badge, None);
        assert_eq!(
            url,
            "https://img.shields.io/badge/my_label-v1.0--beta-ff0000\
             ?style=for-the-badge&labelColor=blue&logo=github&logoColor=white&cacheSeconds=3600"
        );
    }

    #[test]
    fn test_hex_colors_drop_hash() {
        let badge = StaticBadge {
            message_color: " #ff0000".to_string(),
            label_color: "#333".to_string(),
            ..Default::default()
        };
        let url = build_static_url(&BadgeEndpoint::default(), &badge, None);
        assert_eq!(url, "https://img.shields.io/badge/label-message-ff0000?labelColor=333");

        let catalog = ServiceCatalog::builtin().unwrap();
        let mut dynamic_badge = dynamic("npm/v", &[("package", "react")]);
        dynamic_badge.display.color = "#4c1".to_string();
        let url = build_dynamic_url(&BadgeEndpoint::default(), &catalog, &dynamic_badge, None).unwrap();
        assert_eq!(url, "https://img.shields.io/npm/v/react?color=4c1");
    }

    #[test]
    fn test_static_cache_requires_checkbox() {
        let badge = StaticBadge {
            cache_enabled: false,
            cache_seconds: "300".to_string(),
            ..Default::default()
        };
        let url = build_static_url(&BadgeEndpoint::default(), &badge, None);
        assert!(!url.contains("cacheSeconds"));
    }

    #[test]
    fn test_static_escapes_url_delimiters() {
        let badge = StaticBadge {
            label: "coverage".to_string(),
            message: "95%".to_string(),
            ..Default::default()
        };
        let url = build_static_url(&BadgeEndpoint::default(), &badge, None);
        assert_eq!(url, "https://img.shields.io/badge/coverage-95%25-brightgreen");
    }

    #[test]
    fn test_custom_logo_replaces_named_logo() {
        let badge = StaticBadge {
            logo: "github".to_string(),
            ..Default::default()
        };
        let url = build_static_url(
            &BadgeEndpoint::default(),
            &badge,
            Some("data:image/png;base64,AA=="),
        );
        assert!(url.ends_with("?logoSvg=data%3Aimage%2Fpng%3Bbase64%2CAA%3D%3D"));
        assert!(!url.contains("logo=github"));
    }

    #[test]
    fn test_custom_endpoint() {
        let endpoint = BadgeEndpoint::new("https://badges.example.com/ ");
        assert_eq!(endpoint.static_base(), "https://badges.example.com/badge/");
        assert_eq!(endpoint.dynamic_base(), "https://badges.example.com/");
        assert_eq!(BadgeEndpoint::new("  "), BadgeEndpoint::default());
    }

    #[test]
    fn test_dynamic_github_stars() {
        let catalog = ServiceCatalog::builtin().unwrap();
        let badge = dynamic("github/stars", &[("user", "facebook"), ("repo", "react")]);
        let url = build_dynamic_url(&BadgeEndpoint::default(), &catalog, &badge, None).unwrap();
        assert_eq!(url, "https://img.shields.io/github/stars/facebook/react");
    }

    #[test]
    fn test_dynamic_optional_segment() {
        let catalog = ServiceCatalog::builtin().unwrap();
        let endpoint = BadgeEndpoint::default();

        let badge = dynamic("github/downloads", &[("user", "atom"), ("repo", "atom"), ("tag", "")]);
        assert_eq!(
            build_dynamic_url(&endpoint, &catalog, &badge, None).unwrap(),
            "https://img.shields.io/github/downloads/atom/atom/total"
        );

        let badge = dynamic("github/downloads", &[("user", "atom"), ("repo", "atom"), ("tag", "v1.0")]);
        assert_eq!(
            build_dynamic_url(&endpoint, &catalog, &badge, None).unwrap(),
            "https://img.shields.io/github/downloads/atom/atom/v1.0/total"
        );
    }

    #[test]
    fn test_dynamic_remapped_paths() {
        let catalog = ServiceCatalog::builtin().unwrap();
        let endpoint = BadgeEndpoint::default();

        let release = dynamic("github/release", &[("user", "nodejs"), ("repo", "node")]);
        assert_eq!(
            build_dynamic_url(&endpoint, &catalog, &release, None).unwrap(),
            "https://img.shields.io/github/v/release/nodejs/node"
        );

        let node = dynamic("npm/node", &[("package", "typescript")]);
        assert_eq!(
            build_dynamic_url(&endpoint, &catalog, &node, None).unwrap(),
            "https://img.shields.io/node/v/typescript"
        );

        let scrutinizer = dynamic(
            "scrutinizer/g",
            &[("vcs", "g"), ("user", "phpdocumentor"), ("repo", "phpdocumentor2")],
        );
        assert_eq!(
            build_dynamic_url(&endpoint, &catalog, &scrutinizer, None).unwrap(),
            "https://img.shields.io/scrutinizer/g/phpdocumentor/phpdocumentor2"
        );
    }

    #[test]
    fn test_dynamic_sonar_server_query() {
        let catalog = ServiceCatalog::builtin().unwrap();
        let mut badge = dynamic(
            "sonar/quality_gate",
            &[("project", "my-project"), ("server", "https://sonarcloud.io")],
        );
        badge.display.style = "flat-square".to_string();

        let url = build_dynamic_url(&BadgeEndpoint::default(), &catalog, &badge, None).unwrap();
        assert_eq!(
            url,
            "https://img.shields.io/sonar/quality_gate/my-project\
             ?server=https%3A%2F%2Fsonarcloud.io&style=flat-square"
        );
    }

    #[test]
    fn test_dynamic_missing_required() {
        let catalog = ServiceCatalog::builtin().unwrap();
        let badge = dynamic("github/stars", &[("user", "facebook"), ("repo", "  ")]);
        assert_eq!(
            build_dynamic_url(&BadgeEndpoint::default(), &catalog, &badge, None),
            Err(BuildError::MissingParams {
                service: "github/stars".to_string(),
                missing: vec!["repo".to_string()],
            })
        );
    }

    #[test]
    fn test_dynamic_no_service() {
        let catalog = ServiceCatalog::builtin().unwrap();
        let badge = dynamic(" ", &[]);
        assert_eq!(
            build_dynamic_url(&BadgeEndpoint::default(), &catalog, &badge, None),
            Err(BuildError::NoService)
        );
    }

    #[test]
    fn test_dynamic_unknown_service_keeps_shared_query() {
        let catalog = ServiceCatalog::builtin().unwrap();
        let mut badge = dynamic("crates/v/serde", &[]);
        badge.display.color = "orange".to_string();
        badge.display.label_color = "555".to_string();

        let url = build_dynamic_url(&BadgeEndpoint::default(), &catalog, &badge, None).unwrap();
        assert_eq!(url, "https://img.shields.io/crates/v/serde?color=orange");
    }

    #[test]
    fn test_dynamic_shared_query_order() {
        let catalog = ServiceCatalog::builtin().unwrap();
        let mut badge = dynamic("npm/v", &[("package", "react")]);
        badge.display = DisplayOptions {
            style: "plastic".to_string(),
            logo: "npm".to_string(),
            logo_color: "red".to_string(),
            color: "brightgreen".to_string(),
            label_color: "333".to_string(),
        };

        let url = build_dynamic_url(&BadgeEndpoint::default(), &catalog, &badge, None).unwrap();
        assert_eq!(
            url,
            "https://img.shields.io/npm/v/react?style=plastic&logo=npm&logoColor=red&labelColor=333"
        );
    }
}
