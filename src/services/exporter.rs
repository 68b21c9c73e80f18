// Exporter Service
// Markdown/HTML/URL snippets and SVG downloads

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::models::ExportFormat;
use crate::services::safe_join;

pub const SVG_FILE_NAME: &str = "badge.svg";
const SVG_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Generate a badge first")]
    NoBadge,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Badge service returned HTTP {0}")]
    Status(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn require_url(url: &str) -> Result<&str, ExportError> {
    if url.is_empty() {
        Err(ExportError::NoBadge)
    } else {
        Ok(url)
    }
}

fn link_target(link: Option<&str>) -> Option<&str> {
    link.map(str::trim).filter(|link| !link.is_empty())
}

/// Escape text placed inside a double-quoted HTML attribute
fn html_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Snippet for the given format; a non-blank link wraps the image
pub fn render_snippet(format: ExportFormat, url: &str, link: Option<&str>) -> Result<String, ExportError> {
    let url = require_url(url)?;
    let link = link_target(link);

    let snippet = match format {
        ExportFormat::Markdown => match link {
            Some(link) => format!("[![Badge]({url})]({link})"),
            None => format!("![Badge]({url})"),
        },
        ExportFormat::Html => {
            let img = format!(r#"<img src="{}" alt="Badge">"#, html_attr(url));
            match link {
                Some(link) => format!(r#"<a href="{}">{img}</a>"#, html_attr(link)),
                None => img,
            }
        }
        ExportFormat::Url => url.to_string(),
    };
    Ok(snippet)
}

/// The badge URL with `format=svg` appended
pub fn svg_url(url: &str) -> Result<String, ExportError> {
    let url = require_url(url)?;
    let separator = if url.contains('?') { '&' } else { '?' };
    Ok(format!("{url}{separator}format=svg"))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SvgDownload {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Fetches rendered badges from the rendering service
pub struct SvgDownloader {
    client: reqwest::Client,
    downloads_dir: PathBuf,
}

impl SvgDownloader {
    pub fn new(downloads_dir: PathBuf) -> Result<Self, ExportError> {
        let client = reqwest::Client::builder()
            .timeout(SVG_FETCH_TIMEOUT)
            .user_agent(concat!("shieldy/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            downloads_dir,
        })
    }

    /// Request the SVG rendering of a badge URL and return its body
    pub async fn fetch(&self, url: &str) -> Result<String, ExportError> {
        let svg_url = svg_url(url)?;
        log::debug!("Fetching badge SVG from {svg_url}");

        let response = self.client.get(&svg_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("Badge service answered {status} for {svg_url}");
            return Err(ExportError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    /// Fetch and write the SVG under the downloads directory
    pub async fn download(&self, url: &str, file_name: Option<&str>) -> Result<SvgDownload, ExportError> {
        let svg = self.fetch(url).await?;

        tokio::fs::create_dir_all(&self.downloads_dir).await?;
        let path = safe_join(&self.downloads_dir, file_name, SVG_FILE_NAME, "svg");
        tokio::fs::write(&path, svg.as_bytes()).await?;

        log::info!("Saved badge SVG to {:?}", path);
        Ok(SvgDownload {
            path,
            bytes: svg.len(),
        })
    }
}
