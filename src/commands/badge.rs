// Badge Commands
// Catalog lookups, form edits, generation and export

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Value};

use crate::commands::{AppContext, BadgeState};
use crate::models::{
    BadgeMode, CustomLogo, CustomLogoInfo, DisplayPatch, ExportFormat, IconCategory, IconEntry,
    ServiceDefinition, ServiceSummary, StaticPatch, SHORTCUTS,
};
use crate::services::{color, icon_catalog, render_snippet, SessionSnapshot, SvgDownload};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceList<'a> {
    pub categories: Vec<&'a str>,
    pub services: Vec<ServiceSummary>,
}

pub fn get_services<'a>(ctx: &'a AppContext, category: Option<&str>) -> ServiceList<'a> {
    ServiceList {
        categories: ctx.services.categories(),
        services: ctx.services.summaries(category),
    }
}

pub fn get_service(ctx: &AppContext, key: &str) -> Result<ServiceDefinition, String> {
    ctx.services
        .get(key)
        .cloned()
        .ok_or_else(|| format!("Unknown service: {key}"))
}

pub fn get_icons(category: IconCategory, search: Option<&str>) -> Value {
    let icons: Vec<IconEntry> = icon_catalog::search(category, search.unwrap_or_default());
    json!({
        "categories": IconCategory::ALL,
        "category": category,
        "icons": icons,
    })
}

pub fn get_shortcuts() -> Value {
    json!(SHORTCUTS)
}

pub fn normalize_color(input: &str) -> Value {
    json!({
        "color": color::normalize(input),
        "swatch": color::swatch(input),
    })
}

pub fn get_session(ctx: &AppContext) -> Result<SessionSnapshot, String> {
    Ok(ctx.session()?.to_snapshot())
}

pub fn switch_mode(ctx: &AppContext, mode: BadgeMode) -> Result<BadgeState, String> {
    let ((), state) = ctx.update_session(|session, _| session.switch_mode(mode))?;
    Ok(state)
}

pub fn update_static(ctx: &AppContext, patch: StaticPatch) -> Result<BadgeState, String> {
    let ((), state) = ctx.update_session(|session, _| session.update_static(patch))?;
    Ok(state)
}

pub fn update_dynamic(ctx: &AppContext, patch: DisplayPatch) -> Result<BadgeState, String> {
    let ((), state) = ctx.update_session(|session, _| session.update_dynamic(patch))?;
    Ok(state)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSelection {
    /// Definition to render the parameter form from; None for keys outside the catalog
    pub service: Option<ServiceDefinition>,
    pub badge: BadgeState,
}

pub fn select_service(ctx: &AppContext, key: &str) -> Result<ServiceSelection, String> {
    let (service, badge) = ctx.update_session(|session, services| {
        session.select_service(key, services).cloned()
    })?;
    Ok(ServiceSelection { service, badge })
}

pub fn set_params(ctx: &AppContext, params: BTreeMap<String, String>) -> Result<BadgeState, String> {
    let ((), state) = ctx.update_session(|session, _| session.set_params(params))?;
    Ok(state)
}

pub fn apply_template(ctx: &AppContext, id: &str) -> Result<BadgeState, String> {
    let template = ctx
        .templates
        .find(id)
        .ok_or_else(|| format!("Unknown template: {id}"))?;
    let ((), state) = ctx.update_session(|session, services| session.apply_template(template, services))?;
    Ok(state)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoUpload {
    pub logo: CustomLogoInfo,
    pub badge: BadgeState,
}

/// Validate and install an uploaded logo; rejected uploads leave the session untouched
pub fn upload_logo(
    ctx: &AppContext,
    file_name: &str,
    mime_type: &str,
    data: &str,
) -> Result<LogoUpload, String> {
    let logo = CustomLogo::from_base64(file_name, mime_type, data).map_err(|e| e.to_string())?;
    let info = logo.info();
    log::info!("Using uploaded logo {} ({})", info.file_name, info.size_label);

    let ((), badge) = ctx.update_session(|session, _| session.set_custom_logo(logo))?;
    Ok(LogoUpload { logo: info, badge })
}

pub fn remove_logo(ctx: &AppContext) -> Result<BadgeState, String> {
    let (_, state) = ctx.update_session(|session, _| session.clear_custom_logo())?;
    Ok(state)
}

pub fn generate(ctx: &AppContext) -> Result<BadgeState, String> {
    let ((), state) = ctx.update_session(|_, _| ())?;
    Ok(state)
}

pub fn export(ctx: &AppContext, format: ExportFormat) -> Result<String, String> {
    let session = ctx.session()?;
    render_snippet(format, session.url().unwrap_or_default(), Some(session.link()))
        .map_err(|e| e.to_string())
}

/// Fetch the SVG rendering. With `save` it is written under the downloads directory.
pub async fn download_svg(
    ctx: &AppContext,
    save: bool,
    file_name: Option<&str>,
) -> Result<Value, String> {
    // Copy the URL out so no lock is held across the request
    let url = ctx.session()?.url().map(str::to_string).unwrap_or_default();

    if save {
        let download: SvgDownload = ctx
            .downloader
            .download(&url, file_name)
            .await
            .map_err(|e| e.to_string())?;
        Ok(json!(download))
    } else {
        let svg = ctx.downloader.fetch(&url).await.map_err(|e| e.to_string())?;
        Ok(json!({ "svg": svg }))
    }
}
