// Command Dispatch
// Maps `/api/invoke/:command` names and JSON payloads onto command functions

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::commands::{badge, favorites, system, AppContext};
use crate::models::{BadgeMode, DisplayPatch, ExportFormat, IconCategory, Settings, StaticPatch, ThemeMode};

pub async fn invoke_command(ctx: &AppContext, command: &str, payload: Value) -> Result<Value, String> {
    match command {
        // Catalogs
        "get_services" => {
            let category: Option<String> = get_opt_arg(&payload, "category")?;
            Ok(json!(badge::get_services(ctx, category.as_deref())))
        }
        "get_service" => {
            let key: String = get_arg(&payload, "key")?;
            Ok(json!(badge::get_service(ctx, &key)?))
        }
        "get_templates" => Ok(json!(ctx.templates)),
        "get_icons" => {
            let category: Option<IconCategory> = get_opt_arg(&payload, "category")?;
            let search: Option<String> = get_opt_arg(&payload, "search")?;
            Ok(badge::get_icons(category.unwrap_or_default(), search.as_deref()))
        }
        "get_shortcuts" => Ok(badge::get_shortcuts()),
        "normalize_color" => {
            let color: String = get_arg(&payload, "color")?;
            Ok(badge::normalize_color(&color))
        }

        // Session
        "get_session" => Ok(json!(badge::get_session(ctx)?)),
        "switch_mode" => {
            let mode: BadgeMode = get_arg(&payload, "mode")?;
            Ok(json!(badge::switch_mode(ctx, mode)?))
        }
        "update_static" => {
            let fields: StaticPatch = get_arg(&payload, "fields")?;
            Ok(json!(badge::update_static(ctx, fields)?))
        }
        "update_dynamic" => {
            let fields: DisplayPatch = get_arg(&payload, "fields")?;
            Ok(json!(badge::update_dynamic(ctx, fields)?))
        }
        "select_service" => {
            let key: String = get_arg(&payload, "key")?;
            Ok(json!(badge::select_service(ctx, &key)?))
        }
        "set_params" => {
            let params: BTreeMap<String, String> = get_arg(&payload, "params")?;
            Ok(json!(badge::set_params(ctx, params)?))
        }
        "apply_template" => {
            let id: String = get_arg(&payload, "id")?;
            Ok(json!(badge::apply_template(ctx, &id)?))
        }
        "upload_logo" => {
            let file_name: String = get_arg(&payload, "fileName")?;
            let mime_type: String = get_arg(&payload, "mimeType")?;
            let data: String = get_arg(&payload, "data")?;
            Ok(json!(badge::upload_logo(ctx, &file_name, &mime_type, &data)?))
        }
        "remove_logo" => Ok(json!(badge::remove_logo(ctx)?)),
        "generate" => Ok(json!(badge::generate(ctx)?)),

        // Export
        "export" => {
            let format: ExportFormat = get_arg(&payload, "format")?;
            let text = badge::export(ctx, format)?;
            Ok(json!({ "format": format, "text": text }))
        }
        "download_svg" => {
            let save: Option<bool> = get_opt_arg(&payload, "save")?;
            let file_name: Option<String> = get_opt_arg(&payload, "fileName")?;
            badge::download_svg(ctx, save.unwrap_or(true), file_name.as_deref()).await
        }

        // Favorites
        "get_favorites" => Ok(json!(favorites::get_favorites(ctx)?)),
        "save_favorite" => Ok(json!(favorites::save_favorite(ctx)?)),
        "load_favorite" => {
            let id: i64 = get_arg(&payload, "id")?;
            Ok(json!(favorites::load_favorite(ctx, id)?))
        }
        "delete_favorite" => {
            let id: i64 = get_arg(&payload, "id")?;
            Ok(json!({ "deleted": favorites::delete_favorite(ctx, id)? }))
        }
        "clear_favorites" => {
            let confirmed: Option<bool> = get_opt_arg(&payload, "confirmed")?;
            let removed = favorites::clear_favorites(ctx, confirmed.unwrap_or(false))?;
            Ok(json!({ "removed": removed }))
        }

        // Theme
        "get_theme" => Ok(json!(system::get_theme(ctx))),
        "set_theme" => {
            let theme: ThemeMode = get_arg(&payload, "theme")?;
            Ok(json!(system::set_theme(ctx, theme)?))
        }
        "toggle_theme" => Ok(json!(system::toggle_theme(ctx)?)),

        // Settings & logs
        "get_settings" => Ok(json!(system::get_settings(ctx)?)),
        "save_settings" => {
            let settings: Settings = get_arg(&payload, "settings")?;
            Ok(json!(system::save_settings(ctx, settings)?))
        }
        "get_recent_logs" => {
            let max_lines: Option<usize> = get_opt_arg(&payload, "maxLines")?;
            Ok(json!(system::get_recent_logs(ctx, max_lines)?))
        }

        _ => Err(format!("Unknown command: {command}")),
    }
}

// ============================================================================
// Argument Parsing
// ============================================================================

pub fn get_arg<T: DeserializeOwned>(payload: &Value, key: &str) -> Result<T, String> {
    let obj = payload
        .as_object()
        .ok_or_else(|| "Invalid payload".to_string())?;
    let value = obj
        .get(key)
        .ok_or_else(|| format!("Missing argument: {key}"))?;
    serde_json::from_value(value.clone()).map_err(|e| format!("Invalid {key}: {e}"))
}

pub fn get_opt_arg<T: DeserializeOwned>(payload: &Value, key: &str) -> Result<Option<T>, String> {
    let obj = match payload {
        Value::Object(obj) => obj,
        // Commands without arguments may be invoked with an empty body
        Value::Null => return Ok(None),
        _ => return Err("Invalid payload".to_string()),
    };
    let value = match obj.get(key) {
        Some(value) => value.clone(),
        None => return Ok(None),
    };

    if value.is_null() {
        return Ok(None);
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| format!("Invalid {key}: {e}"))
}
