// System Commands
// Theme preference, backend settings and log access

use crate::commands::AppContext;
use crate::models::{Settings, ThemeMode};
use crate::services::{emit_event, read_recent_logs, THEME_CHANGED};

pub const DEFAULT_LOG_LINES: usize = 500;

pub fn get_theme(ctx: &AppContext) -> ThemeMode {
    ctx.theme.get()
}

pub fn set_theme(ctx: &AppContext, mode: ThemeMode) -> Result<ThemeMode, String> {
    let mode = ctx.theme.set(mode)?;
    emit_event(ctx.events.as_ref(), THEME_CHANGED, &mode);
    Ok(mode)
}

pub fn toggle_theme(ctx: &AppContext) -> Result<ThemeMode, String> {
    let mode = ctx.theme.toggle()?;
    emit_event(ctx.events.as_ref(), THEME_CHANGED, &mode);
    Ok(mode)
}

pub fn get_settings(ctx: &AppContext) -> Result<Settings, String> {
    ctx.settings()
}

/// Save settings; the badge endpoint applies immediately, server options on restart
pub fn save_settings(ctx: &AppContext, settings: Settings) -> Result<Settings, String> {
    if settings.backend_port == 0 {
        return Err("Invalid backendPort: must be between 1 and 65535".to_string());
    }
    if settings.badge_endpoint.trim().is_empty() {
        return Err("Invalid badgeEndpoint: must not be empty".to_string());
    }

    ctx.apply_settings(&settings)?;
    Ok(settings)
}

pub fn get_recent_logs(ctx: &AppContext, max_lines: Option<usize>) -> Result<Vec<String>, String> {
    read_recent_logs(&ctx.log_dir, max_lines.unwrap_or(DEFAULT_LOG_LINES))
}
