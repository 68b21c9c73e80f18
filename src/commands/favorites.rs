// Favorites Commands
// Save, restore and prune saved badges

use serde_json::json;

use crate::commands::{AppContext, BadgeState};
use crate::models::Favorite;
use crate::services::{emit_event, FAVORITES_CHANGED};

fn notify(ctx: &AppContext, favorites: &[Favorite]) {
    emit_event(ctx.events.as_ref(), FAVORITES_CHANGED, &json!({ "favorites": favorites }));
}

pub fn get_favorites(ctx: &AppContext) -> Result<Vec<Favorite>, String> {
    Ok(ctx.favorites()?.list().to_vec())
}

/// Save the current badge under a derived name
pub fn save_favorite(ctx: &AppContext) -> Result<Favorite, String> {
    let (config, url) = {
        let session = ctx.session()?;
        (session.snapshot(), session.url().unwrap_or_default().to_string())
    };

    let mut favorites = ctx.favorites()?;
    let favorite = favorites.save(config, &url).map_err(|e| e.to_string())?;
    notify(ctx, favorites.list());
    Ok(favorite)
}

/// Restore a favorite into the session and rebuild its URL
pub fn load_favorite(ctx: &AppContext, id: i64) -> Result<BadgeState, String> {
    let favorite = ctx
        .favorites()?
        .get(id)
        .cloned()
        .ok_or_else(|| format!("Favorite not found: {id}"))?;

    let ((), state) = ctx.update_session(|session, services| session.load_favorite(&favorite, services))?;
    log::debug!("Loaded favorite '{}'", favorite.name);
    Ok(state)
}

pub fn delete_favorite(ctx: &AppContext, id: i64) -> Result<bool, String> {
    let mut favorites = ctx.favorites()?;
    let deleted = favorites.delete(id).map_err(|e| e.to_string())?;
    if deleted {
        notify(ctx, favorites.list());
    }
    Ok(deleted)
}

pub fn clear_favorites(ctx: &AppContext, confirmed: bool) -> Result<usize, String> {
    let mut favorites = ctx.favorites()?;
    let removed = favorites.clear(confirmed).map_err(|e| e.to_string())?;
    notify(ctx, favorites.list());
    Ok(removed)
}
