// Application Context
// Shared state behind every command

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use serde::Serialize;

use crate::models::{BadgeMode, Settings};
use crate::services::{
    emit_event, BadgeEndpoint, BadgeSession, EventSink, FavoritesManager, KeyValueStore,
    ServiceCatalog, SettingsManager, SvgDownloader, TemplateCatalog, ThemeManager, BADGE_UPDATED,
};

/// Outcome of a rebuild, sent back to clients and broadcast as `badge://updated`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeState {
    pub mode: BadgeMode,
    pub url: Option<String>,
    /// Why no URL could be built
    pub reason: Option<String>,
}

pub struct AppContext {
    pub(crate) services: ServiceCatalog,
    pub(crate) templates: TemplateCatalog,
    pub(crate) settings_manager: SettingsManager,
    pub(crate) theme: ThemeManager,
    pub(crate) downloader: SvgDownloader,
    pub(crate) store: Arc<dyn KeyValueStore>,
    pub(crate) events: Arc<dyn EventSink>,
    pub(crate) log_dir: PathBuf,
    endpoint: RwLock<BadgeEndpoint>,
    session: Mutex<BadgeSession>,
    favorites: Mutex<FavoritesManager>,
}

impl AppContext {
    /// Load catalogs, settings, favorites and the last form state
    pub fn new(
        data_dir: PathBuf,
        log_dir: PathBuf,
        store: Arc<dyn KeyValueStore>,
        events: Arc<dyn EventSink>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let services = ServiceCatalog::builtin()?;
        let settings_manager = SettingsManager::new(data_dir.clone());
        let settings = settings_manager.load().unwrap_or_else(|e| {
            log::warn!("Using default settings: {e}");
            Settings::default()
        });
        let downloader = SvgDownloader::new(data_dir.join("downloads"))?;

        let mut session = BadgeSession::new();
        if let Err(e) = session.restore_fields(store.as_ref(), &services) {
            log::warn!("Failed to restore form fields: {e}");
        }
        let endpoint = BadgeEndpoint::new(&settings.badge_endpoint);
        if let Err(e) = session.regenerate(&endpoint, &services) {
            log::debug!("No badge after restore: {e}");
        }

        let favorites = FavoritesManager::load(store.clone());
        log::info!(
            "Context ready: {} services, {} favorites, endpoint {}",
            services.len(),
            favorites.list().len(),
            endpoint.root()
        );

        Ok(Self {
            services,
            templates: TemplateCatalog::builtin(),
            settings_manager,
            theme: ThemeManager::new(store.clone()),
            downloader,
            store,
            events,
            log_dir,
            endpoint: RwLock::new(endpoint),
            session: Mutex::new(session),
            favorites: Mutex::new(favorites),
        })
    }

    pub fn settings(&self) -> Result<Settings, String> {
        self.settings_manager.load()
    }

    /// Persist settings and pick up a changed rendering endpoint
    pub fn apply_settings(&self, settings: &Settings) -> Result<(), String> {
        self.settings_manager.save(settings)?;
        let endpoint = BadgeEndpoint::new(&settings.badge_endpoint);
        let changed = {
            let mut current = self
                .endpoint
                .write()
                .map_err(|_| "Endpoint lock poisoned".to_string())?;
            let changed = *current != endpoint;
            if changed {
                log::info!("Badge endpoint changed to {}", endpoint.root());
                *current = endpoint;
            }
            changed
        };

        // The current URL still points at the old root
        if changed {
            self.update_session(|_, _| ())?;
        }
        Ok(())
    }

    pub fn endpoint(&self) -> BadgeEndpoint {
        self.endpoint
            .read()
            .map(|endpoint| endpoint.clone())
            .unwrap_or_default()
    }

    pub(crate) fn session(&self) -> Result<MutexGuard<'_, BadgeSession>, String> {
        self.session
            .lock()
            .map_err(|_| "Session lock poisoned".to_string())
    }

    pub(crate) fn favorites(&self) -> Result<MutexGuard<'_, FavoritesManager>, String> {
        self.favorites
            .lock()
            .map_err(|_| "Favorites lock poisoned".to_string())
    }

    /// Apply a change to the session, rebuild the URL, save the form fields
    /// and broadcast the new state.
    pub(crate) fn update_session<R>(
        &self,
        change: impl FnOnce(&mut BadgeSession, &ServiceCatalog) -> R,
    ) -> Result<(R, BadgeState), String> {
        let endpoint = self.endpoint();
        let (output, state) = {
            let mut session = self.session()?;
            let output = change(&mut session, &self.services);
            let state = rebuild(&mut session, &endpoint, &self.services);
            if let Err(e) = session.persist_fields(self.store.as_ref()) {
                log::warn!("Failed to save form fields: {e}");
            }
            (output, state)
        };

        emit_event(self.events.as_ref(), BADGE_UPDATED, &state);
        Ok((output, state))
    }
}

fn rebuild(session: &mut BadgeSession, endpoint: &BadgeEndpoint, services: &ServiceCatalog) -> BadgeState {
    let (url, reason) = match session.regenerate(endpoint, services) {
        Ok(url) => (Some(url), None),
        Err(e) => (None, Some(e.to_string())),
    };
    BadgeState {
        mode: session.mode(),
        url,
        reason,
    }
}
