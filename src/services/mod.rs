// Shieldy Services
// Business logic layer

mod badge_session;
pub mod color;
mod custom_logo;
mod events;
mod exporter;
mod favorites_manager;
pub mod icon_catalog;
mod log_manager;
mod path_validator;
mod service_catalog;
mod settings_manager;
mod storage;
mod template_catalog;
mod theme_manager;
mod url_builder;

pub use badge_session::*;
pub use custom_logo::*;
pub use events::*;
pub use exporter::*;
pub use favorites_manager::*;
pub use log_manager::*;
pub use path_validator::*;
pub use service_catalog::*;
pub use settings_manager::*;
pub use storage::*;
pub use template_catalog::*;
pub use theme_manager::*;
pub use url_builder::*;
