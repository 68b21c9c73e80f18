// Shieldy Models
// Data structures for the application

mod badge;
mod export;
mod favorite;
mod icon;
mod logo;
mod service;
mod settings;
mod template;
mod theme;

pub use badge::*;
pub use export::*;
pub use favorite::*;
pub use icon::*;
pub use logo::*;
pub use service::*;
pub use settings::*;
pub use template::*;
pub use theme::*;
